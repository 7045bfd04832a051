use std::fmt;

use name_mapper::{MappingError, NameResolver};
use tracing::{info, warn};

use crate::providers::{RankingsProvider, RosterProvider};
use crate::rankings::normalize;
use crate::types::{Player, RankedStarter, RankingEntry, UpgradeRecommendation};
use crate::upgrades::find_upgrades;

/// A provider step that could not complete during a check
///
/// These are expected operational conditions, not errors: the report
/// carries them so the caller can surface what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    /// The user's roster could not be fetched
    Roster,
    /// The free-agent list could not be fetched
    AvailablePlayers,
    /// The rankings list could not be fetched
    Rankings,
    /// The rankings list was fetched but contained no entries
    EmptyRankings,
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incomplete::Roster => write!(f, "roster fetch failed"),
            Incomplete::AvailablePlayers => write!(f, "available-players fetch failed"),
            Incomplete::Rankings => write!(f, "rankings fetch failed"),
            Incomplete::EmptyRankings => write!(f, "rankings list was empty"),
        }
    }
}

/// Result of one upgrade check
#[derive(Debug)]
pub struct UpgradeReport {
    /// The user's starting pitchers, best rank first
    pub my_starters: Vec<RankedStarter>,
    /// Available starting pitchers, best rank first
    pub available_starters: Vec<RankedStarter>,
    /// Recommended pickups, ascending by candidate rank
    pub recommendations: Vec<UpgradeRecommendation>,
    /// Provider steps that did not complete
    pub incomplete: Vec<Incomplete>,
}

impl UpgradeReport {
    /// Whether every provider step completed
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }
}

/// Ties the providers, the name resolver, and the comparison together
///
/// One `run_check` performs a full sequential pass: fetch roster, fetch
/// free agents, fetch rankings, resolve names, compare. Provider failures
/// degrade the report instead of aborting it; only a failure to persist a
/// new name mapping propagates as an error.
pub struct UpgradeAssistant {
    roster_provider: Box<dyn RosterProvider>,
    rankings_provider: Box<dyn RankingsProvider>,
    resolver: NameResolver,
}

impl UpgradeAssistant {
    pub fn new(
        roster_provider: Box<dyn RosterProvider>,
        rankings_provider: Box<dyn RankingsProvider>,
        resolver: NameResolver,
    ) -> Self {
        Self { roster_provider, rankings_provider, resolver }
    }

    /// Run one upgrade check.
    ///
    /// `threshold` is the minimum 0-100 name-similarity score for a match;
    /// `slack` widens the rank cutoff past the worst rostered starter.
    pub async fn run_check(
        &mut self,
        threshold: u8,
        slack: u32,
    ) -> Result<UpgradeReport, MappingError> {
        info!("Running upgrade check (threshold {}, slack {})", threshold, slack);
        let mut incomplete = Vec::new();

        let roster = match self.roster_provider.my_roster().await {
            Ok(players) => players,
            Err(e) => {
                warn!("{} roster fetch failed: {}", self.roster_provider.name(), e);
                incomplete.push(Incomplete::Roster);
                Vec::new()
            }
        };

        let available = match self.roster_provider.available_players().await {
            Ok(players) => players,
            Err(e) => {
                warn!("{} available-players fetch failed: {}", self.roster_provider.name(), e);
                incomplete.push(Incomplete::AvailablePlayers);
                Vec::new()
            }
        };

        let rankings = match self.rankings_provider.rankings().await {
            Ok(entries) => {
                if entries.is_empty() {
                    warn!("{} returned an empty rankings list", self.rankings_provider.name());
                    incomplete.push(Incomplete::EmptyRankings);
                }
                entries
            }
            Err(e) => {
                warn!("{} rankings fetch failed: {}", self.rankings_provider.name(), e);
                incomplete.push(Incomplete::Rankings);
                Vec::new()
            }
        };

        let report = self.compare(&roster, &available, &rankings, threshold, slack, incomplete)?;

        info!(
            "Check finished: {} of my starters, {} available, {} recommendations",
            report.my_starters.len(),
            report.available_starters.len(),
            report.recommendations.len()
        );
        Ok(report)
    }

    fn compare(
        &mut self,
        roster: &[Player],
        available: &[Player],
        rankings: &[RankingEntry],
        threshold: u8,
        slack: u32,
        incomplete: Vec<Incomplete>,
    ) -> Result<UpgradeReport, MappingError> {
        let my_starters = normalize(roster, rankings, &mut self.resolver, threshold)?;
        let available_starters = normalize(available, rankings, &mut self.resolver, threshold)?;
        let recommendations = find_upgrades(&my_starters, &available_starters, slack);

        Ok(UpgradeReport { my_starters, available_starters, recommendations, incomplete })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use crate::types::{PositionType, Rank};
    use async_trait::async_trait;
    use name_mapper::{MemoryMappingStore, TokenSortMatcher};

    struct StubRoster {
        mine: Option<Vec<Player>>,
        available: Option<Vec<Player>>,
    }

    #[async_trait]
    impl RosterProvider for StubRoster {
        async fn my_roster(&self) -> Result<Vec<Player>, ProviderError> {
            self.mine
                .clone()
                .ok_or_else(|| ProviderError::unavailable("stub-roster", "roster down"))
        }

        async fn available_players(&self) -> Result<Vec<Player>, ProviderError> {
            self.available
                .clone()
                .ok_or_else(|| ProviderError::unavailable("stub-roster", "free agents down"))
        }

        fn name(&self) -> &str {
            "stub-roster"
        }
    }

    struct StubRankings {
        entries: Option<Vec<RankingEntry>>,
    }

    #[async_trait]
    impl RankingsProvider for StubRankings {
        async fn rankings(&self) -> Result<Vec<RankingEntry>, ProviderError> {
            self.entries
                .clone()
                .ok_or_else(|| ProviderError::unavailable("stub-rankings", "site down"))
        }

        fn name(&self) -> &str {
            "stub-rankings"
        }
    }

    fn sp(name: &str) -> Player {
        Player::new(name, "SP", PositionType::Pitcher)
    }

    fn entry(rank: u32, name: &str) -> RankingEntry {
        RankingEntry { rank, name: name.to_string(), badge: None }
    }

    fn assistant(roster: StubRoster, rankings: StubRankings) -> UpgradeAssistant {
        let resolver = NameResolver::new(
            Box::new(TokenSortMatcher::new()),
            Box::new(MemoryMappingStore::new()),
        );
        UpgradeAssistant::new(Box::new(roster), Box::new(rankings), resolver)
    }

    #[tokio::test]
    async fn test_full_check_recommends_upgrade() {
        // Roster names in "First Last", rankings in "Last, First": the
        // whole pipeline has to resolve across conventions to work.
        let roster = StubRoster {
            mine: Some(vec![sp("Gerrit Cole"), sp("Framber Valdez")]),
            available: Some(vec![sp("Tarik Skubal"), sp("Patrick Corbin")]),
        };
        let rankings = StubRankings {
            entries: Some(vec![
                entry(1, "Skubal, Tarik"),
                entry(8, "Cole, Gerrit"),
                entry(23, "Valdez, Framber"),
                entry(90, "Corbin, Patrick"),
            ]),
        };

        let mut assistant = assistant(roster, rankings);
        let report = assistant.run_check(80, 0).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.my_starters.len(), 2);
        assert_eq!(report.my_starters[0].rank, Rank::Ranked(8));
        assert_eq!(report.recommendations.len(), 1);

        let rec = &report.recommendations[0];
        assert_eq!(rec.candidate.source_name, "Tarik Skubal");
        assert_eq!(rec.rank_improvement, 22);
        assert_eq!(rec.drop_candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_roster_failure_degrades_without_error() {
        let roster = StubRoster { mine: None, available: Some(vec![sp("Tarik Skubal")]) };
        let rankings = StubRankings { entries: Some(vec![entry(1, "Skubal, Tarik")]) };

        let mut assistant = assistant(roster, rankings);
        let report = assistant.run_check(80, 0).await.unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.incomplete, vec![Incomplete::Roster]);
        assert!(report.my_starters.is_empty());
        // Free agents still ranked, but no baseline means no recommendations
        assert_eq!(report.available_starters.len(), 1);
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_rankings_failure_degrades_without_error() {
        let roster = StubRoster {
            mine: Some(vec![sp("Gerrit Cole")]),
            available: Some(vec![sp("Tarik Skubal")]),
        };
        let rankings = StubRankings { entries: None };

        let mut assistant = assistant(roster, rankings);
        let report = assistant.run_check(80, 0).await.unwrap();

        assert_eq!(report.incomplete, vec![Incomplete::Rankings]);
        // Everyone degrades to unranked rather than erroring
        assert_eq!(report.my_starters[0].rank, Rank::Unranked);
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_empty_rankings_is_flagged() {
        let roster = StubRoster {
            mine: Some(vec![sp("Gerrit Cole")]),
            available: Some(vec![]),
        };
        let rankings = StubRankings { entries: Some(vec![]) };

        let mut assistant = assistant(roster, rankings);
        let report = assistant.run_check(80, 0).await.unwrap();

        assert_eq!(report.incomplete, vec![Incomplete::EmptyRankings]);
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_both_fetches_can_fail_independently() {
        let roster = StubRoster { mine: None, available: None };
        let rankings = StubRankings { entries: Some(vec![entry(1, "Skubal, Tarik")]) };

        let mut assistant = assistant(roster, rankings);
        let report = assistant.run_check(80, 0).await.unwrap();

        assert_eq!(report.incomplete, vec![Incomplete::Roster, Incomplete::AvailablePlayers]);
        assert!(report.recommendations.is_empty());
    }
}
