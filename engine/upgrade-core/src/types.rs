use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad player classification from the league platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionType {
    Pitcher,
    Batter,
    Other,
}

impl PositionType {
    /// Map the platform's one-letter position type code
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => PositionType::Pitcher,
            "B" => PositionType::Batter,
            _ => PositionType::Other,
        }
    }
}

/// A player as reported by the roster platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player name exactly as the platform spells it
    pub name: String,
    /// Raw eligible-position list (e.g. "SP", "SP,RP")
    pub position: String,
    /// Broad classification (pitcher vs batter)
    pub position_type: PositionType,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>, position_type: PositionType) -> Self {
        Self { name: name.into(), position: position.into(), position_type }
    }

    /// Whether the eligible-position list includes the starting pitcher slot
    pub fn is_starting_pitcher(&self) -> bool {
        self.position_type == PositionType::Pitcher
            && self.position.split(',').any(|p| p.trim() == "SP")
    }
}

/// One row of the published rankings list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Position in the list, 1 = best
    pub rank: u32,
    /// Pitcher name as the rankings site spells it
    pub name: String,
    /// Opaque tier/badge metadata carried through from the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// A rank with an explicit "no confident match" sentinel
///
/// `Unranked` orders strictly worse than every finite rank, so sorting
/// ascending puts the best pitchers first and unmatched ones last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Ranked(u32),
    Unranked,
}

impl Rank {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Rank::Ranked(_))
    }

    /// The finite rank number, if any
    pub fn number(&self) -> Option<u32> {
        match self {
            Rank::Ranked(n) => Some(*n),
            Rank::Unranked => None,
        }
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Rank::Ranked(a), Rank::Ranked(b)) => a.cmp(b),
            (Rank::Ranked(_), Rank::Unranked) => Ordering::Less,
            (Rank::Unranked, Rank::Ranked(_)) => Ordering::Greater,
            (Rank::Unranked, Rank::Unranked) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ranked(n) => write!(f, "#{n}"),
            Rank::Unranked => write!(f, "unranked"),
        }
    }
}

/// A starting pitcher with its resolved rank attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStarter {
    /// Name as the roster platform spells it
    pub source_name: String,
    /// Matched rankings-list name, if resolution succeeded
    pub resolved_name: Option<String>,
    /// Rank from the list, or the unranked sentinel
    pub rank: Rank,
    /// Raw eligible-position list
    pub position: String,
}

/// One actionable recommendation: a free agent worth picking up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRecommendation {
    /// The available starter to add
    pub candidate: RankedStarter,
    /// How many list spots better than the worst rostered starter
    pub rank_improvement: u32,
    /// Rostered starters the candidate clearly improves on, best rank first
    pub drop_candidates: Vec<RankedStarter>,
}
