use tracing::debug;

use crate::types::{Rank, RankedStarter, UpgradeRecommendation};

/// Compare rostered starters against available ones and recommend pickups.
///
/// The baseline is the worst finite rank on the roster. Every available
/// starter ranked at or better than `baseline + slack` yields one
/// recommendation, in input order (callers pass rank-sorted lists, so the
/// output is ascending by candidate rank). Overlapping drop-candidate sets
/// are left as-is; the user decides which swap to make.
///
/// An all-unranked roster has no baseline to improve on, so it yields no
/// recommendations.
pub fn find_upgrades(
    mine: &[RankedStarter],
    available: &[RankedStarter],
    slack: u32,
) -> Vec<UpgradeRecommendation> {
    let Some(worst) = mine.iter().filter_map(|s| s.rank.number()).max() else {
        debug!("No ranked starters on the roster, nothing to compare against");
        return Vec::new();
    };

    let cutoff = worst + slack;
    let mut recommendations = Vec::new();

    for candidate in available {
        let Some(rank) = candidate.rank.number() else { continue };
        if rank > cutoff {
            continue;
        }

        let drop_candidates: Vec<RankedStarter> = mine
            .iter()
            .filter(|s| match s.rank {
                Rank::Unranked => true,
                Rank::Ranked(r) => r >= rank,
            })
            .cloned()
            .collect();

        recommendations.push(UpgradeRecommendation {
            candidate: candidate.clone(),
            // With a positive slack the candidate may sit below the
            // baseline; clamp instead of going negative
            rank_improvement: worst.saturating_sub(rank),
            drop_candidates,
        });
    }

    recommendations
}
