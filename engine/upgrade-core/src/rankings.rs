use std::collections::HashMap;

use name_mapper::{MappingError, NameResolver};
use tracing::debug;

use crate::types::{Player, Rank, RankedStarter, RankingEntry};

/// Attach ranks to the starting pitchers in a player list.
///
/// Filters `players` to starting-pitcher-eligible entries, resolves each
/// name against the rankings list through `resolver`, and returns the
/// result sorted ascending by rank. Unresolved names get the unranked
/// sentinel and sort last, keeping their input order.
pub fn normalize(
    players: &[Player],
    rankings: &[RankingEntry],
    resolver: &mut NameResolver,
    threshold: u8,
) -> Result<Vec<RankedStarter>, MappingError> {
    let pool: Vec<String> = rankings.iter().map(|e| e.name.clone()).collect();

    // First listed occurrence wins if the list ever repeats a name
    let mut rank_by_name: HashMap<&str, u32> = HashMap::new();
    for entry in rankings {
        rank_by_name.entry(entry.name.as_str()).or_insert(entry.rank);
    }

    let mut starters = Vec::new();
    for player in players.iter().filter(|p| p.is_starting_pitcher()) {
        let resolved = resolver.resolve(&player.name, &pool, threshold)?;

        let rank = match resolved.as_deref().and_then(|n| rank_by_name.get(n)) {
            Some(rank) => Rank::Ranked(*rank),
            None => {
                debug!("No rank for '{}', treating as unranked", player.name);
                Rank::Unranked
            }
        };

        starters.push(RankedStarter {
            source_name: player.name.clone(),
            resolved_name: resolved,
            rank,
            position: player.position.clone(),
        });
    }

    starters.sort_by_key(|s| s.rank);
    Ok(starters)
}
