//! Upgrade Core - Pitcher upgrade recommendation engine
//!
//! Takes the roster and free-agent lists from the league platform, attaches
//! ranks from an independent rankings list (resolving the two sources'
//! naming conventions through name-mapper), and recommends free agents that
//! out-rank the weakest rostered starter.

pub mod assistant;
pub mod providers;
pub mod rankings;
pub mod types;
pub mod upgrades;

pub use assistant::{Incomplete, UpgradeAssistant, UpgradeReport};
pub use providers::{ProviderError, RankingsProvider, RosterProvider};
pub use rankings::normalize;
pub use types::{Player, PositionType, Rank, RankedStarter, RankingEntry, UpgradeRecommendation};
pub use upgrades::find_upgrades;
