use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Player, RankingEntry};

/// Errors from the external data providers
///
/// A failed fetch is distinct from an empty result: an empty roster is a
/// valid answer, a provider error is not.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider could not be reached or refused the request
    #[error("provider '{provider}' unavailable: {message}")]
    Unavailable { provider: String, message: String },

    /// The provider responded with data the client could not interpret
    #[error("provider '{provider}' returned an unexpected response: {message}")]
    BadResponse { provider: String, message: String },
}

impl ProviderError {
    pub fn unavailable(provider: &str, message: impl Into<String>) -> Self {
        ProviderError::Unavailable { provider: provider.to_string(), message: message.into() }
    }

    pub fn bad_response(provider: &str, message: impl Into<String>) -> Self {
        ProviderError::BadResponse { provider: provider.to_string(), message: message.into() }
    }
}

/// Trait for the league platform's roster data
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Players currently on the user's own team
    async fn my_roster(&self) -> Result<Vec<Player>, ProviderError>;

    /// Unrostered players available to add
    async fn available_players(&self) -> Result<Vec<Player>, ProviderError>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Trait for the pitcher rankings source
#[async_trait]
pub trait RankingsProvider: Send + Sync {
    /// The current ranking snapshot, best rank first
    async fn rankings(&self) -> Result<Vec<RankingEntry>, ProviderError>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
