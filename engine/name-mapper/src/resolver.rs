use tracing::{debug, info};

use crate::error::MappingError;
use crate::matcher::NameMatcher;
use crate::store::MappingStore;

/// Resolves source-platform names to rankings-list names
///
/// The store is checked first; a cached mapping is returned without any
/// similarity work. New matches at or above the threshold are written
/// through the store before the call returns. A name that fails to match
/// is not cached, so it is re-scored on the next run, when the rankings
/// list may have picked it up.
pub struct NameResolver {
    matcher: Box<dyn NameMatcher>,
    store: Box<dyn MappingStore>,
}

impl NameResolver {
    pub fn new(matcher: Box<dyn NameMatcher>, store: Box<dyn MappingStore>) -> Self {
        Self { matcher, store }
    }

    /// Resolve `source_name` to the closest name in `candidate_pool`.
    ///
    /// Returns `Ok(Some(name))` for a cached or newly confirmed match,
    /// `Ok(None)` when no candidate reaches `threshold` (inclusive), and
    /// `Err` only when persisting a new mapping fails.
    pub fn resolve(
        &mut self,
        source_name: &str,
        candidate_pool: &[String],
        threshold: u8,
    ) -> Result<Option<String>, MappingError> {
        if source_name.trim().is_empty() {
            return Ok(None);
        }

        if let Some(mapped) = self.store.get(source_name) {
            debug!("Cache hit: '{}' -> '{}'", source_name, mapped);
            return Ok(Some(mapped));
        }

        let mut best: Option<(&str, u8)> = None;
        for candidate in candidate_pool {
            let score = self.matcher.score(source_name, candidate);
            // Strictly greater keeps the first-in-pool candidate on ties
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((candidate, score)) if score >= threshold => {
                info!(
                    "Matched '{}' -> '{}' (score {}, {})",
                    source_name,
                    candidate,
                    score,
                    self.matcher.name()
                );
                let mapped = candidate.to_string();
                self.store.insert(source_name, &mapped)?;
                Ok(Some(mapped))
            }
            Some((candidate, score)) => {
                debug!(
                    "No match for '{}': best candidate '{}' scored {} (threshold {})",
                    source_name, candidate, score, threshold
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Read-only view of the backing store
    pub fn store(&self) -> &dyn MappingStore {
        self.store.as_ref()
    }
}
