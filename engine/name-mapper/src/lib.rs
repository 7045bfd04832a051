//! Name Mapper - Resolves player names across data sources
//!
//! The roster platform and the rankings site spell player names differently
//! ("Luis L. Ortiz" vs "Ortiz, Luis"). This crate scores candidates with a
//! token-sort similarity ratio and remembers confirmed matches in a
//! persistent store so each name is only searched once.

pub mod error;
pub mod matcher;
pub mod resolver;
pub mod store;

pub use error::MappingError;
pub use matcher::{NameMatcher, TokenSortMatcher};
pub use resolver::NameResolver;
pub use store::{JsonMappingStore, MappingStore, MemoryMappingStore};
