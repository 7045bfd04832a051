//! Pitcher List "The List" rankings provider
//!
//! Scrapes the latest edition of The List from pitcherlist.com and caches
//! one snapshot per calendar day. When today's snapshot exists on disk it
//! is served as-is; presence is the only freshness check.

pub mod cache;
pub mod scrape;

pub use cache::ListSnapshot;
pub use scrape::ListScraper;
