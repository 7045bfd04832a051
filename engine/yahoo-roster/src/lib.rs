//! Yahoo Fantasy roster provider
//!
//! Fetches the user's roster and the league's free-agent list from the
//! Yahoo Fantasy API. Token acquisition is the bootstrap layer's problem;
//! this crate takes a ready bearer token and a league key.

pub mod client;

pub use client::YahooRosterClient;
