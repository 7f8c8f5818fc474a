//! Eligibility matching and relevance ranking for scholarship discovery.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
