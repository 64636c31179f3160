//! Donation Matcher - ranks recipients for a posted donation
//!
//! This library provides the scoring core used to match donations with
//! recipients: haversine distance, category and urgency compatibility,
//! and a weighted, deterministic ranking of candidates.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::haversine_distance, rank_matches, MatchError, Matcher};
pub use models::{Candidate, Coordinate, Donation, MatchResult, ScoringWeights, Urgency};
