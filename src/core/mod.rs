// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod scoring;
pub mod validation;

pub use distance::{distance_score, haversine_distance, DEFAULT_DISTANCE_DECAY_PER_KM};
pub use matcher::{rank_matches, Matcher};
pub use scoring::{calculate_match_score, category_score, urgency_score, ScoreBreakdown};
pub use validation::{validate_coordinate, MatchError};
