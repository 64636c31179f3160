// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Coordinate, Donation, DonationStatus, MatchResult, MatchTier, ScoringWeights, Urgency};
pub use requests::{candidates_from_records, CandidateRecord, DonationRecord, FindMatchesRequest, RankMatchesRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, StoredResponse};
