use serde::{Deserialize, Serialize};

use crate::core::validation::MatchError;
use crate::models::domain::MatchResult;

/// Response for the rank and find endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub status_code: u16,
}

impl From<&MatchError> for ErrorResponse {
    fn from(err: &MatchError) -> Self {
        Self {
            error: "unable to compute matches".to_string(),
            message: err.to_string(),
            field: Some(err.field().to_string()),
            status_code: 400,
        }
    }
}

/// Response for record registration endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResponse {
    pub success: bool,
    pub id: String,
}
