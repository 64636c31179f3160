use thiserror::Error;

use crate::models::Coordinate;

/// Errors raised for malformed matching inputs
///
/// Every variant names the offending field so the presentation layer can
/// report it alongside "unable to compute matches".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("invalid coordinate for {field}: ({latitude}, {longitude}) is out of range")]
    InvalidCoordinate {
        field: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("unknown urgency level for {field}: {value:?} (expected low, medium or high)")]
    UnknownUrgencyLevel { field: String, value: String },
}

impl MatchError {
    pub fn field(&self) -> &str {
        match self {
            MatchError::InvalidCoordinate { field, .. } => field,
            MatchError::UnknownUrgencyLevel { field, .. } => field,
        }
    }

    /// Qualify the field with the path of the enclosing record,
    /// e.g. `urgency` within `candidates[2]` becomes `candidates[2].urgency`
    pub fn within(mut self, parent: &str) -> Self {
        let field = match &mut self {
            MatchError::InvalidCoordinate { field, .. } => field,
            MatchError::UnknownUrgencyLevel { field, .. } => field,
        };
        *field = format!("{}.{}", parent, field);
        self
    }
}

/// Reject coordinates outside the valid latitude/longitude range
pub fn validate_coordinate(coordinate: &Coordinate, field: &str) -> Result<(), MatchError> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(MatchError::InvalidCoordinate {
            field: field.to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}
