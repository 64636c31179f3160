use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::MatchError;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    ///
    /// NaN and infinities are rejected.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Ordinal urgency of a donation or a recipient's need
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    /// Numeric level used for compatibility: low=1, medium=2, high=3
    pub fn level(self) -> u8 {
        match self {
            Urgency::Low => 1,
            Urgency::Medium => 2,
            Urgency::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Parse a label case-insensitively, attributing failures to `field`
    pub fn parse(label: &str, field: &str) -> Result<Self, MatchError> {
        match label.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(MatchError::UnknownUrgencyLevel {
                field: field.to_string(),
                value: label.to_string(),
            }),
        }
    }
}

impl FromStr for Urgency {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Urgency::parse(s, "urgency")
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a posted donation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Available,
    Pending,
    Accepted,
    Declined,
}

/// A donation offered by a donor, as seen by the matcher
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub urgency: Urgency,
    pub location: Option<Coordinate>,
    pub status: DonationStatus,
}

impl Donation {
    pub fn new(id: impl Into<String>, category: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: Some(category.into()),
            urgency,
            location: None,
            status: DonationStatus::Available,
        }
    }

    pub fn with_location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }
}

/// A recipient eligible to receive a donation
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: Option<String>,
    pub location: Coordinate,
    pub needs: Vec<String>,
    pub urgency: Urgency,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        location: Coordinate,
        needs: Vec<String>,
        urgency: Urgency,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            location,
            needs,
            urgency,
        }
    }
}

/// Qualitative band of a total match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Strong,
    Good,
    Fair,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            MatchTier::Strong
        } else if score > 60 {
            MatchTier::Good
        } else {
            MatchTier::Fair
        }
    }
}

/// One scored (donation, candidate) pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: Uuid,
    pub donation_id: String,
    pub candidate_id: String,
    pub match_score: u8,
    /// None when no reference location was available
    pub distance_km: Option<f64>,
    pub distance_score: f64,
    pub category_match: f64,
    pub urgency_match: f64,
    pub tier: MatchTier,
    pub timestamp: DateTime<Utc>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance: f64,
    pub category: f64,
    pub urgency: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.distance + self.category + self.urgency
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 0.4,
            category: 0.4,
            urgency: 0.2,
        }
    }
}
