use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::validation::{validate_coordinate, MatchError};
use crate::models::domain::{Candidate, Coordinate, Donation, DonationStatus, Urgency};

/// Donation as stored or submitted, before defaults are applied
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub status: Option<DonationStatus>,
}

impl TryFrom<DonationRecord> for Donation {
    type Error = MatchError;

    fn try_from(record: DonationRecord) -> Result<Self, Self::Error> {
        let urgency = match record.urgency.as_deref() {
            Some(label) => Urgency::parse(label, "urgency")?,
            None => Urgency::default(),
        };
        if let Some(location) = &record.location {
            validate_coordinate(location, "location")?;
        }

        Ok(Donation {
            id: record.id,
            name: record.name,
            category: record.category.filter(|c| !c.trim().is_empty()),
            urgency,
            location: record.location,
            status: record.status.unwrap_or_default(),
        })
    }
}

/// Recipient as stored or submitted, with a flat latitude/longitude pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = MatchError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        let urgency = match record.urgency.as_deref() {
            Some(label) => Urgency::parse(label, "urgency")?,
            None => Urgency::Medium,
        };
        let location = Coordinate::new(record.latitude, record.longitude);
        validate_coordinate(&location, "location")?;

        Ok(Candidate {
            id: record.id,
            name: record.name,
            location,
            needs: record.needs,
            urgency,
        })
    }
}

/// Convert a batch of records, stopping at the first invalid one
pub fn candidates_from_records(records: Vec<CandidateRecord>) -> Result<Vec<Candidate>, MatchError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Candidate::try_from(record).map_err(|e| e.within(&format!("candidates[{}]", index)))
        })
        .collect()
}

/// Request to rank a supplied candidate list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RankMatchesRequest {
    #[validate(nested)]
    pub donation: DonationRecord,
    #[serde(default)]
    pub reference_location: Option<Coordinate>,
    #[serde(default)]
    #[validate(nested)]
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to match a stored donation against stored recipients
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "donation_id")]
    pub donation_id: String,
    #[serde(default)]
    pub reference_location: Option<Coordinate>,
    #[serde(default)]
    pub limit: Option<u16>,
}
