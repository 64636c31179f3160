use crate::core::distance::{distance_score, haversine_distance};
use crate::models::{Candidate, Coordinate, Donation, ScoringWeights, Urgency};

/// Points deducted per step of urgency difference
const URGENCY_STEP: f64 = 33.33;

/// Sub-scores and total for one (donation, candidate) pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub distance_km: Option<f64>,
    pub distance_score: f64,
    pub category_score: f64,
    pub urgency_score: f64,
    pub total: u8,
}

/// Calculate a match score (0-100) for a candidate
///
/// Scoring formula:
/// total = round(
///     distance_score * 0.4 +      # Closer = higher score
///     category_score * 0.4 +      # Candidate needs the category
///     urgency_score * 0.2         # Urgency levels agree
/// )
///
/// Without a reference location the distance score is 0 and the
/// remaining weights are not rescaled.
pub fn calculate_match_score(
    donation: &Donation,
    reference: Option<&Coordinate>,
    candidate: &Candidate,
    weights: &ScoringWeights,
    distance_decay_per_km: f64,
) -> ScoreBreakdown {
    let distance_km = reference.map(|origin| haversine_distance(origin, &candidate.location));
    let distance_score = distance_km
        .map(|km| distance_score(km, distance_decay_per_km))
        .unwrap_or(0.0);

    let category_score = category_score(donation.category.as_deref(), &candidate.needs);
    let urgency_score = urgency_score(donation.urgency, candidate.urgency);

    let weighted = distance_score * weights.distance
        + category_score * weights.category
        + urgency_score * weights.urgency;

    ScoreBreakdown {
        distance_km,
        distance_score,
        category_score,
        urgency_score,
        total: weighted.round().clamp(0.0, 100.0) as u8,
    }
}

/// Category score: 100 on exact membership in the candidate's needs, else 0
#[inline]
pub fn category_score(category: Option<&str>, needs: &[String]) -> f64 {
    match category {
        Some(category) if needs.iter().any(|need| need == category) => 100.0,
        _ => 0.0,
    }
}

/// Urgency score: 100 minus 33.33 per level of difference
///
/// Yields 100, 66.67 or 33.34.
#[inline]
pub fn urgency_score(donation: Urgency, candidate: Urgency) -> f64 {
    let diff = donation.level().abs_diff(candidate.level());
    100.0 - f64::from(diff) * URGENCY_STEP
}
