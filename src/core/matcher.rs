use chrono::Utc;
use uuid::Uuid;

use crate::core::{
    distance::DEFAULT_DISTANCE_DECAY_PER_KM,
    scoring::{calculate_match_score, ScoreBreakdown},
    validation::{validate_coordinate, MatchError},
};
use crate::models::{Candidate, Coordinate, Donation, MatchResult, MatchTier, ScoringWeights};

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Input validation (fail-fast for the whole batch)
/// 2. Distance estimation against the reference location
/// 3. Category and urgency compatibility scoring
/// 4. Weighted aggregation and ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    distance_decay_per_km: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            distance_decay_per_km: DEFAULT_DISTANCE_DECAY_PER_KM,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn with_distance_decay(mut self, decay_per_km: f64) -> Self {
        self.distance_decay_per_km = decay_per_km;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn distance_decay_per_km(&self) -> f64 {
        self.distance_decay_per_km
    }

    /// Score a single candidate against a donation
    pub fn score_candidate(
        &self,
        donation: &Donation,
        reference: Option<Coordinate>,
        candidate: &Candidate,
    ) -> Result<ScoreBreakdown, MatchError> {
        validate_inputs(donation, reference.as_ref(), std::slice::from_ref(candidate))?;

        Ok(calculate_match_score(
            donation,
            reference.as_ref(),
            candidate,
            &self.weights,
            self.distance_decay_per_km,
        ))
    }

    /// Rank candidates for a donation, best first
    ///
    /// # Arguments
    /// * `donation` - The donation being placed
    /// * `reference` - The acting party's location, if known
    /// * `candidates` - Recipients to consider
    ///
    /// # Returns
    /// One result per candidate sorted by score (descending), then by
    /// candidate id (ascending). Any invalid input fails the whole call.
    pub fn rank_matches(
        &self,
        donation: &Donation,
        reference: Option<Coordinate>,
        candidates: &[Candidate],
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate_inputs(donation, reference.as_ref(), candidates)?;

        let timestamp = Utc::now();

        let mut results: Vec<MatchResult> = candidates
            .iter()
            .map(|candidate| {
                let score = calculate_match_score(
                    donation,
                    reference.as_ref(),
                    candidate,
                    &self.weights,
                    self.distance_decay_per_km,
                );

                MatchResult {
                    id: Uuid::new_v4(),
                    donation_id: donation.id.clone(),
                    candidate_id: candidate.id.clone(),
                    match_score: score.total,
                    distance_km: score.distance_km,
                    distance_score: score.distance_score,
                    category_match: score.category_score,
                    urgency_match: score.urgency_score,
                    tier: MatchTier::from_score(score.total),
                    timestamp,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        tracing::trace!(
            "Ranked {} candidates for donation {}",
            results.len(),
            donation.id
        );

        Ok(results)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Rank candidates with the default weights and distance decay
pub fn rank_matches(
    donation: &Donation,
    reference: Option<Coordinate>,
    candidates: &[Candidate],
) -> Result<Vec<MatchResult>, MatchError> {
    Matcher::with_default_weights().rank_matches(donation, reference, candidates)
}

fn validate_inputs(
    donation: &Donation,
    reference: Option<&Coordinate>,
    candidates: &[Candidate],
) -> Result<(), MatchError> {
    if let Some(reference) = reference {
        validate_coordinate(reference, "referenceLocation")?;
    }
    if let Some(origin) = &donation.location {
        validate_coordinate(origin, "donation.location")?;
    }
    for (index, candidate) in candidates.iter().enumerate() {
        validate_coordinate(&candidate.location, &format!("candidates[{}].location", index))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Urgency;

    fn create_candidate(id: &str, lat: f64, lon: f64, needs: &[&str], urgency: Urgency) -> Candidate {
        Candidate::new(
            id,
            Coordinate::new(lat, lon),
            needs.iter().map(|s| s.to_string()).collect(),
            urgency,
        )
    }

    #[test]
    fn test_rank_matches_basic() {
        let matcher = Matcher::with_default_weights();
        let donation = Donation::new("d1", "Food", Urgency::High);

        let candidates = vec![
            create_candidate("B", 1.0, 0.0, &["Clothing"], Urgency::Low),
            create_candidate("A", 0.0, 0.0, &["Food"], Urgency::High),
        ];

        let result = matcher
            .rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates)
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].candidate_id, "A");
        assert_eq!(result[0].match_score, 100);
        assert_eq!(result[0].tier, MatchTier::Strong);
        assert_eq!(result[1].candidate_id, "B");
        assert_eq!(result[1].match_score, 7);
        assert!(result.iter().all(|m| m.donation_id == "d1"));
    }

    #[test]
    fn test_ties_broken_by_candidate_id() {
        let matcher = Matcher::with_default_weights();
        let donation = Donation::new("d1", "Food", Urgency::Medium);

        let candidates = vec![
            create_candidate("c", 0.0, 0.0, &["Food"], Urgency::Medium),
            create_candidate("a", 0.0, 0.0, &["Food"], Urgency::Medium),
            create_candidate("b", 0.0, 0.0, &["Food"], Urgency::Medium),
        ];

        let result = matcher
            .rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates)
            .unwrap();

        let ids: Vec<&str> = result.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_candidate_fails_whole_batch() {
        let matcher = Matcher::with_default_weights();
        let donation = Donation::new("d1", "Food", Urgency::Medium);

        let candidates = vec![
            create_candidate("a", 0.0, 0.0, &["Food"], Urgency::Medium),
            create_candidate("b", 0.0, 200.0, &["Food"], Urgency::Medium),
        ];

        let err = matcher
            .rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates)
            .unwrap_err();

        assert_eq!(err.field(), "candidates[1].location");
    }

    #[test]
    fn test_invalid_donation_origin_is_rejected() {
        let matcher = Matcher::with_default_weights();
        let donation =
            Donation::new("d1", "Food", Urgency::Medium).with_location(Coordinate::new(95.0, 0.0));
        let candidates = vec![create_candidate("a", 0.0, 0.0, &["Food"], Urgency::Medium)];

        let err = matcher
            .rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates)
            .unwrap_err();

        assert!(matches!(err, MatchError::InvalidCoordinate { .. }));
        assert_eq!(err.field(), "donation.location");
    }

    #[test]
    fn test_custom_distance_decay() {
        let matcher = Matcher::with_default_weights().with_distance_decay(1.0);
        let donation = Donation::new("d1", "Food", Urgency::Medium);
        let candidate = create_candidate("a", 0.0, 0.5, &[], Urgency::Medium);

        let score = matcher
            .score_candidate(&donation, Some(Coordinate::new(0.0, 0.0)), &candidate)
            .unwrap();

        // ~55.6 km away: 0 with the default decay, ~44.4 with decay 1.0
        assert!(score.distance_score > 40.0 && score.distance_score < 50.0);
    }
}
