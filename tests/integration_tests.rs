// Integration tests for Donation Matcher

use donation_matcher::core::{rank_matches, MatchError, Matcher};
use donation_matcher::models::{
    candidates_from_records, Candidate, CandidateRecord, Coordinate, Donation, MatchTier,
    ScoringWeights, Urgency,
};
use donation_matcher::services::JsonStore;

fn create_candidate(id: &str, lat: f64, lon: f64, needs: &[&str], urgency: Urgency) -> Candidate {
    Candidate::new(
        id,
        Coordinate::new(lat, lon),
        needs.iter().map(|s| s.to_string()).collect(),
        urgency,
    )
}

fn food_donation() -> Donation {
    Donation::new("donation-1", "Food", Urgency::High)
}

#[test]
fn test_perfect_match_scores_100() {
    let candidates = vec![create_candidate("A", 0.0, 0.0, &["Food"], Urgency::High)];

    let result = rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].distance_km, Some(0.0));
    assert_eq!(result[0].distance_score, 100.0);
    assert_eq!(result[0].category_match, 100.0);
    assert_eq!(result[0].urgency_match, 100.0);
    assert_eq!(result[0].match_score, 100);
}

#[test]
fn test_distant_mismatch_scores_7() {
    let candidates = vec![create_candidate("B", 1.0, 0.0, &["Clothing"], Urgency::Low)];

    let result = rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();

    let m = &result[0];
    assert!((m.distance_km.unwrap() - 111.19).abs() < 0.1);
    assert_eq!(m.distance_score, 0.0);
    assert_eq!(m.category_match, 0.0);
    assert!((m.urgency_match - 33.34).abs() < 1e-9);
    assert_eq!(m.match_score, 7);
    assert_eq!(m.tier, MatchTier::Fair);
}

#[test]
fn test_ranking_best_first() {
    let candidates = vec![
        create_candidate("B", 1.0, 0.0, &["Clothing"], Urgency::Low),
        create_candidate("A", 0.0, 0.0, &["Food"], Urgency::High),
    ];

    let result = rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();

    let ranked: Vec<(&str, u8)> = result
        .iter()
        .map(|m| (m.candidate_id.as_str(), m.match_score))
        .collect();
    assert_eq!(ranked, vec![("A", 100), ("B", 7)]);
}

#[test]
fn test_medium_urgency_pair_scores_full() {
    let donation = Donation::new("d", "Food", Urgency::Medium);
    let candidates = vec![create_candidate("A", 0.0, 0.0, &[], Urgency::Medium)];

    let result = rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();
    assert_eq!(result[0].urgency_match, 100.0);
}

#[test]
fn test_invalid_reference_location() {
    let candidates = vec![create_candidate("A", 0.0, 0.0, &["Food"], Urgency::High)];

    let err = rank_matches(&food_donation(), Some(Coordinate::new(95.0, 0.0)), &candidates).unwrap_err();

    assert!(matches!(err, MatchError::InvalidCoordinate { .. }));
    assert_eq!(err.field(), "referenceLocation");
}

#[test]
fn test_unknown_urgency_fails_batch() {
    let records = vec![CandidateRecord {
        id: "A".to_string(),
        name: None,
        latitude: 0.0,
        longitude: 0.0,
        needs: vec!["Food".to_string()],
        urgency: Some("critical".to_string()),
    }];

    let err = candidates_from_records(records).unwrap_err();
    assert!(matches!(err, MatchError::UnknownUrgencyLevel { .. }));
    assert_eq!(err.field(), "candidates[0].urgency");
}

#[test]
fn test_empty_candidates() {
    let result = rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &[]).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_missing_reference_location_scores_distance_zero() {
    let candidates = vec![
        create_candidate("near", 0.0, 0.0, &["Food"], Urgency::High),
        create_candidate("far", 60.0, 60.0, &["Food"], Urgency::High),
    ];

    let result = rank_matches(&food_donation(), None, &candidates).unwrap();

    // Distance is ignored entirely, so both tie at 60 and sort by id
    let ranked: Vec<(&str, u8)> = result
        .iter()
        .map(|m| (m.candidate_id.as_str(), m.match_score))
        .collect();
    assert_eq!(ranked, vec![("far", 60), ("near", 60)]);
    assert!(result.iter().all(|m| m.distance_km.is_none() && m.distance_score == 0.0));
}

#[test]
fn test_missing_category_scores_zero() {
    let mut donation = food_donation();
    donation.category = None;
    let candidates = vec![create_candidate("A", 0.0, 0.0, &["Food"], Urgency::High)];

    let result = rank_matches(&donation, Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();
    assert_eq!(result[0].category_match, 0.0);
    assert_eq!(result[0].match_score, 60);
}

#[test]
fn test_scores_bounded_and_sorted() {
    let reference = Coordinate::new(40.7128, -74.0060);
    let needs_pool = ["Food", "Clothing", "Furniture"];

    let candidates: Vec<Candidate> = (0..60)
        .map(|i| {
            let urgency = [Urgency::Low, Urgency::Medium, Urgency::High][i % 3];
            create_candidate(
                &format!("c{:02}", i),
                40.7128 + (i as f64 * 0.01),
                -74.0060 + ((i % 7) as f64 * 0.02),
                &needs_pool[..(i % 4).min(3)],
                urgency,
            )
        })
        .collect();

    let result = rank_matches(&food_donation(), Some(reference), &candidates).unwrap();
    assert_eq!(result.len(), candidates.len());

    for m in &result {
        assert!(m.match_score <= 100);
        assert!(m.category_match == 0.0 || m.category_match == 100.0);
    }

    for pair in result.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.match_score > b.match_score
                || (a.match_score == b.match_score && a.candidate_id < b.candidate_id),
            "{} ({}) before {} ({})",
            a.candidate_id,
            a.match_score,
            b.candidate_id,
            b.match_score
        );
    }
}

#[test]
fn test_custom_weights() {
    let matcher = Matcher::new(ScoringWeights {
        distance: 0.0,
        category: 0.0,
        urgency: 1.0,
    });
    let candidates = vec![
        create_candidate("A", 0.0, 0.0, &["Food"], Urgency::Low),
        create_candidate("B", 10.0, 10.0, &[], Urgency::High),
    ];

    let result = matcher
        .rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &candidates)
        .unwrap();

    assert_eq!(result[0].candidate_id, "B");
    assert_eq!(result[0].match_score, 100);
    assert_eq!(result[1].match_score, 33);
}

#[test]
fn test_store_round_trip_feeds_matcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    tokio_test::block_on(async {
        let store = JsonStore::open(&path).await.unwrap();
        store
            .upsert_recipient(CandidateRecord {
                id: "pantry".to_string(),
                name: Some("Food Pantry".to_string()),
                latitude: 0.0,
                longitude: 0.0,
                needs: vec!["Food".to_string()],
                urgency: None,
            })
            .await
            .unwrap();

        // Re-open from disk
        let reopened = JsonStore::open(&path).await.unwrap();
        let candidates = candidates_from_records(reopened.recipients().await).unwrap();

        let result = rank_matches(&food_donation(), Some(Coordinate::new(0.0, 0.0)), &candidates).unwrap();
        assert_eq!(result[0].candidate_id, "pantry");
        // Missing urgency defaults to medium: 40 + 40 + 66.67 * 0.2
        assert_eq!(result[0].match_score, 93);
    });
}
