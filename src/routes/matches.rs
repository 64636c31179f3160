use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{MatchError, Matcher};
use crate::models::{
    candidates_from_records, CandidateRecord, Coordinate, Donation, DonationRecord, ErrorResponse,
    FindMatchesRequest, HealthResponse, MatchesResponse, RankMatchesRequest, StoredResponse,
};
use crate::services::JsonStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/matches/find", web::post().to(find_matches))
        .route("/donations", web::post().to(add_donation))
        .route("/recipients", web::put().to(upsert_recipient));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank a caller-supplied candidate list
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "donation": {"id": "d1", "category": "Food", "urgency": "high"},
///   "referenceLocation": {"latitude": 0.0, "longitude": 0.0},
///   "candidates": [{"id": "A", "latitude": 0.0, "longitude": 0.0, "needs": ["Food"]}],
///   "limit": 20
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let limit = state.matching.effective_limit(req.limit);

    match run_ranking(&state.matcher, req.donation, req.reference_location, req.candidates, limit) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => unable_to_match(&e),
    }
}

/// Match a stored donation against all stored recipients
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "donationId": "string",
///   "referenceLocation": {"latitude": 0.0, "longitude": 0.0},
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let limit = state.matching.effective_limit(req.limit);

    let Some(donation) = state.store.find_available_donation(&req.donation_id).await else {
        tracing::info!("Donation {} is not available for matching", req.donation_id);
        return HttpResponse::Ok().json(MatchesResponse {
            matches: vec![],
            total_candidates: 0,
        });
    };

    let recipients = state.store.recipients().await;
    tracing::debug!("Found {} recipients for donation {}", recipients.len(), req.donation_id);

    match run_ranking(&state.matcher, donation, req.reference_location, recipients, limit) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => unable_to_match(&e),
    }
}

/// Register or replace a donation
///
/// POST /api/v1/donations
async fn add_donation(
    state: web::Data<AppState>,
    req: web::Json<DonationRecord>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let record = req.into_inner();
    // Reject labels the matcher would refuse later
    if let Err(e) = Donation::try_from(record.clone()) {
        return unable_to_match(&e.within("donation"));
    }

    let id = record.id.clone();
    match state.store.add_donation(record).await {
        Ok(()) => {
            tracing::info!("Stored donation {}", id);
            HttpResponse::Ok().json(StoredResponse { success: true, id })
        }
        Err(e) => store_failed("Failed to store donation", &e),
    }
}

/// Register or replace a recipient
///
/// PUT /api/v1/recipients
async fn upsert_recipient(
    state: web::Data<AppState>,
    req: web::Json<CandidateRecord>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let record = req.into_inner();
    if let Err(e) = candidates_from_records(vec![record.clone()]) {
        return unable_to_match(&e);
    }

    let id = record.id.clone();
    match state.store.upsert_recipient(record).await {
        Ok(()) => {
            tracing::info!("Stored recipient {}", id);
            HttpResponse::Ok().json(StoredResponse { success: true, id })
        }
        Err(e) => store_failed("Failed to store recipient", &e),
    }
}

/// Convert boundary records, rank, and truncate
///
/// The donation's origin stands in for a missing reference location.
fn run_ranking(
    matcher: &Matcher,
    donation: DonationRecord,
    reference: Option<Coordinate>,
    candidates: Vec<CandidateRecord>,
    limit: usize,
) -> Result<MatchesResponse, MatchError> {
    let donation = Donation::try_from(donation).map_err(|e| e.within("donation"))?;
    let candidates = candidates_from_records(candidates)?;
    let reference = reference.or(donation.location);

    if reference.is_none() {
        tracing::warn!("No reference location for donation {}, distance scores are 0", donation.id);
    }

    let mut matches = matcher.rank_matches(&donation, reference, &candidates)?;
    let total_candidates = matches.len();
    matches.truncate(limit);

    tracing::info!(
        "Returning {} matches for donation {} (from {} candidates)",
        matches.len(),
        donation.id,
        total_candidates
    );

    Ok(MatchesResponse {
        matches,
        total_candidates,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        field: None,
        status_code: 400,
    })
}

fn unable_to_match(err: &MatchError) -> HttpResponse {
    tracing::info!("Unable to compute matches: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse::from(err))
}

fn store_failed(context: &str, err: &crate::services::StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        field: None,
        status_code: 500,
    })
}
