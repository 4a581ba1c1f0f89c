//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::MatchResult;
use crate::matching::profile::{ParsedCV, ParsedJD};
use crate::matching::routing::{resolve_threshold, route_application, ApplicationStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub cv: ParsedCV,
    pub jd: ParsedJD,
    #[serde(default)]
    pub threshold: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub match_result: MatchResult,
    pub status: ApplicationStatus,
    pub threshold: u32,
    pub scorer_backend: String,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RankCandidate {
    pub application_id: Uuid,
    pub cv: ParsedCV,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub jd: ParsedJD,
    #[serde(default)]
    pub threshold: Option<u32>,
    pub candidates: Vec<RankCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankedApplication {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    pub match_result: MatchResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub threshold: u32,
    pub scorer_backend: String,
    pub results: Vec<RankedApplication>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match/score
///
/// Scores one CV against one JD and reports the routing outcome for the threshold.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let threshold = resolve_threshold(request.threshold, state.config.match_threshold)?;

    let match_result = state.scorer.score(&request.cv, &request.jd);
    let status = route_application(match_result.overall_score, threshold);

    debug!(
        overall_score = match_result.overall_score,
        red_flags = match_result.red_flags.len(),
        threshold,
        "Scored application"
    );

    Ok(Json(ScoreResponse {
        match_result,
        status,
        threshold,
        scorer_backend: state.scorer.backend().to_string(),
        scored_at: Utc::now(),
    }))
}

/// POST /api/v1/match/rank
///
/// Scores every candidate against one JD. Results are ordered best first;
/// equal scores keep request order.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "candidates cannot be empty".to_string(),
        ));
    }
    let threshold = resolve_threshold(request.threshold, state.config.match_threshold)?;

    let mut results: Vec<RankedApplication> = request
        .candidates
        .into_iter()
        .map(|candidate| {
            let match_result = state.scorer.score(&candidate.cv, &request.jd);
            RankedApplication {
                application_id: candidate.application_id,
                status: route_application(match_result.overall_score, threshold),
                match_result,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.match_result
            .overall_score
            .cmp(&a.match_result.overall_score)
    });

    let matched = results
        .iter()
        .filter(|r| r.status == ApplicationStatus::Matched)
        .count();
    info!(
        "Ranked {} applications ({matched} matched at threshold {threshold})",
        results.len()
    );

    Ok(Json(RankResponse {
        threshold,
        scorer_backend: state.scorer.backend().to_string(),
        results,
    }))
}
