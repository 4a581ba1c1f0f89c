//! Threshold routing: the caller-side policy that turns a score into a
//! pipeline outcome. The engine never sees the threshold.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_MATCH_THRESHOLD: u32 = 75;
pub const MAX_MATCH_THRESHOLD: u32 = 100;

/// Pipeline status an application moves to after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Matched,
    Rejected,
}

/// `Matched` when the score reaches the threshold, `Rejected` otherwise.
pub fn route_application(overall_score: u32, threshold: u32) -> ApplicationStatus {
    if overall_score >= threshold {
        ApplicationStatus::Matched
    } else {
        ApplicationStatus::Rejected
    }
}

/// Picks the request threshold, falling back to the configured default.
pub fn resolve_threshold(requested: Option<u32>, default: u32) -> Result<u32, AppError> {
    let threshold = requested.unwrap_or(default);
    if threshold > MAX_MATCH_THRESHOLD {
        return Err(AppError::Validation(format!(
            "threshold must be between 0 and {MAX_MATCH_THRESHOLD}, got {threshold}"
        )));
    }
    Ok(threshold)
}
