//! Advisory red flags. They never change the score.

use crate::matching::factors::{format_years, missing_required_skills};
use crate::matching::profile::{ParsedCV, ParsedJD};

const SHORT_TENURE_MIN_COUNT: usize = 2;
const LOW_EXPERIENCE_RATIO: f64 = 0.5;

/// Runs every check and returns the triggered flags in a fixed order:
/// short tenures, missing skills, low experience, no education.
pub fn detect_red_flags(cv: &ParsedCV, jd: &ParsedJD) -> Vec<String> {
    [
        short_tenure_flag(cv),
        missing_skills_flag(cv, jd),
        low_experience_flag(cv, jd),
        no_education_flag(cv),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn short_tenure_flag(cv: &ParsedCV) -> Option<String> {
    let short = cv
        .experience
        .iter()
        .filter(|e| e.years > 0.0 && e.years < 1.0)
        .count();

    (short >= SHORT_TENURE_MIN_COUNT).then(|| {
        format!("Multiple short tenures detected: {short} positions lasted less than 1 year")
    })
}

fn missing_skills_flag(cv: &ParsedCV, jd: &ParsedJD) -> Option<String> {
    let missing = missing_required_skills(cv, jd);
    // strictly more than half
    (missing.len() * 2 > jd.required_skills.len())
        .then(|| format!("Missing key required skills: {}", missing.join(", ")))
}

fn low_experience_flag(cv: &ParsedCV, jd: &ParsedJD) -> Option<String> {
    let required = jd.required_years();
    let total = cv.total_years();

    (required > 0.0 && total < required * LOW_EXPERIENCE_RATIO).then(|| {
        format!(
            "Experience ({} years) is significantly below the requirement ({} years)",
            format_years(total),
            format_years(required)
        )
    })
}

fn no_education_flag(cv: &ParsedCV) -> Option<String> {
    cv.education
        .is_empty()
        .then(|| "No education information provided".to_string())
}
