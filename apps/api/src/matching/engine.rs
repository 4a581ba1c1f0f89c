//! Match Scoring: weighted four-factor fit between a parsed CV and a parsed JD.
//!
//! `calculate_match_score` is a pure function: no I/O, no clock, no shared state.
//! Identical inputs always produce an identical `MatchResult`.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; `RuleBasedScorer` is the default.

use serde::{Deserialize, Serialize};

use crate::matching::factors::{
    education_match, experience_match, skill_match, soft_skill_match, to_score, FactorOutcome,
};
use crate::matching::profile::{ParsedCV, ParsedJD};
use crate::matching::red_flags::detect_red_flags;

pub const SKILLS_WEIGHT: u32 = 40;
pub const EXPERIENCE_WEIGHT: u32 = 30;
pub const EDUCATION_WEIGHT: u32 = 15;
pub const SOFT_SKILLS_WEIGHT: u32 = 15;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub score: u32,
    pub weight: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub score: u32,
    pub weight: u32,
    pub reasoning: String,
}

impl FactorBreakdown {
    fn weighted(outcome: FactorOutcome, weight: u32) -> Self {
        Self {
            score: outcome.score,
            weight,
            reasoning: outcome.reasoning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub skills: SkillsBreakdown,
    pub experience: FactorBreakdown,
    pub education: FactorBreakdown,
    pub soft_skills: FactorBreakdown,
}

impl Breakdown {
    pub fn total_weight(&self) -> u32 {
        self.skills.weight
            + self.experience.weight
            + self.education.weight
            + self.soft_skills.weight
    }
}

/// Full match report. Field names are consumed as-is by persistence and UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: u32, // 0 – 100
    pub breakdown: Breakdown,
    pub reasoning: String,
    pub red_flags: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scoring backend seam. Handlers only see this trait.
pub trait MatchScorer: Send + Sync {
    fn score(&self, cv: &ParsedCV, jd: &ParsedJD) -> MatchResult;

    /// Short label echoed to clients for transparency.
    fn backend(&self) -> &'static str;
}

/// Deterministic rule-based scorer.
pub struct RuleBasedScorer;

impl MatchScorer for RuleBasedScorer {
    fn score(&self, cv: &ParsedCV, jd: &ParsedJD) -> MatchResult {
        calculate_match_score(cv, jd)
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `cv` against `jd`.
///
/// overall = round(skills×0.40 + experience×0.30 + education×0.15 + soft×0.15)
pub fn calculate_match_score(cv: &ParsedCV, jd: &ParsedJD) -> MatchResult {
    let skills = skill_match(cv, jd);
    let experience = experience_match(cv, jd);
    let education = education_match(cv, jd);
    let soft_skills = soft_skill_match(cv, jd);

    let overall_score = to_score(
        skills.score as f64 * fraction(SKILLS_WEIGHT)
            + experience.score as f64 * fraction(EXPERIENCE_WEIGHT)
            + education.score as f64 * fraction(EDUCATION_WEIGHT)
            + soft_skills.score as f64 * fraction(SOFT_SKILLS_WEIGHT),
    );

    let red_flags = detect_red_flags(cv, jd);
    let reasoning = build_reasoning(
        overall_score,
        [
            skills.score,
            experience.score,
            education.score,
            soft_skills.score,
        ],
        &red_flags,
    );

    let breakdown = Breakdown {
        skills: SkillsBreakdown {
            score: skills.score,
            weight: SKILLS_WEIGHT,
            matched: skills.matched,
            missing: skills.missing,
        },
        experience: FactorBreakdown::weighted(experience, EXPERIENCE_WEIGHT),
        education: FactorBreakdown::weighted(education, EDUCATION_WEIGHT),
        soft_skills: FactorBreakdown::weighted(soft_skills, SOFT_SKILLS_WEIGHT),
    };
    debug_assert_eq!(breakdown.total_weight(), 100);

    MatchResult {
        overall_score,
        breakdown,
        reasoning,
        red_flags,
    }
}

fn fraction(weight_percent: u32) -> f64 {
    weight_percent as f64 / 100.0
}

/// One-line summary: overall, each factor, then flags.
fn build_reasoning(
    overall: u32,
    [skills, experience, education, soft]: [u32; 4],
    red_flags: &[String],
) -> String {
    let flags = if red_flags.is_empty() {
        "No red flags detected.".to_string()
    } else {
        format!("Red flags: {}.", red_flags.join("; "))
    };

    format!(
        "Overall match {overall}/100 (skills {skills}, experience {experience}, education {education}, soft skills {soft}). {flags}"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
