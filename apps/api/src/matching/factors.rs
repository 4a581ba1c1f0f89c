//! The four scoring factors. Each one is a pure function over the two profiles
//! and returns a 0–100 score plus its evidence; weighting happens in the engine.

use crate::matching::profile::{EducationLevel, ParsedCV, ParsedJD};

const NO_EXPERIENCE_REQUIREMENT_SCORE: u32 = 80;
const NO_EDUCATION_REQUIREMENT_SCORE: u32 = 80;
const NO_EDUCATION_FOUND_SCORE: u32 = 30;
const NO_SOFT_SKILLS_REQUIRED_SCORE: u32 = 75;

const REQUIRED_SKILLS_SHARE: f64 = 0.7;
const PREFERRED_SKILLS_SHARE: f64 = 0.3;

/// Experience ratio breakpoints: (minimum ratio, score, label). First hit wins.
const EXPERIENCE_BANDS: &[(f64, u32, &str)] = &[
    (1.5, 95, "exceeds requirement"),
    (1.0, 85, "meets requirement"),
    (0.7, 65, "slightly below requirement"),
    (0.5, 45, "below requirement"),
];
const EXPERIENCE_FLOOR: (u32, &str) = (25, "significantly below requirement");

/// Degree keywords in priority order. First group with a hit decides the rank.
const DEGREE_KEYWORDS: &[(EducationLevel, &[&str])] = &[
    (EducationLevel::Phd, &["phd", "doctorate"]),
    (EducationLevel::Master, &["master", "m.s", "mba"]),
    (EducationLevel::Bachelor, &["bachelor", "b.s", "b.a", "b.tech"]),
    (EducationLevel::Associate, &["associate"]),
];

/// Outcome of the skill factor.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub score: u32,
    /// Matched required then matched preferred skills, JD casing.
    pub matched: Vec<String>,
    /// Required skills with no CV counterpart, JD casing.
    pub missing: Vec<String>,
}

/// Outcome of a factor that explains itself with a sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorOutcome {
    pub score: u32,
    pub reasoning: String,
}

/// Rounds half-up and clamps into the 0–100 score range.
pub(crate) fn to_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Formats a year count to two decimals without trailing zeros: `5`, `2.5`, `0.96`.
pub(crate) fn format_years(years: f64) -> String {
    let formatted = format!("{years:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn normalized_cv_skills(cv: &ParsedCV) -> Vec<String> {
    cv.skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Loose containment in either direction, so "React" and "React.js" match.
fn has_skill(cv_skills: &[String], jd_skill: &str) -> bool {
    let jd_skill = jd_skill.to_lowercase();
    cv_skills
        .iter()
        .any(|cv_skill| cv_skill.contains(&jd_skill) || jd_skill.contains(cv_skill.as_str()))
}

/// Required skills the CV does not cover, JD casing. Shared with red-flag detection.
pub fn missing_required_skills(cv: &ParsedCV, jd: &ParsedJD) -> Vec<String> {
    let cv_skills = normalized_cv_skills(cv);
    jd.required_skills
        .iter()
        .filter(|s| !has_skill(&cv_skills, s))
        .cloned()
        .collect()
}

fn coverage_percent(matched: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        matched as f64 / total as f64 * 100.0
    }
}

pub fn skill_match(cv: &ParsedCV, jd: &ParsedJD) -> SkillMatch {
    let cv_skills = normalized_cv_skills(cv);

    let (matched_required, missing): (Vec<String>, Vec<String>) = jd
        .required_skills
        .iter()
        .cloned()
        .partition(|s| has_skill(&cv_skills, s));
    let matched_preferred: Vec<String> = jd
        .preferred_skills
        .iter()
        .filter(|s| has_skill(&cv_skills, s))
        .cloned()
        .collect();

    let required_score = coverage_percent(matched_required.len(), jd.required_skills.len());
    let preferred_score = coverage_percent(matched_preferred.len(), jd.preferred_skills.len());
    let score = to_score(
        required_score * REQUIRED_SKILLS_SHARE + preferred_score * PREFERRED_SKILLS_SHARE,
    );

    let mut matched = matched_required;
    matched.extend(matched_preferred);

    SkillMatch {
        score,
        matched,
        missing,
    }
}

pub fn experience_match(cv: &ParsedCV, jd: &ParsedJD) -> FactorOutcome {
    let total_years = cv.total_years();
    let required_years = jd.required_years();

    if required_years == 0.0 {
        return FactorOutcome {
            score: NO_EXPERIENCE_REQUIREMENT_SCORE,
            reasoning: format!(
                "No experience requirement stated; candidate has {} years",
                format_years(total_years)
            ),
        };
    }

    let ratio = total_years / required_years;
    let (score, label) = EXPERIENCE_BANDS
        .iter()
        .find(|(min_ratio, _, _)| ratio >= *min_ratio)
        .map(|&(_, score, label)| (score, label))
        .unwrap_or(EXPERIENCE_FLOOR);

    FactorOutcome {
        score,
        reasoning: format!(
            "{} years of experience vs {} years required ({label})",
            format_years(total_years),
            format_years(required_years)
        ),
    }
}

/// Highest level implied by the candidate's degree strings. Defaults to high school.
pub fn candidate_education_level(cv: &ParsedCV) -> EducationLevel {
    let degrees = cv
        .education
        .iter()
        .map(|e| e.degree.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    DEGREE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| degrees.contains(k)))
        .map(|(level, _)| *level)
        .unwrap_or(EducationLevel::HighSchool)
}

pub fn education_match(cv: &ParsedCV, jd: &ParsedJD) -> FactorOutcome {
    let required = jd.education_level;
    if required.rank() == 0 {
        return FactorOutcome {
            score: NO_EDUCATION_REQUIREMENT_SCORE,
            reasoning: "No specific education requirement".to_string(),
        };
    }

    if cv.education.is_empty() {
        return FactorOutcome {
            score: NO_EDUCATION_FOUND_SCORE,
            reasoning: "No education information found".to_string(),
        };
    }

    let candidate = candidate_education_level(cv);
    let (score, verdict) = if candidate.rank() >= required.rank() {
        (90, "meets")
    } else if candidate.rank() + 1 == required.rank() {
        (60, "is one level below")
    } else {
        (35, "is well below")
    };

    FactorOutcome {
        score,
        reasoning: format!(
            "Candidate education ({}) {verdict} the requirement ({})",
            candidate.label(),
            required.label()
        ),
    }
}

pub fn soft_skill_match(cv: &ParsedCV, jd: &ParsedJD) -> FactorOutcome {
    if jd.soft_skills.is_empty() {
        return FactorOutcome {
            score: NO_SOFT_SKILLS_REQUIRED_SCORE,
            reasoning: "No specific soft skills required".to_string(),
        };
    }

    let corpus = cv
        .soft_indicators
        .iter()
        .chain(cv.skills.iter())
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let matched: Vec<&str> = jd
        .soft_skills
        .iter()
        .filter(|s| corpus.contains(&s.to_lowercase()))
        .map(String::as_str)
        .collect();

    let score = to_score(matched.len() as f64 / jd.soft_skills.len() as f64 * 100.0);
    let listed = if matched.is_empty() {
        "none".to_string()
    } else {
        matched.join(", ")
    };

    FactorOutcome {
        score,
        reasoning: format!(
            "Matched {}/{} soft skills: {listed}",
            matched.len(),
            jd.soft_skills.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::{EducationEntry, ExperienceEntry};

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn cv_with_skills(list: &[&str]) -> ParsedCV {
        ParsedCV {
            skills: skills(list),
            ..Default::default()
        }
    }

    fn cv_with_years(years: &[f64]) -> ParsedCV {
        ParsedCV {
            experience: years
                .iter()
                .map(|&years| ExperienceEntry {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    duration: String::new(),
                    years,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn cv_with_degrees(degrees: &[&str]) -> ParsedCV {
        ParsedCV {
            education: degrees
                .iter()
                .map(|d| EducationEntry {
                    degree: d.to_string(),
                    institution: "State University".to_string(),
                    year: "2015".to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn jd_requiring_years(years: f64) -> ParsedJD {
        ParsedJD {
            experience_years: years,
            ..Default::default()
        }
    }

    fn jd_requiring_level(level: EducationLevel) -> ParsedJD {
        ParsedJD {
            education_level: level,
            ..Default::default()
        }
    }

    #[test]
    fn test_to_score_rounds_half_up_and_clamps() {
        assert_eq!(to_score(47.5), 48);
        assert_eq!(to_score(64.4), 64);
        assert_eq!(to_score(130.0), 100);
        assert_eq!(to_score(-3.0), 0);
        assert_eq!(to_score(f64::NAN), 0);
    }

    #[test]
    fn test_format_years_drops_float_noise() {
        assert_eq!(format_years(5.0), "5");
        assert_eq!(format_years(2.5), "2.5");
        assert_eq!(format_years(0.1 + 0.2), "0.3");
        assert_eq!(format_years(0.96), "0.96");
        assert_eq!(format_years(10.0), "10");
    }

    #[test]
    fn test_experience_reasoning_keeps_close_numbers_distinct() {
        let result = experience_match(&cv_with_years(&[1.75]), &jd_requiring_years(1.8));
        assert_eq!(result.score, 65);
        assert_eq!(
            result.reasoning,
            "1.75 years of experience vs 1.8 years required (slightly below requirement)"
        );

        let result = experience_match(&cv_with_years(&[0.04]), &jd_requiring_years(0.25));
        assert!(result.reasoning.starts_with("0.04 years"), "{}", result.reasoning);
        assert!(result.reasoning.contains("vs 0.25 years"), "{}", result.reasoning);
    }

    #[test]
    fn test_skill_match_no_skills_required_scores_100() {
        let result = skill_match(&cv_with_skills(&["Rust"]), &ParsedJD::default());
        assert_eq!(result.score, 100);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_skill_match_is_case_insensitive_and_bidirectional() {
        let jd = ParsedJD {
            required_skills: skills(&["React", "postgresql", "Node"]),
            ..Default::default()
        };
        let cv = cv_with_skills(&["react.js", "PostgreSQL", "Node.js Streams"]);
        let result = skill_match(&cv, &jd);
        assert_eq!(result.score, 100);
        assert_eq!(result.matched, skills(&["React", "postgresql", "Node"]));
    }

    #[test]
    fn test_skill_match_keeps_java_javascript_overlap() {
        let jd = ParsedJD {
            required_skills: skills(&["Java"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&["JavaScript"]), &jd);
        assert_eq!(result.matched, skills(&["Java"]));
    }

    #[test]
    fn test_skill_match_half_required_rounds_to_65() {
        // 50 * 0.7 = 35 required component, plus 100 * 0.3 from no preferred skills
        let jd = ParsedJD {
            required_skills: skills(&["Rust", "Kafka"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&["Rust"]), &jd);
        assert_eq!(result.score, 65);
        assert_eq!(result.missing, skills(&["Kafka"]));
    }

    #[test]
    fn test_skill_match_quarter_required_rounds_half_up() {
        // 25 * 0.7 + 30 = 47.5 -> 48
        let jd = ParsedJD {
            required_skills: skills(&["Rust", "Kafka", "Terraform", "gRPC"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&["rust"]), &jd);
        assert_eq!(result.score, 48);
        assert_eq!(result.missing, skills(&["Kafka", "Terraform", "gRPC"]));
    }

    #[test]
    fn test_skill_match_lists_required_then_preferred() {
        let jd = ParsedJD {
            required_skills: skills(&["Python"]),
            preferred_skills: skills(&["Docker", "Airflow"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&["docker", "python"]), &jd);
        assert_eq!(result.matched, skills(&["Python", "Docker"]));
        // 100 * 0.7 + 50 * 0.3 = 85
        assert_eq!(result.score, 85);
    }

    #[test]
    fn test_blank_cv_skill_is_a_substring_of_every_jd_skill() {
        let jd = ParsedJD {
            required_skills: skills(&["Go", "Rust"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&[""]), &jd);
        assert_eq!(result.matched, skills(&["Go", "Rust"]));
        assert!(result.missing.is_empty());
        assert!(missing_required_skills(&cv_with_skills(&[""]), &jd).is_empty());
    }

    #[test]
    fn test_blank_jd_skill_matches_any_cv_skill() {
        let jd = ParsedJD {
            required_skills: skills(&["", "Go"]),
            ..Default::default()
        };
        let result = skill_match(&cv_with_skills(&["Rust"]), &jd);
        assert_eq!(result.matched, skills(&[""]));
        assert_eq!(result.missing, skills(&["Go"]));
    }

    #[test]
    fn test_experience_without_requirement_scores_80() {
        let result = experience_match(&cv_with_years(&[10.0]), &jd_requiring_years(0.0));
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_experience_bands() {
        let cases = [
            (6.0, 95),
            (4.0, 85),
            (2.8, 65),
            (2.0, 45),
            (1.0, 25),
            (0.0, 25),
        ];
        for (years, expected) in cases {
            let result = experience_match(&cv_with_years(&[years]), &jd_requiring_years(4.0));
            assert_eq!(result.score, expected, "{years} years vs 4 required");
        }
    }

    #[test]
    fn test_experience_reasoning_mentions_both_numbers() {
        let result = experience_match(&cv_with_years(&[1.5, 1.0]), &jd_requiring_years(5.0));
        assert!(result.reasoning.contains("2.5"), "{}", result.reasoning);
        assert!(
            result.reasoning.contains("vs 5 years required"),
            "{}",
            result.reasoning
        );
    }

    #[test]
    fn test_experience_ignores_negative_years() {
        let result = experience_match(&cv_with_years(&[-10.0, 3.0]), &jd_requiring_years(2.0));
        assert_eq!(result.score, 95);
    }

    #[test]
    fn test_education_any_scores_80() {
        let result = education_match(&cv_with_degrees(&[]), &jd_requiring_level(EducationLevel::Any));
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_education_missing_scores_30() {
        let result = education_match(
            &cv_with_degrees(&[]),
            &jd_requiring_level(EducationLevel::Bachelor),
        );
        assert_eq!(result.score, 30);
        assert_eq!(result.reasoning, "No education information found");
    }

    #[test]
    fn test_candidate_level_keyword_priority() {
        assert_eq!(
            candidate_education_level(&cv_with_degrees(&["PhD in CS"])),
            EducationLevel::Phd
        );
        assert_eq!(
            candidate_education_level(&cv_with_degrees(&["B.S. Physics", "MBA"])),
            EducationLevel::Master
        );
        assert_eq!(
            candidate_education_level(&cv_with_degrees(&["B.Tech Mechanical"])),
            EducationLevel::Bachelor
        );
        assert_eq!(
            candidate_education_level(&cv_with_degrees(&["Associate of Arts"])),
            EducationLevel::Associate
        );
        assert_eq!(
            candidate_education_level(&cv_with_degrees(&["Coding Bootcamp"])),
            EducationLevel::HighSchool
        );
    }

    #[test]
    fn test_education_outcomes_by_rank_gap() {
        let jd = jd_requiring_level(EducationLevel::Master);
        assert_eq!(education_match(&cv_with_degrees(&["Doctorate"]), &jd).score, 90);
        assert_eq!(education_match(&cv_with_degrees(&["Master of Science"]), &jd).score, 90);
        assert_eq!(education_match(&cv_with_degrees(&["Bachelor of Arts"]), &jd).score, 60);
        assert_eq!(education_match(&cv_with_degrees(&["Associate degree"]), &jd).score, 35);
    }

    #[test]
    fn test_soft_skills_none_required_scores_75() {
        let result = soft_skill_match(&ParsedCV::default(), &ParsedJD::default());
        assert_eq!(result.score, 75);
    }

    #[test]
    fn test_soft_skills_search_indicators_and_skills() {
        let cv = ParsedCV {
            skills: skills(&["Public Speaking"]),
            soft_indicators: skills(&["Led cross-team Leadership initiatives"]),
            ..Default::default()
        };
        let jd = ParsedJD {
            soft_skills: skills(&["leadership", "public speaking", "empathy"]),
            ..Default::default()
        };
        let result = soft_skill_match(&cv, &jd);
        // 2/3 -> 66.67 -> 67
        assert_eq!(result.score, 67);
        assert!(result.reasoning.contains("leadership, public speaking"));
    }

    #[test]
    fn test_soft_skills_reasoning_says_none() {
        let jd = ParsedJD {
            soft_skills: skills(&["teamwork"]),
            ..Default::default()
        };
        let result = soft_skill_match(&ParsedCV::default(), &jd);
        assert_eq!(result.score, 0);
        assert!(result.reasoning.ends_with("none"));
    }
}
