//! Candidate and job profiles: the structured records handed to the engine by
//! the upstream CV and JD parsers.

use serde::{Deserialize, Deserializer, Serialize};

/// A single position from the candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    /// Display string only, e.g. "Jan 2020 – Mar 2022".
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_years")]
    pub years: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
}

/// Upstream parsers emit numbers and strings interchangeably.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts `3`, `"3.5"`, `null`. Anything unparseable counts as 0.
fn lenient_years<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(text)) => text.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

/// Accepts `"2018"`, `2018`, `null`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n.to_string(),
        Some(NumberOrText::Text(text)) => text,
        None => String::new(),
    })
}

/// Structured extraction of a candidate's resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCV {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub soft_indicators: Vec<String>,
}

impl ParsedCV {
    /// Sum of `years` across all positions, negative or NaN entries counted as 0.
    pub fn total_years(&self) -> f64 {
        self.experience.iter().map(|e| non_negative(e.years)).sum()
    }
}

/// Minimum education a job asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
    #[default]
    Any,
}

impl EducationLevel {
    /// Ordinal rank used for comparison. `Any` is 0 (no requirement).
    pub fn rank(self) -> u8 {
        match self {
            EducationLevel::HighSchool => 1,
            EducationLevel::Associate => 2,
            EducationLevel::Bachelor => 3,
            EducationLevel::Master => 4,
            EducationLevel::Phd => 5,
            EducationLevel::Any => 0,
        }
    }

    /// Lenient parse: case-insensitive, unknown values fall back to `Any`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high_school" => EducationLevel::HighSchool,
            "associate" => EducationLevel::Associate,
            "bachelor" => EducationLevel::Bachelor,
            "master" => EducationLevel::Master,
            "phd" => EducationLevel::Phd,
            _ => EducationLevel::Any,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Associate => "Associate",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::Phd => "PhD",
            EducationLevel::Any => "Any",
        }
    }
}

impl<'de> Deserialize<'de> for EducationLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(EducationLevel::parse_lenient)
            .unwrap_or_default())
    }
}

/// Structured extraction of a job posting's requirements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedJD {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    /// Minimum years required; 0 means unspecified.
    #[serde(default)]
    pub experience_years: f64,
    #[serde(default)]
    pub education_level: EducationLevel,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    /// Descriptive only, not used for scoring.
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
}

impl ParsedJD {
    pub fn required_years(&self) -> f64 {
        non_negative(self.experience_years)
    }
}

/// Clamps negative and NaN inputs to 0.
pub(crate) fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}
