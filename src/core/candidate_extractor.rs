use chrono::{Datelike, Utc};
use uuid::Uuid;

use super::field_extractor::{self, CandidateFields};
use super::models::{CandidateProfile, EDUCATION_NOT_SPECIFIED, PHONE_PLACEHOLDER};
use super::skill_detector::SkillDetector;

/// Turns résumé text into a fully populated [`CandidateProfile`]. Every
/// heuristic is independent; a miss resolves to its documented default.
#[derive(Debug, Clone, Default)]
pub struct CandidateInfoExtractor {
    detector: SkillDetector,
    reference_year: Option<i32>,
}

impl CandidateInfoExtractor {
    pub fn new(detector: SkillDetector) -> Self {
        Self {
            detector,
            reference_year: None,
        }
    }

    /// Pins the year used for `<year> - present` ranges instead of the clock.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn detector(&self) -> &SkillDetector {
        &self.detector
    }

    pub fn extract_fields(&self, text: &str) -> CandidateFields {
        let reference_year = self.reference_year.unwrap_or_else(|| Utc::now().year());

        CandidateFields {
            name: field_extractor::extract_name(text),
            email: field_extractor::extract_email(text),
            phone: field_extractor::extract_phone(text),
            education: field_extractor::extract_education(text),
            experience_years: field_extractor::extract_experience_years(text, reference_year),
            skills: self.detector.detect(text),
        }
    }

    pub fn extract(&self, text: &str, fallback_label: &str) -> CandidateProfile {
        resolve_profile(self.extract_fields(text), fallback_label)
    }
}

pub fn resolve_profile(fields: CandidateFields, fallback_label: &str) -> CandidateProfile {
    CandidateProfile {
        name: fields
            .name
            .unwrap_or_else(|| format!("Candidate from {fallback_label}")),
        email: fields.email.unwrap_or_else(placeholder_email),
        phone: fields
            .phone
            .unwrap_or_else(|| PHONE_PLACEHOLDER.to_string()),
        education: fields
            .education
            .unwrap_or_else(|| EDUCATION_NOT_SPECIFIED.to_string()),
        skills: fields.skills,
        experience_years: fields.experience_years.unwrap_or(0),
    }
}

fn placeholder_email() -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "candidate{}.{}@example.com",
        Utc::now().timestamp_millis(),
        &nonce[..8]
    )
}
