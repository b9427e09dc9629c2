use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const EDUCATION_NOT_SPECIFIED: &str = "Education not specified";
pub const PHONE_PLACEHOLDER: &str = "+1 (555) 000-0000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
}

impl JobRequirement {
    pub fn new<R, P>(required: R, preferred: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            required_skills: required.into_iter().map(Into::into).collect(),
            preferred_skills: preferred.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub source_file: String,
    pub document_kind: DocumentKind,
    pub profile: CandidateProfile,
    pub phone_e164: Option<String>,
    pub confidence: f64,
    pub fingerprint: String,
    pub text_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTemplate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub requirements: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_experience: u32,
    #[serde(rename = "type")]
    pub employment_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub requirement: JobRequirement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: String,
    pub job_title: String,
    pub match_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub min_score: u32,
    pub limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: 30,
            limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub preserve_line_breaks: bool,
    pub skill_dictionary_path: Option<String>,
    pub min_suggestion_score: u32,
    pub max_suggestions: usize,
    pub phone_region: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let options = MatchOptions::default();
        Self {
            preserve_line_breaks: false,
            skill_dictionary_path: None,
            min_suggestion_score: options.min_score,
            max_suggestions: options.limit,
            phone_region: "US".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn sanitized(mut self) -> Self {
        self.min_suggestion_score = self.min_suggestion_score.min(100);
        self.max_suggestions = self.max_suggestions.max(1);
        if self.phone_region.trim().is_empty() {
            self.phone_region = "US".to_string();
        }
        self.skill_dictionary_path = self
            .skill_dictionary_path
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
        self
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            min_score: self.min_suggestion_score,
            limit: self.max_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_skills_alphabetically() {
        let profile = CandidateProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: PHONE_PLACEHOLDER.to_string(),
            education: EDUCATION_NOT_SPECIFIED.to_string(),
            skills: ["TypeScript", "AWS", "React"]
                .into_iter()
                .map(String::from)
                .collect(),
            experience_years: 4,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["skills"], serde_json::json!(["AWS", "React", "TypeScript"]));
        assert_eq!(json["experience_years"], 4);
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let parsed: EngineSettings =
            serde_json::from_str(r#"{"preserveLineBreaks": true}"#).unwrap();
        assert!(parsed.preserve_line_breaks);
        assert_eq!(parsed.min_suggestion_score, 30);
        assert_eq!(parsed.max_suggestions, 5);
        assert_eq!(parsed.phone_region, "US");
    }

    #[test]
    fn sanitized_settings_clamp_out_of_range_values() {
        let settings = EngineSettings {
            preserve_line_breaks: false,
            skill_dictionary_path: Some("   ".to_string()),
            min_suggestion_score: 250,
            max_suggestions: 0,
            phone_region: String::new(),
        }
        .sanitized();

        assert_eq!(settings.min_suggestion_score, 100);
        assert_eq!(settings.max_suggestions, 1);
        assert_eq!(settings.phone_region, "US");
        assert_eq!(settings.skill_dictionary_path, None);
    }

    #[test]
    fn job_template_reads_type_field() {
        let template: JobTemplate = serde_json::from_str(
            r#"{
                "title": "QA Engineer",
                "category": "Quality Assurance",
                "description": "d",
                "requirements": "r",
                "required_skills": ["Testing"],
                "preferred_skills": [],
                "min_experience": 1,
                "type": "full-time"
            }"#,
        )
        .unwrap();
        assert_eq!(template.employment_type, "full-time");
    }
}
