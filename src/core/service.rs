use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::candidate_extractor::{resolve_profile, CandidateInfoExtractor};
use super::document_parser::ResumeDocumentParser;
use super::errors::CoreError;
use super::field_extractor::{fallback_label_from_file_name, normalize_phone, score_confidence};
use super::job_templates::builtin_postings;
use super::models::{
    CandidateProfile, EngineSettings, JobMatch, JobPosting, JobRequirement, MatchResult,
    ParsedResume,
};
use super::pdf::PdfTextExtractor;
use super::settings_store::SettingsStore;
use super::skill_detector::SkillDetector;
use super::skill_dictionary::SkillDictionary;
use super::skill_match;

/// Entry point for a host application. Everything it holds is immutable, so
/// one instance can serve concurrent callers.
pub struct CoreService {
    settings: EngineSettings,
    parser: ResumeDocumentParser,
    extractor: CandidateInfoExtractor,
}

impl CoreService {
    pub async fn new() -> anyhow::Result<Arc<Self>> {
        let settings_store = SettingsStore::new();
        let settings = settings_store.load().await.unwrap_or_else(|err| {
            warn!(
                path = %settings_store.path().display(),
                error = %err,
                "falling back to default engine settings"
            );
            EngineSettings::default()
        });

        Self::with_settings(settings).await
    }

    pub async fn with_settings(settings: EngineSettings) -> anyhow::Result<Arc<Self>> {
        let settings = settings.sanitized();
        let dictionary = build_dictionary(&settings).await?;
        info!(
            skills = dictionary.len(),
            preserve_line_breaks = settings.preserve_line_breaks,
            "resume matcher ready"
        );

        let parser = ResumeDocumentParser::new(PdfTextExtractor::new())
            .with_line_breaks(settings.preserve_line_breaks);
        let extractor = CandidateInfoExtractor::new(SkillDetector::new(dictionary));

        Ok(Arc::new(Self {
            settings,
            parser,
            extractor,
        }))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Decodes and extracts on the blocking pool; large PDFs have no yield
    /// points.
    pub async fn parse_resume(
        self: &Arc<Self>,
        file_name: String,
        content_type: String,
        file_bytes: Vec<u8>,
    ) -> anyhow::Result<ParsedResume> {
        let service = Arc::clone(self);
        let parsed = tokio::task::spawn_blocking(move || {
            service.parse_resume_blocking(&file_name, &content_type, &file_bytes)
        })
        .await
        .context("resume parsing task failed")??;

        Ok(parsed)
    }

    pub fn parse_resume_blocking(
        &self,
        file_name: &str,
        content_type: &str,
        file_bytes: &[u8],
    ) -> Result<ParsedResume, CoreError> {
        let (document_kind, text) = self
            .parser
            .extract_text_for_file(file_name, content_type, file_bytes)
            .inspect_err(|err| {
                warn!(file = file_name, content_type, error = %err, "resume extraction failed");
            })?;

        let fields = self.extractor.extract_fields(&text);
        let confidence = score_confidence(&fields);
        let phone_e164 = fields
            .phone
            .as_deref()
            .and_then(|phone| normalize_phone(phone, &self.settings.phone_region));
        let profile = resolve_profile(fields, &fallback_label_from_file_name(file_name));

        info!(
            file = file_name,
            kind = ?document_kind,
            chars = text.len(),
            skills = profile.skills.len(),
            experience_years = profile.experience_years,
            confidence,
            "resume parsed"
        );

        Ok(ParsedResume {
            source_file: file_name.to_string(),
            document_kind,
            profile,
            phone_e164,
            confidence,
            fingerprint: fingerprint(file_bytes),
            text_length: text.chars().count(),
        })
    }

    pub fn extract_profile(&self, text: &str, fallback_label: &str) -> CandidateProfile {
        self.extractor.extract(text, fallback_label)
    }

    pub fn score<S: AsRef<str>>(
        &self,
        candidate_skills: &[S],
        requirement: &JobRequirement,
    ) -> MatchResult {
        let result = skill_match::score_requirement(candidate_skills, requirement);
        debug!(
            score = result.score,
            matched_required = result.matched_required.len(),
            missing_required = result.missing_required.len(),
            "skill match scored"
        );
        result
    }

    /// Job matches to attach to a newly created candidate.
    pub fn suggest_matches<S: AsRef<str>>(
        &self,
        candidate_skills: &[S],
        jobs: &[JobPosting],
        selected_job_id: Option<&str>,
    ) -> Result<Vec<JobMatch>, CoreError> {
        let matches = skill_match::matches_for_selection(
            candidate_skills,
            jobs,
            selected_job_id,
            self.settings.match_options(),
        )?;
        debug!(
            jobs = jobs.len(),
            kept = matches.len(),
            selected = selected_job_id.unwrap_or("-"),
            "job matches computed"
        );
        Ok(matches)
    }

    pub fn recalculate_match<S: AsRef<str>>(
        &self,
        candidate_skills: &[S],
        job: &JobPosting,
    ) -> JobMatch {
        let job_match = skill_match::job_match(candidate_skills, job);
        info!(job_id = %job.id, score = job_match.match_score, "match recalculated");
        job_match
    }

    pub fn templates(&self) -> Vec<JobPosting> {
        builtin_postings()
    }
}

async fn build_dictionary(settings: &EngineSettings) -> anyhow::Result<Arc<SkillDictionary>> {
    let builtin = SkillDictionary::builtin();
    let Some(path) = settings.skill_dictionary_path.as_deref() else {
        return Ok(builtin);
    };

    let extra = SkillDictionary::load_json_file(Path::new(path)).await?;
    let merged = builtin
        .with_additional_entries(extra.entries().to_vec())
        .with_context(|| format!("failed to merge skill dictionary {path}"))?;
    info!(path, added = extra.len(), "custom skills loaded");
    Ok(Arc::new(merged))
}

fn fingerprint(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
