use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\s]+$").unwrap());

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?1?\s?)?(\([0-9]{3}\)|[0-9]{3})[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}").unwrap()
});

static EDUCATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:bachelor|master|phd|associate|degree)['s]*\s+(?:of|in)?\s+([a-z\s&]+)")
            .unwrap(),
        Regex::new(r"(?i)(?:b\.s\.|b\.a\.|m\.s\.|m\.a\.|m\.b\.a\.|ph\.d\.)\s+(?:in)?\s+([a-z\s&]+)")
            .unwrap(),
        Regex::new(r"(?i)([a-z\s&]+)\s+(?:degree|program|major)").unwrap(),
    ]
});

static EXPERIENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s*(?:years|yrs)\s+(?:of\s+)?(?:experience|exp)").unwrap()
});

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{4})\s*[-–]\s*(?:present|current|now|\d{4})").unwrap()
});

/// Raw heuristic output. `None` means the heuristic found nothing; defaults are
/// applied by the candidate extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub experience_years: Option<u32>,
    pub skills: BTreeSet<String>,
}

pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| line.chars().count() > 2 && NAME_LINE_RE.is_match(line))
        .map(str::to_string)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|phone| !phone.is_empty())
}

pub fn extract_education(text: &str) -> Option<String> {
    EDUCATION_RES
        .iter()
        .filter_map(|regex| regex.find(text))
        .map(|m| m.as_str().trim().to_string())
        .find(|education| !education.is_empty())
}

pub fn extract_experience_years(text: &str, reference_year: i32) -> Option<u32> {
    let explicit = EXPERIENCE_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|years| years.as_str().parse::<u32>().ok())
        .filter(|years| *years > 0);
    if explicit.is_some() {
        return explicit;
    }

    DATE_RANGE_RE
        .captures_iter(text)
        .filter_map(|captures| captures.get(1)?.as_str().parse::<i32>().ok())
        .map(|start_year| reference_year - start_year)
        .filter(|years| *years > 0)
        .max()
        .and_then(|years| u32::try_from(years).ok())
}

/// Formats a phone match as E.164 when it is a valid number for `region`.
pub fn normalize_phone(phone: &str, region: &str) -> Option<String> {
    let country = region
        .trim()
        .to_ascii_uppercase()
        .parse::<phonenumber::country::Id>()
        .ok();
    let parsed = phonenumber::parse(country, phone).ok()?;
    if !phonenumber::is_valid(&parsed) {
        return None;
    }

    Some(parsed.format().mode(phonenumber::Mode::E164).to_string())
}

pub fn fallback_label_from_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    match (path.extension(), path.file_stem().and_then(|stem| stem.to_str())) {
        (Some(_), Some(stem)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

pub fn score_confidence(fields: &CandidateFields) -> f64 {
    let mut score: f64 = 0.0;

    if fields.email.is_some() {
        score += 0.35;
    }
    if fields.phone.is_some() {
        score += 0.2;
    }
    if fields.name.is_some() {
        score += 0.15;
    }
    if !fields.skills.is_empty() {
        score += 0.15;
    }
    if fields.education.is_some() {
        score += 0.1;
    }
    if fields.experience_years.is_some() {
        score += 0.05;
    }

    score.min(1.0)
}
