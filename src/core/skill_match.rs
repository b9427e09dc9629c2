//! Candidate-vs-job skill scoring.
//!
//! A job phrase counts as matched when any candidate skill is a substring of
//! it or it is a substring of any candidate skill, case-insensitively. Required
//! skills carry 70 points, preferred skills 30.

use super::errors::CoreError;
use super::models::{JobMatch, JobPosting, JobRequirement, MatchOptions, MatchResult};

pub const REQUIRED_WEIGHT: f64 = 70.0;
pub const PREFERRED_WEIGHT: f64 = 30.0;

pub fn score_skill_match<C, S>(
    candidate_skills: C,
    required_skills: &[String],
    preferred_skills: &[String],
) -> MatchResult
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let candidate: Vec<String> = candidate_skills
        .into_iter()
        .map(|skill| skill.as_ref().to_lowercase())
        .filter(|skill| !skill.trim().is_empty())
        .collect();

    let (matched_required, missing_required) = partition_matches(&candidate, required_skills);
    let (matched_preferred, missing_preferred) = partition_matches(&candidate, preferred_skills);

    let required_score = weighted_share(matched_required.len(), required_skills.len(), REQUIRED_WEIGHT);
    let preferred_score =
        weighted_share(matched_preferred.len(), preferred_skills.len(), PREFERRED_WEIGHT);
    let score = (required_score + preferred_score).round().clamp(0.0, 100.0) as u32;

    MatchResult {
        score,
        matched_required,
        missing_required,
        matched_preferred,
        missing_preferred,
    }
}

pub fn score_requirement<C, S>(candidate_skills: C, requirement: &JobRequirement) -> MatchResult
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    score_skill_match(
        candidate_skills,
        &requirement.required_skills,
        &requirement.preferred_skills,
    )
}

pub fn job_match<S: AsRef<str>>(candidate_skills: &[S], job: &JobPosting) -> JobMatch {
    let result = score_requirement(candidate_skills, &job.requirement);
    JobMatch {
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        match_score: result.score,
        matching_skills: result.matched_required,
        missing_skills: result.missing_required,
    }
}

/// Jobs scoring at least `options.min_score`, best first, at most
/// `options.limit` of them. Equal scores keep the order of `jobs`.
///
/// Every posting in `jobs` is scored; callers drop closed or inactive
/// postings before calling.
pub fn suggest_job_matches<S: AsRef<str>>(
    candidate_skills: &[S],
    jobs: &[JobPosting],
    options: MatchOptions,
) -> Vec<JobMatch> {
    let mut matches: Vec<JobMatch> = jobs
        .iter()
        .map(|job| job_match(candidate_skills, job))
        .filter(|m| m.match_score >= options.min_score)
        .collect();

    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(options.limit);
    matches
}

/// With a selected job only that job is scored, whatever its score.
pub fn matches_for_selection<S: AsRef<str>>(
    candidate_skills: &[S],
    jobs: &[JobPosting],
    selected_job_id: Option<&str>,
    options: MatchOptions,
) -> Result<Vec<JobMatch>, CoreError> {
    match selected_job_id {
        Some(job_id) => {
            let job = jobs
                .iter()
                .find(|job| job.id == job_id)
                .ok_or_else(|| CoreError::JobNotFound(job_id.to_string()))?;
            Ok(vec![job_match(candidate_skills, job)])
        }
        None => Ok(suggest_job_matches(candidate_skills, jobs, options)),
    }
}

fn partition_matches(candidate: &[String], phrases: &[String]) -> (Vec<String>, Vec<String>) {
    phrases
        .iter()
        .map(|phrase| phrase.to_lowercase())
        .partition(|phrase| {
            candidate
                .iter()
                .any(|skill| skill.contains(phrase.as_str()) || phrase.contains(skill.as_str()))
        })
}

fn weighted_share(matched: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64 * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn posting(id: &str, required: &[&str], preferred: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: id.to_uppercase(),
            requirement: JobRequirement::new(required.iter().copied(), preferred.iter().copied()),
        }
    }

    #[test]
    fn empty_candidate_scores_zero() {
        let result = score_skill_match(Vec::<String>::new(), &strings(&["React"]), &[]);
        assert_eq!(result.score, 0);
        assert!(result.matched_required.is_empty());
        assert_eq!(result.missing_required, strings(&["react"]));
    }

    #[test]
    fn partial_required_match_scores_35() {
        let result = score_skill_match(
            ["React", "Node.js"],
            &strings(&["React", "JavaScript"]),
            &strings(&["Docker"]),
        );
        assert_eq!(result.score, 35);
        assert_eq!(result.matched_required, strings(&["react"]));
        assert_eq!(result.missing_required, strings(&["javascript"]));
        assert_eq!(result.missing_preferred, strings(&["docker"]));
    }

    #[test]
    fn full_match_scores_100() {
        let result = score_skill_match(
            ["React", "JavaScript", "Docker"],
            &strings(&["React", "JavaScript"]),
            &strings(&["Docker"]),
        );
        assert_eq!(result.score, 100);
        assert!(result.missing_required.is_empty());
        assert_eq!(result.matched_preferred, strings(&["docker"]));
    }

    #[test]
    fn substring_containment_works_both_ways() {
        let result = score_skill_match(["React"], &strings(&["React.js", "HTML/CSS"]), &[]);
        assert_eq!(result.matched_required, strings(&["react.js"]));

        let result = score_skill_match(["HTML", "CSS"], &strings(&["html/css"]), &[]);
        assert_eq!(result.matched_required, strings(&["html/css"]));
        assert_eq!(result.score, 70);
    }

    #[test]
    fn duplicates_dilute_the_score() {
        let result = score_skill_match(["Rust"], &strings(&["Rust", "Go", "Go"]), &[]);
        assert_eq!(result.score, 23);
        assert_eq!(result.missing_required, strings(&["go", "go"]));
    }

    #[test]
    fn preferred_only_jobs_use_the_preferred_weight() {
        let result = score_skill_match(["Docker"], &[], &strings(&["Docker", "Ansible"]));
        assert_eq!(result.score, 15);
    }

    #[test]
    fn blank_candidate_skills_are_ignored() {
        let result = score_skill_match(["", "  "], &strings(&["Rust"]), &[]);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn suggestions_respect_threshold_order_and_limit() {
        let jobs = vec![
            posting("low", &["Java", "Spring", "Kafka"], &[]),
            posting("mid", &["Rust", "Kafka"], &[]),
            posting("top", &["Rust"], &["Docker"]),
            posting("also-top", &["Docker"], &["Rust"]),
        ];

        let matches = suggest_job_matches(
            &["Rust", "Docker"],
            &jobs,
            MatchOptions {
                min_score: 30,
                limit: 2,
            },
        );
        let ids: Vec<&str> = matches.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "also-top"]);

        let all = suggest_job_matches(&["Rust", "Docker"], &jobs, MatchOptions::default());
        let ids: Vec<&str> = all.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["top", "also-top", "mid"]);
        assert_eq!(all[2].match_score, 35);
        assert_eq!(all[2].missing_skills, strings(&["kafka"]));
    }

    #[test]
    fn suggestions_score_exactly_the_postings_given() {
        let jobs = vec![
            posting("open", &["Rust"], &[]),
            posting("closed", &["Rust"], &[]),
        ];
        let open_jobs: Vec<JobPosting> = jobs.into_iter().filter(|job| job.id != "closed").collect();

        let matches = suggest_job_matches(&["Rust"], &open_jobs, MatchOptions::default());
        let ids: Vec<&str> = matches.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["open"]);
    }

    #[test]
    fn selected_job_bypasses_the_threshold() {
        let jobs = vec![posting("low", &["Java"], &[])];
        let matches =
            matches_for_selection(&["Rust"], &jobs, Some("low"), MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_score, 0);

        let err = matches_for_selection(&["Rust"], &jobs, Some("nope"), MatchOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::JobNotFound(_)));
    }
}
