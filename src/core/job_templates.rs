use once_cell::sync::Lazy;
use tracing::error;

use super::models::{JobPosting, JobRequirement, JobTemplate};

const BUILTIN_TEMPLATES_JSON: &str = include_str!("../../data/job_templates.json");

static BUILTIN_TEMPLATES: Lazy<Vec<JobTemplate>> = Lazy::new(|| {
    serde_json::from_str(BUILTIN_TEMPLATES_JSON).unwrap_or_else(|err| {
        error!(error = %err, "embedded job templates are invalid");
        Vec::new()
    })
});

pub fn builtin_templates() -> &'static [JobTemplate] {
    &BUILTIN_TEMPLATES
}

pub fn find_template(title: &str) -> Option<&'static JobTemplate> {
    builtin_templates().iter().find(|t| t.title == title)
}

/// Unique categories in first-seen order.
pub fn template_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for template in builtin_templates() {
        if !categories.contains(&template.category.as_str()) {
            categories.push(template.category.as_str());
        }
    }
    categories
}

pub fn templates_in_category(category: &str) -> Vec<&'static JobTemplate> {
    builtin_templates()
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

impl JobTemplate {
    pub fn requirement(&self) -> JobRequirement {
        JobRequirement {
            required_skills: self.required_skills.clone(),
            preferred_skills: self.preferred_skills.clone(),
        }
    }

    pub fn to_posting(&self) -> JobPosting {
        JobPosting {
            id: slugify(&self.title),
            title: self.title.clone(),
            requirement: self.requirement(),
        }
    }
}

pub fn builtin_postings() -> Vec<JobPosting> {
    builtin_templates().iter().map(JobTemplate::to_posting).collect()
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_templates_load() {
        assert_eq!(builtin_templates().len(), 37);
        assert!(builtin_templates()
            .iter()
            .all(|t| !t.required_skills.is_empty()));
    }

    #[test]
    fn categories_are_unique_in_first_seen_order() {
        assert_eq!(
            template_categories(),
            vec![
                "Development",
                "Infrastructure",
                "Security",
                "Data & Analytics",
                "Quality Assurance",
                "Design",
                "Management",
            ]
        );
    }

    #[test]
    fn lookup_by_title_and_category() {
        let template = find_template("Full Stack Developer").unwrap();
        assert_eq!(template.min_experience, 3);
        assert!(template.required_skills.contains(&"React".to_string()));
        assert!(find_template("full stack developer").is_none());

        let security = templates_in_category("Security");
        assert!(!security.is_empty());
        assert!(security.iter().all(|t| t.category == "Security"));
    }

    #[test]
    fn postings_get_slug_ids() {
        let posting = find_template("Ethical Hacker / Penetration Tester")
            .unwrap()
            .to_posting();
        assert_eq!(posting.id, "ethical-hacker-penetration-tester");

        let ids: std::collections::HashSet<String> =
            builtin_postings().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), builtin_templates().len());
    }
}
