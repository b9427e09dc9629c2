use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::CoreError;

const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    // Languages
    ("JavaScript", &["javascript", "js", "node.js", "nodejs", "js/es6"]),
    ("TypeScript", &["typescript", "ts"]),
    ("Python", &["python", "py"]),
    ("Java", &["java", "j2ee"]),
    ("C++", &["c++", "cpp"]),
    ("C#", &["c#", "csharp"]),
    ("Go", &["golang", "go lang"]),
    ("Rust", &["rust"]),
    ("Ruby", &["ruby", "rails", "ruby on rails"]),
    ("PHP", &["php"]),
    ("Swift", &["swift"]),
    ("Kotlin", &["kotlin"]),
    ("SQL", &["sql", "tsql", "t-sql"]),
    // Frontend
    ("React", &["react", "react.js", "reactjs"]),
    ("Vue", &["vue", "vue.js", "vuejs"]),
    ("Angular", &["angular", "angular.js", "angularjs"]),
    ("Svelte", &["svelte"]),
    ("Next.js", &["next.js", "nextjs", "next"]),
    ("Nuxt", &["nuxt", "nuxt.js"]),
    // Backend
    ("Node.js", &["node.js", "nodejs", "node"]),
    ("Express", &["express", "express.js"]),
    ("Django", &["django"]),
    ("FastAPI", &["fastapi", "fast api"]),
    ("Spring Boot", &["spring boot", "springboot"]),
    ("Spring", &["spring", "spring framework"]),
    ("Flask", &["flask"]),
    ("NestJS", &["nestjs", "nest.js"]),
    ("Laravel", &["laravel"]),
    ("ASP.NET", &["asp.net", "aspnet", ".net"]),
    // Databases
    ("MongoDB", &["mongodb", "mongo"]),
    ("PostgreSQL", &["postgresql", "postgres", "psql"]),
    ("MySQL", &["mysql"]),
    ("Redis", &["redis"]),
    ("DynamoDB", &["dynamodb"]),
    ("Cassandra", &["cassandra"]),
    ("Oracle", &["oracle database", "oracle"]),
    ("SQL Server", &["sql server", "mssql"]),
    ("Firebase", &["firebase"]),
    // Cloud and DevOps
    ("AWS", &["aws", "amazon web services", "amazon aws"]),
    ("Azure", &["azure", "microsoft azure"]),
    ("Google Cloud", &["google cloud", "gcp", "cloud google"]),
    ("Docker", &["docker"]),
    ("Kubernetes", &["kubernetes", "k8s"]),
    ("Jenkins", &["jenkins"]),
    ("CI/CD", &["ci/cd", "cicd", "continuous integration"]),
    ("Terraform", &["terraform"]),
    ("CloudFormation", &["cloudformation"]),
    ("Ansible", &["ansible"]),
    // Web
    ("HTML", &["html", "html5", "html 5"]),
    ("CSS", &["css", "css3", "scss", "sass", "less"]),
    ("REST APIs", &["rest", "rest api", "restful"]),
    ("GraphQL", &["graphql"]),
    ("WebSocket", &["websocket", "web socket"]),
    ("AJAX", &["ajax"]),
    // Mobile
    ("React Native", &["react native", "react-native"]),
    ("Flutter", &["flutter"]),
    ("iOS", &["ios", "iphone", "objective-c"]),
    ("Android", &["android", "java android"]),
    ("Xamarin", &["xamarin"]),
    // Data and ML
    ("Machine Learning", &["machine learning", "ml"]),
    ("Deep Learning", &["deep learning"]),
    ("TensorFlow", &["tensorflow", "tensor flow"]),
    ("PyTorch", &["pytorch", "torch"]),
    ("Scikit-learn", &["scikit-learn", "sklearn"]),
    ("Pandas", &["pandas"]),
    ("NumPy", &["numpy"]),
    ("Data Science", &["data science"]),
    ("NLP", &["nlp", "natural language processing"]),
    ("Computer Vision", &["computer vision", "cv"]),
    // Tools
    ("Git", &["git", "github", "gitlab", "bitbucket", "version control"]),
    ("Jira", &["jira"]),
    ("Agile", &["agile", "scrum", "kanban"]),
    ("Linux", &["linux", "ubuntu", "centos", "debian"]),
    ("Windows", &["windows"]),
    ("MacOS", &["macos", "mac os", "osx"]),
    // Soft skills
    ("Problem Solving", &["problem solving", "problem-solving", "troubleshooting"]),
    ("Communication", &["communication", "interpersonal"]),
    ("Leadership", &["leadership", "team lead", "manager"]),
    ("Project Management", &["project management", "project manager"]),
    ("Teamwork", &["teamwork", "team work", "collaboration"]),
    ("Documentation", &["documentation"]),
    ("Code Review", &["code review", "peer review"]),
    ("Testing", &["testing", "unit test", "integration test", "qa"]),
    ("Debugging", &["debugging", "troubleshooting"]),
    ("Software Development", &["software development", "software engineer"]),
    ("Backend Development", &["backend development", "back-end"]),
    ("Frontend Development", &["frontend development", "front-end"]),
    ("Full Stack", &["full stack", "full-stack"]),
    ("UI/UX", &["ui/ux", "ui design", "ux design", "user experience"]),
    // Architecture
    ("Microservices", &["microservices", "micro-services"]),
    ("API Design", &["api design"]),
    ("System Design", &["system design"]),
    ("Security", &["security", "cybersecurity"]),
    ("Performance Optimization", &["performance", "optimization"]),
    ("Scalability", &["scalable", "scalability"]),
    ("OOP", &["object oriented", "oop", "oop design"]),
    ("Functional Programming", &["functional programming"]),
];

static BUILTIN_DICTIONARY: Lazy<Arc<SkillDictionary>> = Lazy::new(|| {
    let entries = BUILTIN_SKILLS
        .iter()
        .map(|(name, aliases)| SkillEntry::new(*name, aliases.iter().copied()))
        .collect();
    Arc::new(SkillDictionary::from_entries(entries).unwrap())
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub canonical_name: String,
    pub aliases: Vec<String>,
}

impl SkillEntry {
    pub fn new<I, S>(canonical_name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical_name: canonical_name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// A compiled alias pattern, tested against lowercased text.
#[derive(Debug)]
pub(crate) struct AliasPattern {
    pub(crate) alias: String,
    pub(crate) pattern: Regex,
}

#[derive(Debug)]
pub(crate) struct CompiledSkill {
    pub(crate) canonical_name: String,
    pub(crate) aliases: Vec<AliasPattern>,
}

/// Immutable canonical-skill table. Alias patterns are compiled once here and
/// kept in detection order: longest alias first, dictionary order on ties.
#[derive(Debug)]
pub struct SkillDictionary {
    entries: Vec<SkillEntry>,
    detection_order: Vec<CompiledSkill>,
}

impl SkillDictionary {
    pub fn builtin() -> Arc<SkillDictionary> {
        Arc::clone(&BUILTIN_DICTIONARY)
    }

    pub fn from_entries(entries: Vec<SkillEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let canonical_name = entry.canonical_name.trim().to_string();
            if canonical_name.is_empty() {
                return Err(CoreError::InvalidDictionary(
                    "skill with an empty canonical name".to_string(),
                ));
            }
            if !seen.insert(canonical_name.clone()) {
                return Err(CoreError::InvalidDictionary(format!(
                    "duplicate canonical skill: {canonical_name}"
                )));
            }

            let aliases: Vec<String> = entry
                .aliases
                .iter()
                .map(|alias| alias.trim().to_lowercase())
                .filter(|alias| !alias.is_empty())
                .collect();
            if aliases.is_empty() {
                return Err(CoreError::InvalidDictionary(format!(
                    "skill {canonical_name} has no aliases"
                )));
            }

            normalized.push(SkillEntry {
                canonical_name,
                aliases,
            });
        }

        let mut detection_order = Vec::with_capacity(normalized.len());
        for entry in &normalized {
            let mut aliases = Vec::with_capacity(entry.aliases.len());
            for alias in &entry.aliases {
                let pattern = alias_regex(alias).map_err(|err| {
                    CoreError::InvalidDictionary(format!("alias {alias:?}: {err}"))
                })?;
                aliases.push(AliasPattern {
                    alias: alias.clone(),
                    pattern,
                });
            }
            detection_order.push(CompiledSkill {
                canonical_name: entry.canonical_name.clone(),
                aliases,
            });
        }

        // sort_by_key is stable, so equal lengths keep dictionary order
        detection_order.sort_by_key(|skill| std::cmp::Reverse(longest_alias_len(skill)));

        Ok(Self {
            entries: normalized,
            detection_order,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<SkillEntry> = serde_json::from_str(json)
            .map_err(|err| CoreError::InvalidDictionary(format!("invalid JSON: {err}")))?;
        Self::from_entries(entries)
    }

    pub async fn load_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read skill dictionary {}", path.display()))?;
        let dictionary = Self::from_json_str(&content)
            .with_context(|| format!("invalid skill dictionary {}", path.display()))?;
        Ok(dictionary)
    }

    /// Returns a new dictionary with `extra` appended. An extra entry whose
    /// canonical name already exists replaces that entry's aliases in place.
    pub fn with_additional_entries(&self, extra: Vec<SkillEntry>) -> Result<Self, CoreError> {
        let mut entries = self.entries.clone();
        for entry in extra {
            let name = entry.canonical_name.trim();
            match entries.iter_mut().find(|existing| existing.canonical_name == name) {
                Some(existing) => existing.aliases = entry.aliases,
                None => entries.push(entry),
            }
        }
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn canonical_for_alias(&self, alias: &str) -> Option<&str> {
        let needle = alias.trim().to_lowercase();
        self.detection_order
            .iter()
            .find(|skill| skill.aliases.iter().any(|a| a.alias == needle))
            .map(|skill| skill.canonical_name.as_str())
    }

    pub(crate) fn detection_order(&self) -> &[CompiledSkill] {
        &self.detection_order
    }
}

fn longest_alias_len(skill: &CompiledSkill) -> usize {
    skill
        .aliases
        .iter()
        .map(|a| a.alias.chars().count())
        .max()
        .unwrap_or(0)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only holds next to a word character, so it is asserted only on the
/// edges of the alias that are word characters. `c++`, `c#` and `.net` keep
/// their punctuation edges unanchored.
fn alias_regex(alias: &str) -> Result<Regex, regex::Error> {
    let leading = alias.chars().next().is_some_and(is_word_char);
    let trailing = alias.chars().last().is_some_and(is_word_char);

    let mut pattern = String::from("(?i)");
    if leading {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(alias));
    if trailing {
        pattern.push_str(r"\b");
    }

    Regex::new(&pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dictionary_builds() {
        let dictionary = SkillDictionary::builtin();
        assert_eq!(dictionary.len(), BUILTIN_SKILLS.len());
        assert_eq!(dictionary.canonical_for_alias("ReactJS"), Some("React"));
    }

    #[test]
    fn detection_order_is_longest_alias_first_and_stable() {
        let dictionary = SkillDictionary::from_entries(vec![
            SkillEntry::new("Go", ["go"]),
            SkillEntry::new("Golang", ["golang"]),
            SkillEntry::new("Rust", ["rust"]),
            SkillEntry::new("Ruby", ["ruby"]),
        ])
        .unwrap();

        let order: Vec<&str> = dictionary
            .detection_order()
            .iter()
            .map(|s| s.canonical_name.as_str())
            .collect();
        assert_eq!(order, vec!["Golang", "Rust", "Ruby", "Go"]);
    }

    #[test]
    fn aliases_are_trimmed_and_lowercased() {
        let dictionary =
            SkillDictionary::from_entries(vec![SkillEntry::new("Docker", ["  Docker ", ""])])
                .unwrap();
        assert_eq!(dictionary.entries()[0].aliases, vec!["docker".to_string()]);
    }

    #[test]
    fn rejects_entries_without_aliases() {
        let err = SkillDictionary::from_entries(vec![SkillEntry::new(
            "Empty",
            Vec::<String>::new(),
        )])
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDictionary(_)));
    }

    #[test]
    fn rejects_duplicate_canonical_names() {
        let err = SkillDictionary::from_entries(vec![
            SkillEntry::new("Rust", ["rust"]),
            SkillEntry::new("Rust", ["rustlang"]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate canonical skill: Rust"));
    }

    #[test]
    fn additional_entries_extend_and_replace() {
        let base = SkillDictionary::from_entries(vec![SkillEntry::new("Rust", ["rust"])]).unwrap();
        let extended = base
            .with_additional_entries(vec![
                SkillEntry::new("Rust", ["rust", "rustlang"]),
                SkillEntry::new("Zig", ["zig"]),
            ])
            .unwrap();

        assert_eq!(extended.len(), 2);
        assert_eq!(extended.canonical_for_alias("rustlang"), Some("Rust"));
        assert_eq!(extended.canonical_for_alias("zig"), Some("Zig"));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn parses_json_entries() {
        let dictionary = SkillDictionary::from_json_str(
            r#"[{"canonical_name": "Elixir", "aliases": ["elixir", "phoenix"]}]"#,
        )
        .unwrap();
        assert_eq!(dictionary.canonical_for_alias("phoenix"), Some("Elixir"));

        assert!(SkillDictionary::from_json_str("{not json").is_err());
    }

    #[test]
    fn punctuation_edges_are_not_anchored() {
        assert_eq!(alias_regex("c++").unwrap().as_str(), r"(?i)\bc\+\+");
        assert_eq!(alias_regex(".net").unwrap().as_str(), r"(?i)\.net\b");
        assert_eq!(alias_regex("ci/cd").unwrap().as_str(), r"(?i)\bci/cd\b");
    }
}
