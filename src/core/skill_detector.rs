use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::skill_dictionary::SkillDictionary;

#[derive(Debug, Clone)]
pub struct SkillDetector {
    dictionary: Arc<SkillDictionary>,
}

impl Default for SkillDetector {
    fn default() -> Self {
        Self::new(SkillDictionary::builtin())
    }
}

impl SkillDetector {
    pub fn new(dictionary: Arc<SkillDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    pub fn detect(&self, text: &str) -> BTreeSet<String> {
        self.detect_hits(text).into_keys().collect()
    }

    /// Canonical skill -> the alias that triggered it.
    pub fn detect_hits(&self, text: &str) -> BTreeMap<String, String> {
        let mut hits = BTreeMap::new();
        if text.trim().is_empty() {
            return hits;
        }

        let normalized = text.to_lowercase();
        for skill in self.dictionary.detection_order() {
            if let Some(alias) = skill
                .aliases
                .iter()
                .find(|alias| alias.pattern.is_match(&normalized))
            {
                hits.insert(skill.canonical_name.clone(), alias.alias.clone());
            }
        }

        hits
    }
}

pub fn detect_skills(text: &str) -> BTreeSet<String> {
    SkillDetector::default().detect(text)
}
