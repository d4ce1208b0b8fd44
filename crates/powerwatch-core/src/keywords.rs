//! Keyword lists that drive outage classification.
//!
//! Category assignment is pure data: every list here can be replaced from a
//! YAML file without touching the classifier's control flow.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::OutageCategory;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierKeywords {
    /// Sub-type fragments meaning "no outage".
    pub none: Vec<String>,
    pub emergency: Vec<String>,
    pub urgent: Vec<String>,
    pub stabilization: Vec<String>,
    pub scheduled: Vec<String>,
}

impl Default for ClassifierKeywords {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| (*w).to_owned()).collect()
        }

        Self {
            none: owned(&["відсутн", "немає", "не має", "none", "no outage", "absent"]),
            emergency: owned(&["авар", "emergency", "accident"]),
            urgent: owned(&["екстр", "urgent"]),
            stabilization: owned(&["стабілізац", "графік", "stabiliz", "grid schedule"]),
            scheduled: owned(&["планов", "planned", "scheduled", "maintenance"]),
        }
    }
}

impl ClassifierKeywords {
    /// Returns `true` when the lowercased sub-type contains a "no outage" marker.
    #[must_use]
    pub fn marks_absent(&self, sub_lower: &str) -> bool {
        contains_any(sub_lower, &self.none)
    }

    /// First matching category in priority order, `Unspecified` otherwise.
    #[must_use]
    pub fn category_for(&self, sub_lower: &str) -> OutageCategory {
        let ordered = [
            (OutageCategory::Emergency, &self.emergency),
            (OutageCategory::Urgent, &self.urgent),
            (OutageCategory::Stabilization, &self.stabilization),
            (OutageCategory::Scheduled, &self.scheduled),
        ];

        ordered
            .into_iter()
            .find(|(_, words)| contains_any(sub_lower, words))
            .map_or(OutageCategory::Unspecified, |(category, _)| category)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("none", &self.none),
            ("emergency", &self.emergency),
            ("urgent", &self.urgent),
            ("stabilization", &self.stabilization),
            ("scheduled", &self.scheduled),
        ];
        for (name, words) in lists {
            if words.is_empty() {
                return Err(ConfigError::InvalidKeywords(format!(
                    "keyword list \"{name}\" must not be empty"
                )));
            }
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(ConfigError::InvalidKeywords(format!(
                    "keyword list \"{name}\" contains a blank entry"
                )));
            }
        }
        Ok(())
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| haystack.contains(n.trim().to_lowercase().as_str()))
}

/// Load keyword overrides from a YAML file.
///
/// Lists omitted from the file keep their defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// empty or blank list entry.
pub fn load_keywords(path: &Path) -> Result<ClassifierKeywords, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeywordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let keywords: ClassifierKeywords =
        serde_yaml::from_str(&content).map_err(ConfigError::KeywordsFileParse)?;

    keywords.validate()?;
    Ok(keywords)
}
