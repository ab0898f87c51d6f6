//! Rule sets: the immutable configuration the validator checks against.
//!
//! A [`RuleSet`] is constructed once at startup (either the built-in seed
//! set or loaded from YAML) and passed by reference into the validator.
//! Nothing mutates it afterwards, so concurrent validation calls need no
//! locking.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Hard upper bound on content length, in characters.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 1000;

/// Errors that can occur when building a rule set.
#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A compiled sensitive-content pattern with its human-readable label.
#[derive(Debug, Clone)]
pub struct SensitivePattern {
    label: String,
    regex: Regex,
}

impl SensitivePattern {
    /// Compile a pattern. The label names the category in rejection
    /// reasons ("postal code", "email address", ...).
    pub fn new(
        pattern: impl AsRef<str>,
        label: impl Into<String>,
    ) -> Result<Self, RuleSetError> {
        let pattern = pattern.as_ref();
        let regex = Regex::new(pattern).map_err(|source| RuleSetError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            label: label.into(),
            regex,
        })
    }

    /// Category label reported on a match.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the pattern matches anywhere in `content`.
    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }

    /// The regex source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// The full set of rules a validator enforces.
///
/// Field order matters: forbidden words and sensitive patterns are checked
/// in declaration order and the first hit wins, so rejection reasons are
/// deterministic.
#[derive(Debug, Clone)]
pub struct RuleSet {
    max_content_length: usize,
    forbidden_words: Vec<String>,
    sensitive_patterns: Vec<SensitivePattern>,
}

lazy_static! {
    // Compiled once; `RuleSet::default()` hands out cheap clones
    // (regex::Regex clones share the compiled program).
    static ref SEED_RULESET: RuleSet = RuleSet::seed();
}

impl RuleSet {
    /// Build a rule set from parts. Patterns must already be compiled.
    pub fn new(
        max_content_length: usize,
        forbidden_words: Vec<String>,
        sensitive_patterns: Vec<SensitivePattern>,
    ) -> Self {
        Self {
            max_content_length,
            forbidden_words,
            sensitive_patterns,
        }
    }

    /// The built-in seed rules: known-sensitive terms (including the
    /// Japanese localized equivalents) and structural PII patterns.
    fn seed() -> Self {
        let forbidden_words = [
            "password",
            "secret",
            "confidential",
            "個人情報",
            "機密情報",
            "パスワード",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let sensitive_patterns = vec![
            SensitivePattern::new(r"\d{3}-\d{4}", "postal code")
                .expect("seed pattern must compile"),
            SensitivePattern::new(r"\d{4}/\d{1,2}/\d{1,2}", "date of birth")
                .expect("seed pattern must compile"),
            SensitivePattern::new(
                r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
                "email address",
            )
            .expect("seed pattern must compile"),
        ];

        Self::new(
            DEFAULT_MAX_CONTENT_LENGTH,
            forbidden_words,
            sensitive_patterns,
        )
    }

    /// Load a rule set from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleSetError> {
        let file: RuleFile = serde_yaml::from_str(yaml)?;
        file.compile()
    }

    /// Load a rule set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Render the effective rules back to YAML.
    pub fn to_yaml(&self) -> Result<String, RuleSetError> {
        Ok(serde_yaml::to_string(&RuleFile::from(self))?)
    }

    /// Maximum content length, in characters.
    pub fn max_content_length(&self) -> usize {
        self.max_content_length
    }

    /// Denylisted words, in check order.
    pub fn forbidden_words(&self) -> &[String] {
        &self.forbidden_words
    }

    /// Sensitive patterns, in check order.
    pub fn sensitive_patterns(&self) -> &[SensitivePattern] {
        &self.sensitive_patterns
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        SEED_RULESET.clone()
    }
}

/// On-disk YAML schema for a rule set.
#[derive(Debug, Serialize, Deserialize)]
struct RuleFile {
    #[serde(default = "default_max_content_length")]
    max_content_length: usize,
    #[serde(default)]
    forbidden_words: Vec<String>,
    #[serde(default)]
    sensitive_patterns: Vec<RawPattern>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawPattern {
    pattern: String,
    label: String,
}

fn default_max_content_length() -> usize {
    DEFAULT_MAX_CONTENT_LENGTH
}

impl RuleFile {
    fn compile(self) -> Result<RuleSet, RuleSetError> {
        let patterns = self
            .sensitive_patterns
            .into_iter()
            .map(|raw| SensitivePattern::new(&raw.pattern, raw.label))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet::new(
            self.max_content_length,
            self.forbidden_words,
            patterns,
        ))
    }
}

impl From<&RuleSet> for RuleFile {
    fn from(rules: &RuleSet) -> Self {
        Self {
            max_content_length: rules.max_content_length,
            forbidden_words: rules.forbidden_words.clone(),
            sensitive_patterns: rules
                .sensitive_patterns
                .iter()
                .map(|p| RawPattern {
                    pattern: p.as_str().to_string(),
                    label: p.label().to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_rules_are_present_and_ordered() {
        let rules = RuleSet::default();
        assert_eq!(rules.max_content_length(), 1000);
        assert_eq!(rules.forbidden_words()[0], "password");
        assert!(rules.forbidden_words().contains(&"パスワード".to_string()));

        let labels: Vec<_> = rules
            .sensitive_patterns()
            .iter()
            .map(SensitivePattern::label)
            .collect();
        assert_eq!(labels, vec!["postal code", "date of birth", "email address"]);
    }

    #[test]
    fn from_yaml_loads_custom_rules() {
        let yaml = r#"
max_content_length: 50
forbidden_words:
  - classified
sensitive_patterns:
  - pattern: '\d{2}:\d{2}'
    label: timestamp
"#;
        let rules = RuleSet::from_yaml(yaml).unwrap();
        assert_eq!(rules.max_content_length(), 50);
        assert_eq!(rules.forbidden_words(), ["classified".to_string()]);
        assert!(rules.sensitive_patterns()[0].is_match("at 12:30 today"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let rules = RuleSet::from_yaml("forbidden_words: [oops]").unwrap();
        assert_eq!(rules.max_content_length(), DEFAULT_MAX_CONTENT_LENGTH);
        assert!(rules.sensitive_patterns().is_empty());
    }

    #[test]
    fn bad_regex_is_reported_with_its_source() {
        let yaml = r#"
sensitive_patterns:
  - pattern: '([unclosed'
    label: broken
"#;
        let err = RuleSet::from_yaml(yaml).unwrap_err();
        match err {
            RuleSetError::InvalidPattern { pattern, .. } => {
                assert_eq!(pattern, "([unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn yaml_round_trip_preserves_rules() {
        let rules = RuleSet::default();
        let yaml = rules.to_yaml().unwrap();
        let reloaded = RuleSet::from_yaml(&yaml).unwrap();
        assert_eq!(reloaded.max_content_length(), rules.max_content_length());
        assert_eq!(reloaded.forbidden_words(), rules.forbidden_words());
        assert_eq!(
            reloaded.sensitive_patterns().len(),
            rules.sensitive_patterns().len()
        );
    }
}
