//! # textgate-core
//!
//! Deterministic content validation gate for RAG pipelines.
//!
//! Every untrusted string in the surrounding application (the user's
//! question, each ingested document chunk, the generated answer) passes
//! through the same gate before it is used or shown. The gate runs four
//! stages in a fixed order and stops at the first failure:
//!
//! 1. length bound
//! 2. forbidden-word denylist
//! 3. sensitive regex patterns
//! 4. model-oracle risk check (optional, skipped when no oracle is given)
//!
//! ## Key guarantees
//!
//! 1. **Stateless**: no shared mutable state; the rule set is immutable
//!    after construction and calls are independent
//! 2. **Deterministic reasons**: fixed stage and rule order means the same
//!    input always yields the same rejection message
//! 3. **Fail-closed**: if the oracle cannot be reached, content is
//!    rejected, never silently passed
//! 4. **No retries**: every check runs at most once per call
//!
//! ## Example
//!
//! ```rust
//! use textgate_core::{validate, RuleSet};
//!
//! let rules = RuleSet::default();
//! let verdict = validate(&rules, "My email is alice@example.com", None);
//! assert!(!verdict.is_valid());
//! assert!(verdict.reason().starts_with("email address"));
//! ```

pub mod oracle;
pub mod ruleset;
pub mod validator;
pub mod verdict;

// Re-export main types at crate root
pub use oracle::{risk_prompt, FnOracle, Oracle, OracleError, WARNING_MARKER};
pub use ruleset::{RuleSet, RuleSetError, SensitivePattern, DEFAULT_MAX_CONTENT_LENGTH};
pub use validator::Validator;
pub use verdict::{Rejection, Verdict};

/// Validate one string against a rule set.
///
/// This is the main entry point. The three gate points of the surrounding
/// application (question intake, chunk ingestion, answer output) all call
/// this with no difference in behavior.
///
/// # Arguments
///
/// * `rules` - the immutable rule set to enforce
/// * `content` - the untrusted string
/// * `oracle` - optional model oracle; when `None`, the risk-classifier
///   stage is skipped entirely
pub fn validate(rules: &RuleSet, content: &str, oracle: Option<&dyn Oracle>) -> Verdict {
    Validator::new(rules).validate(content, oracle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_greeting_passes() {
        let rules = RuleSet::default();
        let verdict = validate(&rules, "Hello, how are you?", None);
        assert!(verdict.is_valid());
        assert_eq!(verdict.reason(), "");
    }

    #[test]
    fn email_is_rejected_naming_the_category() {
        let rules = RuleSet::default();
        let verdict = validate(&rules, "My email is alice@example.com", None);
        assert!(!verdict.is_valid());
        assert!(verdict.reason().starts_with("email address"));
    }

    #[test]
    fn overlong_content_is_rejected() {
        let rules = RuleSet::default();
        let verdict = validate(&rules, &"x".repeat(1001), None);
        assert!(!verdict.is_valid());
        assert!(verdict.reason().starts_with("content too long"));
    }
}
