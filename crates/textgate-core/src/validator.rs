//! The validation pipeline itself.
//!
//! Four stages, run strictly in order, first failure wins:
//!
//! 1. length bound
//! 2. forbidden-word denylist (case-insensitive substring)
//! 3. sensitive regex patterns (declaration order)
//! 4. model-oracle risk check (only when an oracle is supplied)
//!
//! Stages 1-3 are pure. Stage 4 makes exactly one oracle call and maps any
//! oracle error to a rejection (fail-closed).

use tracing::{debug, warn};

use crate::oracle::{response_flags_risk, risk_prompt, Oracle};
use crate::ruleset::RuleSet;
use crate::verdict::{Rejection, Verdict};

/// Stateless validator over an immutable rule set.
///
/// Holds only a shared reference, so it is trivially safe to use from many
/// threads at once; each `validate` call is independent.
pub struct Validator<'a> {
    rules: &'a RuleSet,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Validate one string, optionally consulting a model oracle.
    ///
    /// When `oracle` is `None`, stage 4 is skipped entirely; absence of an
    /// oracle is not a failure.
    pub fn validate(&self, content: &str, oracle: Option<&dyn Oracle>) -> Verdict {
        if let Some(reason) = self.check_length(content) {
            warn!(%reason, "content rejected by length check");
            return Verdict::reject(reason);
        }
        if let Some(reason) = self.check_forbidden_words(content) {
            warn!(%reason, "content rejected by keyword check");
            return Verdict::reject(reason);
        }
        if let Some(reason) = self.check_sensitive_patterns(content) {
            warn!(%reason, "content rejected by pattern check");
            return Verdict::reject(reason);
        }
        match oracle {
            Some(oracle) => {
                if let Some(reason) = self.check_oracle(content, oracle) {
                    warn!(%reason, "content rejected by oracle check");
                    return Verdict::reject(reason);
                }
            }
            None => debug!("no oracle supplied, skipping risk check"),
        }

        debug!("content passed all checks");
        Verdict::Pass
    }

    /// Stage 1: hard length bound. Counted in characters, not bytes, so
    /// the limit means the same thing for non-ASCII text.
    fn check_length(&self, content: &str) -> Option<Rejection> {
        let limit = self.rules.max_content_length();
        let length = content.chars().count();
        if length > limit {
            return Some(Rejection::ContentTooLong { length, limit });
        }
        None
    }

    /// Stage 2: case-insensitive substring scan, first word in declaration
    /// order wins.
    fn check_forbidden_words(&self, content: &str) -> Option<Rejection> {
        let lowered = content.to_lowercase();
        for word in self.rules.forbidden_words() {
            if lowered.contains(&word.to_lowercase()) {
                return Some(Rejection::ForbiddenWord { word: word.clone() });
            }
        }
        None
    }

    /// Stage 3: regex scan in declaration order, first match reported.
    fn check_sensitive_patterns(&self, content: &str) -> Option<Rejection> {
        for pattern in self.rules.sensitive_patterns() {
            if pattern.is_match(content) {
                return Some(Rejection::SensitivePattern {
                    label: pattern.label().to_string(),
                });
            }
        }
        None
    }

    /// Stage 4: one oracle call. The response flags a risk iff it contains
    /// the warning marker; an oracle error rejects the content rather than
    /// letting it through unchecked.
    fn check_oracle(&self, content: &str, oracle: &dyn Oracle) -> Option<Rejection> {
        let prompt = risk_prompt(content);
        match oracle.assess(&prompt) {
            Ok(response) => {
                debug!(response = %response, "oracle responded");
                if response_flags_risk(&response) {
                    return Some(Rejection::OracleFlagged { response });
                }
                None
            }
            Err(err) => Some(Rejection::OracleFailed {
                error: err.to_string(),
            }),
        }
    }
}
