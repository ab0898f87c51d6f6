//! Validation verdicts and rejection reasons.
//!
//! A [`Verdict`] is the only thing the validator ever returns. Callers that
//! want the plain `(bool, reason)` shape can use [`Verdict::is_valid`] and
//! [`Verdict::reason`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a piece of content was rejected.
///
/// Every variant renders to a human-readable reason via `Display`. The
/// surrounding application decides how (and whether) to show it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// Content exceeds the configured maximum length.
    #[error("content too long ({length} > {limit} characters)")]
    ContentTooLong { length: usize, limit: usize },

    /// A denylisted word was found (case-insensitive substring).
    #[error("forbidden word '{word}' detected")]
    ForbiddenWord { word: String },

    /// A sensitive-content pattern matched; `label` names the category.
    #[error("{label} pattern detected in content")]
    SensitivePattern { label: String },

    /// The model oracle flagged the content; `response` is its full text.
    #[error("oracle flagged a risk: {response}")]
    OracleFlagged { response: String },

    /// The model oracle could not be invoked. Fail-closed: the content is
    /// rejected, not waved through.
    #[error("oracle invocation failed: {error}")]
    OracleFailed { error: String },
}

/// Outcome of validating a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Content passed every stage.
    Pass,
    /// Content was rejected; `reason` says by which stage and why.
    Reject { reason: Rejection },
}

impl Verdict {
    /// Shorthand for building a rejection.
    pub fn reject(reason: Rejection) -> Self {
        Verdict::Reject { reason }
    }

    /// `true` when the content passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// Human-readable reason. Empty string when the content passed.
    pub fn reason(&self) -> String {
        match self {
            Verdict::Pass => String::new(),
            Verdict::Reject { reason } => reason.to_string(),
        }
    }

    /// The structured rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Pass => None,
            Verdict::Reject { reason } => Some(reason),
        }
    }
}
