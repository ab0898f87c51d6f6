//! # textgate-runtime
//!
//! Oracle backends for textgate.
//!
//! `textgate-core` is fully deterministic and never makes network calls;
//! the oracle stage only runs when the caller hands it an implementation of
//! the [`Oracle`](textgate_core::Oracle) trait. This crate provides those
//! implementations.
//!
//! Currently one backend: [`HttpOracle`], a blocking client for a locally
//! served text-generation model (`POST /generate`). The validator does not
//! care which model sits behind the endpoint.
//!
//! ## Example
//!
//! ```rust,ignore
//! use textgate_core::{validate, RuleSet};
//! use textgate_runtime::HttpOracle;
//!
//! let rules = RuleSet::default();
//! let oracle = HttpOracle::for_endpoint("http://127.0.0.1:8000/generate")?;
//! let verdict = validate(&rules, "some untrusted text", Some(&oracle));
//! ```

mod http;

pub use http::{HttpOracle, HttpOracleConfig, HttpOracleError};
