//! Member claims carried by access tokens.
//!
//! Issuers disagree on claim encoding: older tokens carry `mid` / `mty` as JSON numbers,
//! newer ones as strings. `ClaimValue` keeps the two shapes apart and `canonical()` is the
//! single place where they are folded into the string form used downstream.

use axum::http::HeaderValue;
use serde_json::{Number, Value};

/// Member identifier claim name.
pub const MEMBER_ID_CLAIM: &str = "mid";
/// Member type (role) claim name.
pub const MEMBER_TYPE_CLAIM: &str = "mty";

/// A claim value in one of the encodings we accept.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    Number(Number),
    String(String),
}

impl ClaimValue {
    /// Anything other than a number or a string (bool, null, array, object) is `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }

    /// Canonical string form.
    ///
    /// - integers (and floats with no fractional part, `42.0`) become their decimal form
    /// - strings are kept verbatim, but must be non-blank and usable as a header value
    /// - fractional / non-finite numbers have no canonical form
    pub fn canonical(&self) -> Option<String> {
        let s = match self {
            Self::Number(n) => canonical_number(n)?,
            Self::String(s) => {
                if s.trim().is_empty() {
                    return None;
                }
                s.clone()
            }
        };

        // The value ends up in a request header; reject anything that cannot live there.
        HeaderValue::from_str(&s).ok()?;
        Some(s)
    }
}

fn canonical_number(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }

    let f = n.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 || f.abs() >= i64::MAX as f64 {
        return None;
    }
    Some((f as i64).to_string())
}

/// Validated member identity, derived from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub member_id: String,
    pub member_type: String,
}

impl Identity {
    pub fn new(member_id: impl Into<String>, member_type: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            member_type: member_type.into(),
        }
    }
}
