//! Bearer token 検証 → trusted headers (x-member-id / x-member-type) を request に書き込む
//!
//! Per request:
//! - caller が送ってきた trusted headers を削除 (skip されるパスでも)
//! - skip rule に一致 → token を読まずに次へ
//! - `Authorization` を検証し、成功したら identity を header に上書き
//! - 失敗時の扱いは `FailurePolicy` で決める (passthrough / reject)

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request},
    http::{Uri, header},
    response::IntoResponse,
};
use thiserror::Error;

use crate::error::AppError;
use crate::middleware::auth::{headers, skipper::PathSkipper};
use crate::middleware::pipeline::{Outcome, RequestFilter};
use crate::services::auth::{AuthError, TokenVerifier};

/// What happens to a request whose token did not verify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Forward without trusted headers; downstream decides whether identity is required.
    #[default]
    Passthrough,
    /// Stop here with 401.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown failure policy '{0}' (expected 'passthrough' or 'reject')")]
pub struct UnknownFailurePolicy(pub String);

impl FromStr for FailurePolicy {
    type Err = UnknownFailurePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(Self::Passthrough),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownFailurePolicy(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Authenticator {
    verifier: Arc<TokenVerifier>,
    skipper: PathSkipper,
    policy: FailurePolicy,
}

impl Authenticator {
    pub fn new<I, T>(verifier: Arc<TokenVerifier>, skip_paths: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            verifier,
            skipper: PathSkipper::new(skip_paths),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl RequestFilter for Authenticator {
    fn name(&self) -> &'static str {
        "authenticator"
    }

    fn filter(&self, mut req: Request) -> Outcome {
        // Trusted headers only ever come from a verified token, skipped paths included.
        headers::strip(req.headers_mut());

        let uri = raw_uri(&req);
        if self.skipper.should_skip(&uri) {
            tracing::debug!(uri = %uri, "authentication skipped");
            return Outcome::Continue(req);
        }

        // A missing or non-UTF-8 header is verified as an empty token (=> MalformedToken).
        let raw = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let identity = match self.verifier.verify(raw) {
            Ok(identity) => identity,
            Err(err) => return self.on_failure(req, err, &uri),
        };

        if headers::write_identity(req.headers_mut(), &identity).is_err() {
            return self.on_failure(req, AuthError::MalformedToken, &uri);
        }

        tracing::debug!(
            member_id = %identity.member_id,
            member_type = %identity.member_type,
            "member authenticated"
        );
        Outcome::Continue(req)
    }
}

impl Authenticator {
    fn on_failure(&self, req: Request, err: AuthError, uri: &str) -> Outcome {
        tracing::warn!(
            error = %err,
            uri = %uri,
            policy = ?self.policy,
            "access token verification failed"
        );

        match self.policy {
            FailurePolicy::Passthrough => Outcome::Continue(req),
            FailurePolicy::Reject => Outcome::Reject(AppError::Unauthorized.into_response()),
        }
    }
}

/// The URI as the client sent it. Nested routers strip their prefix from `req.uri()`, so
/// prefer `OriginalUri` when axum has recorded it.
fn raw_uri(req: &Request) -> String {
    let uri: &Uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|o| &o.0)
        .unwrap_or_else(|| req.uri());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned())
}
