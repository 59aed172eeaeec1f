/*
 * Responsibility
 * - x-member-type (authenticator が書いた trusted header) を allow-list と比較する
 * - 一致しなければ pipeline を止めて拒否レスポンスを返す
 * - header を完全に信用するので、必ず Authenticator の後に置くこと
 */
use axum::{extract::Request, response::IntoResponse};

use crate::error::AppError;
use crate::middleware::auth::headers;
use crate::middleware::pipeline::{Outcome, RequestFilter};

#[derive(Debug, Clone, Default)]
pub struct RoleGate {
    allowed: Vec<String>,
}

impl RoleGate {
    pub fn new<I, T>(allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let allowed = allowed
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .collect();

        Self { allowed }
    }

    /// A missing member type never matches, even against an empty allow-list entry.
    pub fn permits(&self, member_type: Option<&str>) -> bool {
        member_type.is_some_and(|t| self.allowed.iter().any(|a| a == t))
    }
}

impl RequestFilter for RoleGate {
    fn name(&self) -> &'static str {
        "role_gate"
    }

    fn filter(&self, req: Request) -> Outcome {
        let member_type = headers::member_type(req.headers());
        if self.permits(member_type) {
            return Outcome::Continue(req);
        }

        tracing::warn!(
            member_type = member_type.unwrap_or("<none>"),
            allowed = ?self.allowed,
            path = %req.uri().path(),
            "member type not allowed"
        );
        Outcome::Reject(AppError::Forbidden.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::headers::MEMBER_TYPE_HEADER;
    use axum::{body::Body, http::StatusCode};

    fn request(member_type: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/admin/status");
        if let Some(t) = member_type {
            builder = builder.header(MEMBER_TYPE_HEADER, t);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_permits_exact_match_only() {
        let gate = RoleGate::new(["staff", "admin"]);
        assert!(gate.permits(Some("staff")));
        assert!(gate.permits(Some("admin")));
        assert!(!gate.permits(Some("Staff")));
        assert!(!gate.permits(Some("staff ")));
        assert!(!gate.permits(Some("guest")));
    }

    #[test]
    fn test_missing_header_never_permitted() {
        assert!(!RoleGate::new(["staff"]).permits(None));
        assert!(!RoleGate::new([""]).permits(None));
        assert!(!RoleGate::new([""]).permits(Some("")));
    }

    #[test]
    fn test_empty_allow_list_denies_everything() {
        let gate = RoleGate::new(Vec::<String>::new());
        assert!(gate.allowed.is_empty());
        assert!(!gate.permits(Some("admin")));
    }

    #[test]
    fn test_allowed_request_is_forwarded_unchanged() {
        let gate = RoleGate::new(["staff"]);
        match gate.filter(request(Some("staff"))) {
            Outcome::Continue(req) => {
                assert_eq!(req.uri().path(), "/admin/status");
                assert_eq!(headers::member_type(req.headers()), Some("staff"));
            }
            Outcome::Reject(res) => panic!("unexpected reject: {}", res.status()),
        }
    }

    #[test]
    fn test_denied_request_is_rejected() {
        let gate = RoleGate::new(["admin"]);
        for member_type in [Some("staff"), None] {
            match gate.filter(request(member_type)) {
                Outcome::Reject(res) => assert_eq!(res.status(), StatusCode::UNAUTHORIZED),
                Outcome::Continue(_) => panic!("expected reject for {member_type:?}"),
            }
        }
    }
}
