use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::middleware::auth::headers;

use super::MemberCtx;

/// Handler で MemberCtx を受け取るための extractor
/// Authenticator が x-member-id / x-member-type を書いている前提
/// 見つからない場合は 401 を返す (passthrough で未認証のまま届いたリクエスト)
pub struct MemberCtxExtractor(pub MemberCtx);

impl<S> FromRequestParts<S> for MemberCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        headers::identity(&parts.headers)
            .map(|identity| MemberCtxExtractor(identity.into()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};

    async fn extract(req: Request<Body>) -> Result<MemberCtx, StatusCode> {
        let (mut parts, _body) = req.into_parts();
        MemberCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .map(|MemberCtxExtractor(ctx)| ctx)
    }

    #[tokio::test]
    async fn test_extracts_member_from_trusted_headers() {
        let req = Request::builder()
            .header(headers::MEMBER_ID_HEADER, "42")
            .header(headers::MEMBER_TYPE_HEADER, "staff")
            .body(Body::empty())
            .unwrap();

        let ctx = extract(req).await.unwrap();
        assert_eq!(ctx.member_id, "42");
        assert_eq!(ctx.member_type, "staff");
    }

    #[tokio::test]
    async fn test_missing_headers_is_unauthorized() {
        let req = Request::builder()
            .header(headers::MEMBER_TYPE_HEADER, "staff")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract(req).await, Err(StatusCode::UNAUTHORIZED));
    }
}
