#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use member_gate::{app, config::Config};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Config with a known secret; `overrides` are applied on top of the defaults.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("AUTH_SECRET".to_string(), SECRET.to_string());
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn test_app(overrides: &[(&str, &str)]) -> Router {
    app::build_router(&test_config(overrides))
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn sign(secret: &str, claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(claims: &Value) -> String {
    format!("Bearer {}", sign(SECRET, claims))
}

pub fn request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, authorization: &str) -> Request<Body> {
    request(uri, &[(header::AUTHORIZATION.as_str(), authorization)])
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub async fn json_body(res: Response<Body>) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
