/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - route group ごとに request filter の pipeline を決める
 *   - /health, /members/me: Authenticator
 *   - /admin/status: Authenticator → RoleGate
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{admin, health::health, members};
use crate::middleware::auth::{Authenticator, RoleGate};
use crate::middleware::pipeline::{self, Pipeline};

pub fn routes(authenticator: Authenticator, admin_gate: RoleGate) -> Router {
    let authenticated = Pipeline::new().with(authenticator.clone());
    let gated = Pipeline::new().with(authenticator).with(admin_gate);

    let member_routes = Router::new()
        .route("/health", get(health))
        .route("/members/me", get(members::me));

    let admin_routes = Router::new().route("/admin/status", get(admin::status));

    Router::new()
        .merge(pipeline::apply(member_routes, authenticated))
        .merge(pipeline::apply(admin_routes, gated))
}
