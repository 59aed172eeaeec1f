/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → verifier / filter 生成 → Router 組み立て
 * - HTTP middleware (request id / trace / limit / timeout) の適用
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware::{self, auth::Authenticator, auth::RoleGate},
    services::auth::build_token_verifier,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,member_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        skip_paths = ?config.auth_skip_paths,
        failure_policy = ?config.auth_failure_policy,
        "starting member-gate"
    );

    let app = build_router(&config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Full application router: `/api/v1` routes behind their filter pipelines, wrapped in the
/// HTTP-level layers.
pub fn build_router(config: &Config) -> Router {
    let verifier = build_token_verifier(config);

    let authenticator = Authenticator::new(verifier, config.auth_skip_paths.iter().cloned())
        .with_failure_policy(config.auth_failure_policy);
    let admin_gate = RoleGate::new(config.admin_member_types.iter().cloned());

    let router = Router::new().nest("/api/v1", api::v1::routes(authenticator, admin_gate));

    middleware::http::apply(router, config)
}
