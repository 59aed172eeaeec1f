//! Bearer-token authentication and member-type gating for axum services.
//!
//! - [`services::auth::TokenVerifier`] verifies an HMAC-signed token and extracts the
//!   member [`Identity`](services::auth::Identity).
//! - [`middleware::auth::Authenticator`] republishes that identity as the trusted
//!   `x-member-id` / `x-member-type` headers.
//! - [`middleware::auth::RoleGate`] admits requests whose `x-member-type` is on an
//!   allow-list.
//! - [`middleware::pipeline::Pipeline`] chains those filters in a fixed order on a Router.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
