/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Authenticator / RoleGate (request filter)
 * - pipeline: filter chain と Router への適用
 * - http: request id / tracing / body limit / timeout
 */
pub mod auth;
pub mod http;
pub mod pipeline;
