/*
 * Responsibility
 * - 認証 / 認可の request filter (Authenticator, RoleGate) と補助 (PathSkipper, trusted headers)
 */
pub mod authenticator;
pub mod headers;
pub mod role_gate;
pub mod skipper;

pub use authenticator::{Authenticator, FailurePolicy, UnknownFailurePolicy};
pub use role_gate::RoleGate;
pub use skipper::PathSkipper;
