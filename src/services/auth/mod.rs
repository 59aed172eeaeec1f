pub mod claims;
pub mod factory;
pub mod verifier;

pub use claims::{ClaimValue, Identity};
pub use factory::build_token_verifier;
pub use verifier::{AuthError, SigningSecret, TokenVerifier};
