/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    let mut verifier = TokenVerifier::new(&config.auth_secret, config.access_token_leeway_seconds);

    if let Some(issuer) = config.auth_issuer.as_deref() {
        verifier = verifier.with_issuer(issuer);
    }
    if let Some(audience) = config.auth_audience.as_deref() {
        verifier = verifier.with_audience(audience);
    }

    Arc::new(verifier)
}
