use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::claims::{ClaimValue, Identity, MEMBER_ID_CLAIM, MEMBER_TYPE_CLAIM};

/// HMAC family only. Anything else is refused before the signature is looked at.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

// Reasons a bearer token did not yield an identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("malformed token")]
    MalformedToken,
    #[error("unsupported signing algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("unexpected '{0}' claim")]
    ClaimMismatch(&'static str),
    #[error("missing or unrecognized '{0}' claim")]
    MissingClaim(&'static str),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer => Self::ClaimMismatch("iss"),
            ErrorKind::InvalidAudience => Self::ClaimMismatch("aud"),
            ErrorKind::MissingRequiredClaim(claim) => match claim.as_str() {
                "iss" => Self::MissingClaim("iss"),
                "aud" => Self::MissingClaim("aud"),
                _ => Self::MalformedToken,
            },
            _ => Self::MalformedToken,
        }
    }
}

/// Shared HMAC key. Key material is not printable via Debug.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(***)")
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// HMAC access-token verifier.
///
/// Built once at startup and shared (`Arc`) by every request; `verify` is a pure function of
/// the header value, the captured secret and the clock.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &SigningSecret, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // exp / nbf are checked when present, never required.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Pin `iss`. Tokens without the claim are refused once pinned.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    /// Pin `aud`. Tokens without the claim are refused once pinned.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.validation.required_spec_claims.insert("aud".to_string());
        self
    }

    /// Verify a raw `Authorization` header value and extract the member identity.
    ///
    /// The first `"Bearer "` is stripped; without it the whole value is treated as the token.
    pub fn verify(&self, raw_header_value: &str) -> Result<Identity, AuthError> {
        let token = raw_header_value.replacen("Bearer ", "", 1);

        let alg = peek_algorithm(&token)?;
        if !is_hmac(&alg) {
            return Err(AuthError::UnsupportedAlgorithm(alg));
        }

        let data = jsonwebtoken::decode::<Map<String, Value>>(
            &token,
            &self.decoding_key,
            &self.validation,
        )?;

        let member_id = required_claim(&data.claims, MEMBER_ID_CLAIM)?;
        let member_type = required_claim(&data.claims, MEMBER_TYPE_CLAIM)?;

        Ok(Identity {
            member_id,
            member_type,
        })
    }
}

/// Read the header `alg` without trusting anything else in the token.
fn peek_algorithm(token: &str) -> Result<String, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, _payload, _signature] = segments.as_slice() else {
        return Err(AuthError::MalformedToken);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::MalformedToken)?;
    let header: RawHeader =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    Ok(header.alg)
}

fn is_hmac(alg: &str) -> bool {
    matches!(alg, "HS256" | "HS384" | "HS512")
}

fn required_claim(claims: &Map<String, Value>, name: &'static str) -> Result<String, AuthError> {
    claims
        .get(name)
        .and_then(ClaimValue::from_json)
        .and_then(|v| v.canonical())
        .ok_or(AuthError::MissingClaim(name))
}
