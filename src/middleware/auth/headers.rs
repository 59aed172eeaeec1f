//! Trusted identity headers.
//!
//! Only the authenticator writes these. Anything a caller sent under the same names is
//! removed before the token is looked at, so downstream code can rely on their presence
//! meaning "verified".

use axum::http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};

use crate::services::auth::Identity;

pub const MEMBER_ID_HEADER: &str = "x-member-id";
pub const MEMBER_TYPE_HEADER: &str = "x-member-type";

pub fn strip(headers: &mut HeaderMap) {
    headers.remove(MEMBER_ID_HEADER);
    headers.remove(MEMBER_TYPE_HEADER);
}

/// Overwrite both headers (every previous value is dropped, not merged).
pub fn write_identity(headers: &mut HeaderMap, identity: &Identity) -> Result<(), InvalidHeaderValue> {
    let member_id = HeaderValue::from_str(&identity.member_id)?;
    let member_type = HeaderValue::from_str(&identity.member_type)?;

    headers.insert(MEMBER_ID_HEADER, member_id);
    headers.insert(MEMBER_TYPE_HEADER, member_type);
    Ok(())
}

pub fn member_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(MEMBER_TYPE_HEADER).and_then(|v| v.to_str().ok())
}

pub fn identity(headers: &HeaderMap) -> Option<Identity> {
    let member_id = headers.get(MEMBER_ID_HEADER)?.to_str().ok()?;
    let member_type = member_type(headers)?;
    Some(Identity::new(member_id, member_type))
}
