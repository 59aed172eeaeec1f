/*
 * Responsibility
 * - Handler から見える「認証済み member」の型
 *
 * Notes
 * - token の検証は Authenticator (middleware) の責務。ここは header から組み立てるだけ
 */
use serde::Serialize;

use crate::services::auth::Identity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCtx {
    pub member_id: String,
    pub member_type: String,
}

impl From<Identity> for MemberCtx {
    fn from(identity: Identity) -> Self {
        Self {
            member_id: identity.member_id,
            member_type: identity.member_type,
        }
    }
}
