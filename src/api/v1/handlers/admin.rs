/*
 * Responsibility
 * - GET /admin/status
 * - RoleGate (ADMIN_MEMBER_TYPES) の後ろに置かれる handler
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::MemberCtxExtractor;

pub async fn status(MemberCtxExtractor(member): MemberCtxExtractor) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "member": member,
    }))
}
