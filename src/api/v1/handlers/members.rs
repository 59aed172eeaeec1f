/*
 * Responsibility
 * - GET /members/me
 * - trusted headers の identity をそのまま返す (未認証なら extractor が 401)
 */
use axum::Json;

use crate::api::v1::extractors::{MemberCtx, MemberCtxExtractor};

pub async fn me(MemberCtxExtractor(member): MemberCtxExtractor) -> Json<MemberCtx> {
    Json(member)
}
