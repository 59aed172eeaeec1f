/*!
 * Member context extractor
 *
 * Responsibility:
 * - Authenticator が書いた trusted headers から MemberCtx を handler に提供する
 * - 型定義は types、axum 依存は core
 *
 * Public API:
 * - MemberCtx
 * - MemberCtxExtractor
 */

mod core;
mod types;

pub use self::core::MemberCtxExtractor;
pub use types::MemberCtx;
