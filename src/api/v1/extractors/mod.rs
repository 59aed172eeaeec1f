pub mod member_ctx;

pub use member_ctx::{MemberCtx, MemberCtxExtractor};
