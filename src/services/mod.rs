/*
 * Responsibility
 * - ドメインサービス (HTTP に依存しない処理)
 * - auth: bearer token の検証と member identity の抽出
 */
pub mod auth;
