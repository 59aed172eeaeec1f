/*
 * Responsibility
 * - 環境変数の読み込み (AUTH_SECRET, skip paths, failure policy など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::middleware::auth::FailurePolicy;
use crate::services::auth::SigningSecret;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Token verification
    pub auth_secret: SigningSecret,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,

    // Request filters
    pub auth_skip_paths: Vec<String>,
    pub auth_failure_policy: FailurePolicy,
    pub admin_member_types: Vec<String>,

    pub http_timeout_seconds: u64,
    pub http_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. `from_env` is this over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let auth_secret = lookup("AUTH_SECRET").ok_or(ConfigError::Missing("AUTH_SECRET"))?;
        if auth_secret.is_empty() {
            return Err(ConfigError::Invalid("AUTH_SECRET"));
        }
        let auth_secret = SigningSecret::new(auth_secret);

        let auth_issuer = lookup("AUTH_ISSUER").filter(|s| !s.trim().is_empty());
        let auth_audience = lookup("AUTH_AUDIENCE").filter(|s| !s.trim().is_empty());

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let auth_skip_paths = lookup("AUTH_SKIP_PATHS")
            .map(|v| comma_list(&v))
            .unwrap_or_else(|| vec!["/health".to_string()]);

        let auth_failure_policy = match lookup("AUTH_FAILURE_POLICY") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("AUTH_FAILURE_POLICY"))?,
            None => FailurePolicy::default(),
        };

        let admin_member_types = lookup("ADMIN_MEMBER_TYPES")
            .map(|v| comma_list(&v))
            .unwrap_or_else(|| vec!["admin".to_string()]);

        let http_timeout_seconds = lookup("HTTP_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(30);

        let http_body_limit_bytes = lookup("HTTP_BODY_LIMIT_BYTES")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            auth_secret,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            auth_skip_paths,
            auth_failure_policy,
            admin_member_types,
            http_timeout_seconds,
            http_body_limit_bytes,
        })
    }
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("AUTH_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.auth_skip_paths, vec!["/health"]);
        assert_eq!(config.auth_failure_policy, FailurePolicy::Passthrough);
        assert_eq!(config.admin_member_types, vec!["admin"]);
        assert_eq!(config.access_token_leeway_seconds, 0);
        assert_eq!(config.auth_issuer, None);
        assert_eq!(config.http_timeout_seconds, 30);
        assert_eq!(config.http_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn test_secret_is_required() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing("AUTH_SECRET"));
        assert_eq!(
            config(&[("AUTH_SECRET", "")]).unwrap_err(),
            ConfigError::Invalid("AUTH_SECRET")
        );
    }

    #[test]
    fn test_lists_are_trimmed_and_filtered() {
        let config = config(&[
            ("AUTH_SECRET", "s3cret"),
            ("AUTH_SKIP_PATHS", " /health , /docs,, "),
            ("ADMIN_MEMBER_TYPES", "admin,staff"),
        ])
        .unwrap();
        assert_eq!(config.auth_skip_paths, vec!["/health", "/docs"]);
        assert_eq!(config.admin_member_types, vec!["admin", "staff"]);
    }

    #[test]
    fn test_failure_policy_and_env() {
        let config = config(&[
            ("AUTH_SECRET", "s3cret"),
            ("AUTH_FAILURE_POLICY", "reject"),
            ("APP_ENV", "prod"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.auth_failure_policy, FailurePolicy::Reject);
        assert!(config.app_env.is_production());
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn test_invalid_values() {
        for policy in ["sometimes", "strict", "soft"] {
            assert_eq!(
                config(&[("AUTH_SECRET", "s"), ("AUTH_FAILURE_POLICY", policy)]).unwrap_err(),
                ConfigError::Invalid("AUTH_FAILURE_POLICY")
            );
        }
        assert_eq!(
            config(&[("AUTH_SECRET", "s"), ("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            config(&[("AUTH_SECRET", "s"), ("ACCESS_TOKEN_LEEWAY_SECONDS", "-1")]).unwrap_err(),
            ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS")
        );
    }

    #[test]
    fn test_blank_issuer_is_unset() {
        let config = config(&[("AUTH_SECRET", "s"), ("AUTH_ISSUER", "  ")]).unwrap();
        assert_eq!(config.auth_issuer, None);
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = config(&[("AUTH_SECRET", "do-not-print")]).unwrap();
        assert!(!format!("{config:?}").contains("do-not-print"));
    }
}
