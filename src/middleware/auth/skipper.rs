/*
 * Responsibility
 * - 認証をスキップするパスの判定 (substring match)
 * - ルールは構築時に固定、以後は読み取りのみ
 */

/// Decides whether a request bypasses authentication.
///
/// A request is skipped when its raw URI (path and query) contains any configured pattern
/// as a substring. Patterns are not prefixes or globs: `"/health"` also matches
/// `/api/v1/health` and `/metrics?probe=/health`.
#[derive(Debug, Clone, Default)]
pub struct PathSkipper {
    patterns: Vec<String>,
}

impl PathSkipper {
    pub fn new<I, T>(patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        // An empty pattern is a substring of every URI.
        let patterns = patterns
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();

        Self { patterns }
    }

    pub fn should_skip(&self, request_uri: &str) -> bool {
        self.patterns.iter().any(|p| request_uri.contains(p.as_str()))
    }
}
