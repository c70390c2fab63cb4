//! Free-text input sanitization.
//!
//! This is a client-side normalizer only. Anything downstream must still use
//! parameterized queries and output encoding; stripping patterns here does not
//! make a value safe to splice into SQL or HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

// Quotes, statement terminators, comment delimiters, stored procedure prefixes
static SQL_PATTERN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)--|/\*|\*/|;|'|"|\b(?:xp|sp)_"#).expect("sql pattern regex")
});

/// Strip HTML-like tags and SQL injection markers, then trim
pub fn sanitize_input(value: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(value, "");
    let without_sql = SQL_PATTERN_REGEX.replace_all(&without_tags, "");
    without_sql.trim().to_string()
}
