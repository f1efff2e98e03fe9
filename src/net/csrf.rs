use std::fmt;

use tracing::trace;

use super::{PendingRequest, RequestInterceptor};

/// Header carrying the anti-forgery token on partial-update requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Hidden form field Django-style backends render the token under.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Server-issued anti-forgery token.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Extracts the token from a server-rendered page.
    ///
    /// Scans for the first `<input>` whose `name` attribute is [`CSRF_FIELD`]
    /// and returns its `value` attribute (empty when the attribute is
    /// missing). Pages without a protected form yield `None`.
    #[must_use]
    pub fn from_form_html(html: &str) -> Option<Self> {
        let mut rest = html;
        while let Some(start) = find_ascii_ci(rest, "<input") {
            let after = &rest[start + "<input".len()..];
            if !after.is_empty() && !starts_with_tag_boundary(after) {
                rest = after;
                continue;
            }
            let end = after.find('>').unwrap_or(after.len());
            let tag = after[..end].trim_end_matches('/');
            if attribute_value(tag, "name") == Some(CSRF_FIELD) {
                let value = attribute_value(tag, "value").unwrap_or("");
                return Some(Self::new(value));
            }
            rest = &after[end..];
        }
        None
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CsrfToken").field(&"<redacted>").finish()
    }
}

/// Injects the anti-forgery header into every request it sees.
///
/// Built with or without a token at construction. Without one it applies as
/// a silent no-op, so pages rendered without a protected form keep
/// dispatching untouched.
#[derive(Debug, Clone, Default)]
pub struct CsrfInterceptor {
    token: Option<CsrfToken>,
}

impl CsrfInterceptor {
    #[must_use]
    pub fn new(token: Option<CsrfToken>) -> Self {
        Self { token }
    }

    #[must_use]
    pub fn with_token(token: CsrfToken) -> Self {
        Self { token: Some(token) }
    }

    /// Builds the interceptor straight from a server-rendered page.
    #[must_use]
    pub fn from_page(html: &str) -> Self {
        Self {
            token: CsrfToken::from_form_html(html),
        }
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl RequestInterceptor for CsrfInterceptor {
    fn apply(&self, request: &mut PendingRequest) {
        let Some(token) = &self.token else {
            trace!(url = %request.url, "no csrf token configured, request left untouched");
            return;
        };
        request.set_header(CSRF_HEADER, token.value());
        trace!(url = %request.url, header = CSRF_HEADER, "attached csrf header");
    }
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn starts_with_tag_boundary(after_tag_name: &str) -> bool {
    after_tag_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
}

// Minimal left-to-right attribute walk; enough for server-rendered form
// markup. Quoted values are opaque, so a `name=` inside one cannot match.
fn attribute_value<'a>(tag: &'a str, wanted: &str) -> Option<&'a str> {
    let mut rest = tag;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let (name, after_name) = rest.split_at(name_end);
        let mut after = after_name.trim_start();
        let mut value = None;
        if let Some(stripped) = after.strip_prefix('=') {
            let stripped = stripped.trim_start();
            match stripped.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &stripped[1..];
                    let close = inner.find(quote)?;
                    value = Some(&inner[..close]);
                    after = &inner[close + 1..];
                }
                _ => {
                    let value_end = stripped
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(stripped.len());
                    value = Some(&stripped[..value_end]);
                    after = &stripped[value_end..];
                }
            }
        }
        if name.eq_ignore_ascii_case(wanted) {
            return value;
        }
        rest = after;
    }
}

#[cfg(test)]
mod tests {
    use super::{CsrfToken, attribute_value};

    #[test]
    fn attribute_walk_reads_quoted_values() {
        let tag = r#" type="hidden" name="csrfmiddlewaretoken" value="tok-1""#;
        assert_eq!(attribute_value(tag, "name"), Some("csrfmiddlewaretoken"));
        assert_eq!(attribute_value(tag, "value"), Some("tok-1"));
    }

    #[test]
    fn attribute_walk_ignores_names_inside_quoted_values() {
        let tag = r#" value="name=decoy" name="q""#;
        assert_eq!(attribute_value(tag, "name"), Some("q"));
    }

    #[test]
    fn scan_skips_non_input_tags_with_matching_prefix() {
        let html = r#"<inputgroup name="csrfmiddlewaretoken" value="x"></inputgroup>"#;
        assert!(CsrfToken::from_form_html(html).is_none());
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let token = CsrfToken::new("secret-value");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("redacted"));
    }
}
