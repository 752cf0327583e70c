//! API key injection into the dashboard HTML.
//!
//! The dashboard reads its key from `window.process.env.API_KEY`. The
//! injection splices a script tag that sets that global right after the
//! first literal `<head>` in the page. There is no HTML parsing: a page
//! without `<head>` is returned unchanged and never sees the key.

use serde::{Deserialize, Serialize};

/// The literal marker the snippet is inserted after.
pub const HEAD_OPEN: &str = "<head>";

/// How the secret is written into the script snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// Spliced verbatim between double quotes.
    ///
    /// A secret containing `"`, `\` or `</script>` produces a broken or
    /// hijacked script. Kept for byte compatibility with existing
    /// deployments; prefer [`SecretEncoding::Json`].
    Literal,
    /// Encoded as a JSON string literal with `<`, `>` and `&` escaped, so
    /// the value can never leave the string or the script element.
    #[default]
    Json,
}

impl SecretEncoding {
    /// Parse `literal` or `json` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "literal" | "raw" => Some(Self::Literal),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// The quoted JavaScript string expression for `secret`.
    #[must_use]
    pub fn quote(self, secret: &str) -> String {
        match self {
            Self::Literal => format!("\"{secret}\""),
            Self::Json => script_safe_json(&serde_json::Value::String(secret.to_owned())),
        }
    }
}

/// Serialize `value` as JSON that is safe to embed inside a `<script>`
/// element.
#[must_use]
pub fn script_safe_json(value: &serde_json::Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

/// The script tag that publishes `secret` as `window.process.env.API_KEY`.
#[must_use]
pub fn script_snippet(secret: &str, encoding: SecretEncoding) -> String {
    format!(
        "<script>window.process = {{ env: {{ API_KEY: {} }} }};</script>",
        encoding.quote(secret)
    )
}

/// Result of splicing the snippet into a page.
#[derive(Clone, PartialEq, Eq)]
pub struct Injected {
    /// The page text, with the snippet if a `<head>` was found.
    pub html: String,
    /// Whether the snippet was inserted.
    pub injected: bool,
}

impl std::fmt::Debug for Injected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injected")
            .field("len", &self.html.len())
            .field("injected", &self.injected)
            .finish()
    }
}

/// Insert the snippet for `secret` immediately after the first `<head>`.
///
/// Only the first occurrence is touched; the match is case-sensitive and
/// literal, so `<HEAD>` or `<head lang="en">` do not match.
#[must_use]
pub fn inject(html: &str, secret: &str, encoding: SecretEncoding) -> Injected {
    let Some(pos) = html.find(HEAD_OPEN) else {
        return Injected {
            html: html.to_owned(),
            injected: false,
        };
    };

    let split = pos + HEAD_OPEN.len();
    let snippet = script_snippet(secret, encoding);
    let mut result = String::with_capacity(html.len() + snippet.len());
    result.push_str(&html[..split]);
    result.push_str(&snippet);
    result.push_str(&html[split..]);

    Injected {
        html: result,
        injected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<head></head><body>hi</body>";

    #[test]
    fn reference_page_and_key() {
        let expected = "<head><script>window.process = { env: { API_KEY: \"ABC\" } };</script></head><body>hi</body>";
        for encoding in [SecretEncoding::Literal, SecretEncoding::Json] {
            let out = inject(PAGE, "ABC", encoding);
            assert!(out.injected);
            assert_eq!(out.html, expected);
        }
    }

    #[test]
    fn secret_follows_first_head_for_any_value() {
        for secret in ["", "ABC", "sk-123_xyz", "ключ", "a b c"] {
            let out = inject(PAGE, secret, SecretEncoding::Literal);
            let prefix = format!("<head>{}", script_snippet(secret, SecretEncoding::Literal));
            assert!(out.html.starts_with(&prefix), "secret {secret:?}");
            assert!(out.html.contains(secret));
        }
    }

    #[test]
    fn empty_secret_is_injected_as_empty_string() {
        let out = inject(PAGE, "", SecretEncoding::Json);
        assert!(out.html.contains("API_KEY: \"\""));
    }

    #[test]
    fn only_first_head_is_touched() {
        let html = "<head></head><template><head></head></template>";
        let out = inject(html, "K", SecretEncoding::Json);
        assert_eq!(out.html.matches("<script>").count(), 1);
        assert!(out.html.ends_with("<template><head></head></template>"));
    }

    #[test]
    fn missing_head_leaves_page_unchanged() {
        let html = "<HEAD></HEAD><body>hi</body>";
        let out = inject(html, "ABC", SecretEncoding::Json);
        assert!(!out.injected);
        assert_eq!(out.html, html);
    }

    #[test]
    fn injection_is_idempotent_across_runs() {
        let a = inject(PAGE, "ABC", SecretEncoding::Json);
        let b = inject(PAGE, "ABC", SecretEncoding::Json);
        assert_eq!(a, b);
    }

    #[test]
    fn literal_encoding_breaks_on_double_quote() {
        // Known defect of the literal splice: the quote closes the string
        // early and the remainder becomes stray script tokens.
        let out = inject(PAGE, "ab\"cd", SecretEncoding::Literal);
        assert!(out.html.contains("API_KEY: \"ab\"cd\""));
    }

    #[test]
    fn literal_encoding_can_close_the_script_element() {
        let out = inject(PAGE, "</script><b>x", SecretEncoding::Literal);
        assert_eq!(out.html.matches("</script>").count(), 2);
    }

    #[test]
    fn json_encoding_keeps_hostile_values_inside_the_string() {
        let out = inject(PAGE, "ab\"cd</script>&", SecretEncoding::Json);
        assert!(out.html.contains(r#"API_KEY: "ab\"cd\u003c/script\u003e\u0026""#));
        assert_eq!(out.html.matches("</script>").count(), 1);
    }

    #[test]
    fn parse_encoding_names() {
        assert_eq!(SecretEncoding::parse("JSON"), Some(SecretEncoding::Json));
        assert_eq!(SecretEncoding::parse("literal"), Some(SecretEncoding::Literal));
        assert_eq!(SecretEncoding::parse("base64"), None);
    }
}
