//! Output sanitizers for the URL, CSS and HTML-text boundaries.
//!
//! None of these fail. Untrusted input that does not pass a check is replaced by
//! a fixed innocuous value so that rendering carries on and only the offending
//! fragment degrades.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Returned in place of any URL whose scheme is not allowed.
pub const FAILED_SANITIZATION_URL: &str = "about:invalid#WeftFailedSanitizationURL";

/// Replaces a CSS property name that failed validation.
pub const INNOCUOUS_PROPERTY_NAME: &str = "zWeftUnsafeCSSPropertyName";

/// Replaces a CSS property value that failed validation.
pub const INNOCUOUS_PROPERTY_VALUE: &str = "zWeftUnsafeCSSPropertyValue";

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

static CSS_PROPERTY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[a-zA-Z][a-zA-Z0-9-]*$").expect("valid property regex"));

const BLOCKED_PROPERTIES: [&str; 2] = ["behavior", "-moz-binding"];
const BLOCKED_VALUE_TOKENS: [&str; 4] = ["expression(", "url(", "javascript:", "/*"];

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A URL safe to place in an `href`/`src` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeUrl(String);

impl SafeUrl {
    /// Wrap `url` without any check. Trusted call sites only.
    pub fn from_trusted(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn failed() -> Self {
        Self(FAILED_SANITIZATION_URL.to_string())
    }

    pub fn is_failed(&self) -> bool {
        self.0 == FAILED_SANITIZATION_URL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitize a URL destined for an attribute.
///
/// A colon appearing before any slash marks a scheme, which must be `http`,
/// `https` or `mailto` (any case). Anything else becomes
/// [`FAILED_SANITIZATION_URL`]. Relative URLs pass through unchanged.
pub fn sanitize_url(raw: &str) -> SafeUrl {
    if let Some(colon) = raw.find(':') {
        let scheme = &raw[..colon];
        if !scheme.contains('/')
            && !ALLOWED_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
        {
            debug!(scheme = %scheme, "rejected url scheme");
            return SafeUrl::failed();
        }
    }
    SafeUrl(raw.to_string())
}

/// A single terminated CSS declaration (`prop:value;`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SafeCss(String);

impl SafeCss {
    /// Wrap already-trusted CSS text, e.g. a compiled rule body.
    pub fn from_trusted(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitize one CSS declaration, always producing `property:value;`.
pub fn sanitize_css(property: &str, value: &str) -> SafeCss {
    let property = sanitize_css_property(property);
    let value = sanitize_css_value(value);
    SafeCss(format!("{property}:{value};"))
}

fn sanitize_css_property(property: &str) -> String {
    let property = property.trim();
    let lowered = property.to_ascii_lowercase();
    if !CSS_PROPERTY_NAME.is_match(property) || BLOCKED_PROPERTIES.contains(&lowered.as_str()) {
        debug!(property = %property, "rejected css property name");
        return INNOCUOUS_PROPERTY_NAME.to_string();
    }
    lowered
}

fn sanitize_css_value(value: &str) -> String {
    let value = value.trim();
    let lowered = value.to_ascii_lowercase();
    let has_blocked_char = value
        .chars()
        .any(|ch| ch.is_control() || matches!(ch, '<' | '>' | '"' | '\'' | '\\' | ';' | '{' | '}'));
    let has_blocked_token = BLOCKED_VALUE_TOKENS
        .iter()
        .any(|token| lowered.contains(token));
    if value.is_empty() || has_blocked_char || has_blocked_token {
        debug!(value = %value, "rejected css property value");
        return INNOCUOUS_PROPERTY_VALUE.to_string();
    }
    value.to_string()
}
