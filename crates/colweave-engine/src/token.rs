//! Expanded template tokens.
//!
//! Parsing a template like `"born_{.year,.month}"` produces one [`Match`] per
//! sub-token. A match keeps the token as written (`original`), a working value
//! that later passes may rewrite (`value`), an optional display label from
//! `key=value` tokens, and a [`Payload`] of metadata for downstream consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Working value carried by a [`Match`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TokenValue {
    /// No token at all. Templates without placeholders expand to a single
    /// match holding this value.
    #[default]
    None,
    /// Integer produced by range expansion.
    Int(i64),
    /// Verbatim token text.
    Text(String),
}

impl TokenValue {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }

    /// Text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TokenValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Int(n) => write!(f, "{n}"),
            TokenValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        TokenValue::Text(text.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        TokenValue::Text(text)
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Int(n)
    }
}

/// How a value-derived column should be built when the caller supplies no
/// builder of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderKind {
    /// The token named an attribute of the source value (`.name`).
    Attribute,
    /// The token named a zero-argument method of the source value (`name!`).
    Method,
}

/// Metadata attached to a [`Match`] by transform passes.
///
/// An empty payload on every match of an argument dictionary is what allows
/// the column-store boundary to unpack raw values for builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Builder to fall back to when the caller passes none.
    pub default_builder: Option<BuilderKind>,
}

impl Payload {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_builder.is_none()
    }
}

/// One expanded template token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The token exactly as matched, before any rewriting.
    pub original: TokenValue,
    /// Working value; starts equal to `original` and may be rewritten by
    /// transform passes (for example `.year` becomes `year`).
    pub value: TokenValue,
    /// Display name used instead of `value` when rendering output names.
    /// Set for `key=value` tokens.
    pub label: Option<String>,
    /// Metadata consumed at the column-store boundary.
    pub payload: Payload,
}

impl Match {
    /// Plain token: `original` and `value` share the text.
    #[must_use]
    pub fn token(text: impl Into<String>) -> Self {
        let value = TokenValue::Text(text.into());
        Match {
            original: value.clone(),
            value,
            label: None,
            payload: Payload::default(),
        }
    }

    /// Integer token produced by range expansion.
    #[must_use]
    pub fn int(n: i64) -> Self {
        Match {
            original: TokenValue::Int(n),
            value: TokenValue::Int(n),
            label: None,
            payload: Payload::default(),
        }
    }

    /// `key=value` token. The full token is kept as `original`, the key
    /// becomes the label and the remainder the working value.
    #[must_use]
    pub fn keyed(
        original: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Match {
            original: TokenValue::Text(original.into()),
            value: TokenValue::Text(value.into()),
            label: Some(label.into()),
            payload: Payload::default(),
        }
    }

    /// Sentinel for templates without placeholders.
    #[must_use]
    pub fn templateless() -> Self {
        Match {
            original: TokenValue::None,
            value: TokenValue::None,
            label: None,
            payload: Payload::default(),
        }
    }

    /// Name this match contributes to a rendered output-column name: the
    /// label when one is present and non-empty, otherwise the value.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => self.value.to_string(),
        }
    }
}
