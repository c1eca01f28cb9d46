//! Match enrichment passes.
//!
//! After parsing, every [`Match`] runs through a [`TransformPipeline`]. The
//! default pipeline recognizes attribute tokens (`.year`) and method tokens
//! (`lower!`): it strips the marker, rewrites the working value to the bare
//! name and tags the payload with the corresponding [`BuilderKind`]. Numeric
//! tokens pass through untouched so range artifacts keep their meaning.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::error::ExpandError;
use crate::token::{BuilderKind, Match, TokenValue};

/// True when `text` parses as a real or complex number literal.
fn is_number(text: &str) -> bool {
    text.parse::<f64>().is_ok() || text.parse::<Complex64>().is_ok()
}

/// A single enrichment pass over one [`Match`].
pub trait MatchTransform: fmt::Debug + Send + Sync {
    fn transform(&self, m: Match) -> Result<Match, ExpandError>;
}

/// Recognizes `.name` tokens: strips the leading dot and tags the payload
/// with [`BuilderKind::Attribute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyTransform;

impl MatchTransform for PropertyTransform {
    fn transform(&self, mut m: Match) -> Result<Match, ExpandError> {
        let Some(text) = m.value.as_text() else {
            return Ok(m);
        };
        if let Some(rest) = text.strip_prefix('.') {
            // ".2" could be a decimal or the attribute "2"; refuse to guess.
            if is_number(rest) {
                return Err(ExpandError::AmbiguousToken {
                    token: text.to_string(),
                    detail: format!("`{rest}` reads as a number, not an attribute name"),
                });
            }
            if rest.ends_with('!') {
                return Err(ExpandError::AmbiguousToken {
                    token: text.to_string(),
                    detail: "a name cannot be both an attribute and a method".to_string(),
                });
            }
        }
        if is_number(text) {
            return Ok(m);
        }
        let Some(rest) = text.strip_prefix('.') else {
            return Ok(m);
        };
        let stripped = rest.to_string();
        m.value = TokenValue::Text(stripped);
        m.payload.default_builder = Some(BuilderKind::Attribute);
        Ok(m)
    }
}

/// Recognizes `name!` tokens: strips the trailing bang and tags the payload
/// with [`BuilderKind::Method`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodTransform;

impl MatchTransform for MethodTransform {
    fn transform(&self, mut m: Match) -> Result<Match, ExpandError> {
        let Some(text) = m.value.as_text() else {
            return Ok(m);
        };
        if let Some(rest) = text.strip_suffix('!') {
            if is_number(rest) {
                return Err(ExpandError::AmbiguousToken {
                    token: text.to_string(),
                    detail: format!("`{rest}` reads as a number, not a method name"),
                });
            }
            if text.starts_with('.') {
                return Err(ExpandError::AmbiguousToken {
                    token: text.to_string(),
                    detail: "a name cannot be both an attribute and a method".to_string(),
                });
            }
        }
        if is_number(text) {
            return Ok(m);
        }
        let Some(rest) = text.strip_suffix('!') else {
            return Ok(m);
        };
        let stripped = rest.to_string();
        m.value = TokenValue::Text(stripped);
        m.payload.default_builder = Some(BuilderKind::Method);
        Ok(m)
    }
}

/// Ordered composition of transform passes.
///
/// Passes run left to right over each match and the first error wins. The
/// default pipeline is property detection, then method detection.
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    passes: Vec<Arc<dyn MatchTransform>>,
}

impl TransformPipeline {
    #[must_use]
    pub fn new(passes: Vec<Arc<dyn MatchTransform>>) -> Self {
        TransformPipeline { passes }
    }

    /// Runs every pass over `m`, threading the result through.
    pub fn transform(&self, m: Match) -> Result<Match, ExpandError> {
        self.passes.iter().try_fold(m, |m, pass| pass.transform(m))
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        TransformPipeline::new(vec![Arc::new(PropertyTransform), Arc::new(MethodTransform)])
    }
}

impl MatchTransform for TransformPipeline {
    fn transform(&self, m: Match) -> Result<Match, ExpandError> {
        TransformPipeline::transform(self, m)
    }
}
