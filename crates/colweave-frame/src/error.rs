use thiserror::Error;

use colweave_engine::ExpandError;

/// Errors surfaced at the column-store boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The named column does not exist.
    #[error("column `{name}` not found")]
    UnknownColumn { name: String },

    /// Columns in one frame must share their length.
    #[error("column `{name}` has {len} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    /// Attribute access on a value that has no such attribute.
    #[error("{kind} value has no attribute `{name}`")]
    UnknownAttribute { kind: &'static str, name: String },

    /// Method access on a value that has no such method.
    #[error("{kind} value has no method `{name}`")]
    UnknownMethod { kind: &'static str, name: String },

    /// A builder needed text input.
    #[error("expected text, got {kind}")]
    NotText { kind: &'static str },

    /// A split produced fewer pieces than the requested index.
    #[error("split of `{text}` has no piece {index}")]
    MissingPiece { text: String, index: usize },

    /// No builder was given and the matches carry no default-builder tag.
    #[error("no column builder given and the template implies none")]
    NoDefaultBuilder,

    /// Template expansion failed.
    #[error(transparent)]
    Expand(#[from] ExpandError),
}
