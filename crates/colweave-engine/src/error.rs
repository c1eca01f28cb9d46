use thiserror::Error;

/// Errors produced while parsing or expanding a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// The template contains a `{` or `}` outside any recognized placeholder.
    #[error("template `{template}` has a stray brace outside a placeholder")]
    MalformedTemplate { template: String },

    /// A range token did not split into `start:end` or `start:end:step`.
    #[error("range `{token}` must be of the form `start:end` or `start:end:step`")]
    InvalidRangeFormat { token: String },

    /// A range bound or step that does not parse as an acceptable integer.
    /// Bounds must be non-negative; the step must be at least 1.
    #[error("range `{token}`: `{bound}` is not a valid bound")]
    InvalidRangeBound { token: String, bound: String },

    /// A token that cannot be disambiguated into attribute or method access.
    #[error("token `{token}` is ambiguous: {detail}")]
    AmbiguousToken { token: String, detail: String },
}
