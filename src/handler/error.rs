// Handler error module
// Declared errors for path-parameter validation

use thiserror::Error;

/// Errors produced while validating path parameters.
///
/// The original toy server fed unparsed path segments straight into the
/// computation (NaN arithmetic, unbounded recursion on negative input).
/// Here malformed and negative parameters are rejected up front with a
/// declared error that maps to a 400 response.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing path parameter `{name}`")]
    MissingParam { name: &'static str },

    #[error("invalid value `{value}` for path parameter `{name}` (expected a non-negative integer)")]
    InvalidParam { name: &'static str, value: String },
}
