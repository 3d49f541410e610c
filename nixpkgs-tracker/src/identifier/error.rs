//! Identifier error types.

use thiserror::Error;

/// Errors that can occur while normalizing user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The input did not contain a usable pull request number.
    #[error("'{input}' is not a pull request number or URL")]
    Invalid { input: String },
}
