//! Quiz engine error types.
//!
//! Guards on the session operations never fail; these errors only arise
//! when a session or a result policy is constructed from bad input.

use thiserror::Error;

/// Errors that can occur when building a quiz session or result policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// A session needs at least one question.
    #[error("question bank is empty")]
    EmptyQuestionBank,

    /// The result tier table cannot classify every percentage.
    #[error("invalid result policy: {0}")]
    InvalidPolicy(String),
}

impl QuizError {
    /// Returns `true` if the error comes from the result policy rather than the questions.
    pub fn is_policy_error(&self) -> bool {
        matches!(self, QuizError::InvalidPolicy(_))
    }
}
