use crate::common::{Count, Int};
use crate::parse::ParseError;

/// The only way a roll can fail: the expression is not something we know how to roll.
///
/// The offending text is kept so callers can echo it back to whoever typed it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("invalid dice pattern {expression:?}: {reason}")]
    InvalidExpression {
        expression: String,
        reason: InvalidReason,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("{0}")]
    Syntax(#[from] ParseError),
    #[error("cannot roll {count} dice at once (limit is {max})")]
    TooManyDice { count: Count, max: Count },
    #[error("total is too large")]
    Overflow,
    #[error("range start {low} is greater than range end {high}")]
    InvertedRange { low: Int, high: Int },
}

impl RollError {
    pub fn invalid(expression: impl Into<String>, reason: impl Into<InvalidReason>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// The input that failed to roll.
    pub fn expression(&self) -> &str {
        match self {
            Self::InvalidExpression { expression, .. } => expression,
        }
    }

    pub fn reason(&self) -> &InvalidReason {
        match self {
            Self::InvalidExpression { reason, .. } => reason,
        }
    }
}
