use std::path::PathBuf;

use thiserror::Error;

use super::tokenizer::TokenType;

/// Everything that can abort a program run. None of these are recoverable
/// mid-execution: the run stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown token: {0}")]
    UnknownToken(String),
    #[error("Unexpected token: {found}{}", expected_suffix(.expected))]
    UnexpectedToken {
        found: String,
        expected: Option<TokenType>,
    },
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("Arithmetic fault: {0}")]
    Arithmetic(#[from] ArithmeticFault),
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(u64),
    #[error("Could not read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
}

impl Error {
    pub(crate) fn unexpected(found: impl std::fmt::Display) -> Self {
        Self::UnexpectedToken {
            found: found.to_string(),
            expected: None,
        }
    }
    pub(crate) fn expected(expected: TokenType, found: impl std::fmt::Display) -> Self {
        Self::UnexpectedToken {
            found: found.to_string(),
            expected: Some(expected),
        }
    }
}

fn expected_suffix(expected: &Option<TokenType>) -> String {
    match expected {
        Some(typ) => format!(" (expected {typ:?})"),
        None => String::new(),
    }
}
