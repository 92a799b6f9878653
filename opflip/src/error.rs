use crate::ast::Span;
use std::fmt;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
}

/// Error types for the opflip pipeline.
///
/// Parse failures surface before the rewriter ever runs; an unparse failure
/// is an internal-consistency condition that is never expected for a tree
/// the parser itself produced.
#[derive(Debug, Clone)]
pub enum OpflipError {
    /// Parse error with source location
    Parse(Box<ErrorDetails>),

    /// Mutated tree could not be rendered back to text
    Unparse(String),
}

impl OpflipError {
    /// Create a parse error with source location
    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
        }))
    }
}

impl fmt::Display for OpflipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpflipError::Parse(details) => {
                write!(
                    f,
                    "Parse error: {} at line {}, column {}",
                    details.message, details.span.line, details.span.col
                )
            }
            OpflipError::Unparse(msg) => write!(f, "Unparse error: {}", msg),
        }
    }
}

impl std::error::Error for OpflipError {}

impl From<std::fmt::Error> for OpflipError {
    fn from(err: std::fmt::Error) -> Self {
        OpflipError::Unparse(format!("Format error: {}", err))
    }
}
