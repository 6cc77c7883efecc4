//! Unified error handling for the Mica front end.
//!
//! The scanner never aborts on bad input; it hands every lexical error to an
//! injected [`DiagnosticSink`] and keeps going. [`ErrorReporter`] is the
//! standard sink: it accumulates diagnostics so the caller can decide after
//! the scan whether to continue with downstream processing.

use codespan_reporting::diagnostic::Diagnostic;
use thiserror::Error;

/// A lexical error, tied to the 1-based source line where it was detected.
///
/// These are the only two error conditions the scanner can produce. Both are
/// recoverable: scanning resumes at the next unconsumed character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character.")]
    UnexpectedCharacter { line: usize },

    #[error("Unterminated string.")]
    UnterminatedString { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line } => *line,
            LexError::UnterminatedString { line } => *line,
        }
    }

    /// Convert into a renderable diagnostic. The sink interface carries a
    /// line number rather than a byte span, so the position travels as a
    /// note instead of a source label.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.to_string())
            .with_notes(vec![format!("[line {}]", self.line())])
    }
}

/// Front-end error type covering the scanner and the I/O around it.
#[derive(Error, Debug, Clone)]
pub enum MicaError {
    #[error("lexical error")]
    Lexer(#[from] LexError),

    #[error("file error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MicaError {
    fn from(e: std::io::Error) -> Self {
        MicaError::Io(e.to_string())
    }
}

pub type MicaResult<T> = Result<T, MicaError>;

/// Capability the scanner reports lexical errors through.
///
/// The scanner calls [`report`](DiagnosticSink::report) zero or more times
/// per scan and never inspects the outcome; ownership and inspection of the
/// collected diagnostics belong to the caller.
pub trait DiagnosticSink {
    fn report(&mut self, error: LexError);
}

/// Accumulating sink shared by the CLI, the driver, and the tests.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<LexError>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any diagnostic was reported since construction (or the last
    /// [`clear`](ErrorReporter::clear)).
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    /// Reset to a clean state. The REPL does this between lines so one bad
    /// entry does not poison the rest of the session.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for ErrorReporter {
    fn report(&mut self, error: LexError) {
        log::debug!("reported: {} [line {}]", error, error.line());
        self.diagnostics.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LexError::UnexpectedCharacter { line: 3 };
        assert_eq!(err.to_string(), "Unexpected character.");
        assert_eq!(err.line(), 3);

        let err = LexError::UnterminatedString { line: 7 };
        assert_eq!(err.to_string(), "Unterminated string.");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_reporter_accumulates_and_clears() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.had_error());

        reporter.report(LexError::UnexpectedCharacter { line: 1 });
        reporter.report(LexError::UnterminatedString { line: 2 });
        assert!(reporter.had_error());
        assert_eq!(reporter.error_count(), 2);

        reporter.clear();
        assert!(!reporter.had_error());
        assert_eq!(reporter.error_count(), 0);
    }
}
