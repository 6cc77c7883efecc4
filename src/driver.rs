//! Per-source scan pipeline.
//!
//! This module owns everything around a single scan: the source text, the
//! file table used for diagnostic rendering, and the error reporter the
//! scanner feeds. The CLI and the REPL both drive it.

use crate::error::{ErrorReporter, MicaError, MicaResult};
use crate::lexer::{Scanner, Token};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::fs;
use std::path::Path;

/// State for scanning one source unit (a file or a REPL line).
pub struct SourceState {
    pub source_name: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    pub reporter: ErrorReporter,
}

impl SourceState {
    /// Read a source file into a fresh scan state.
    pub fn new<P: AsRef<Path>>(source_file: P) -> MicaResult<Self> {
        let source_name = source_file.as_ref().display().to_string();
        let source = fs::read_to_string(source_file.as_ref())
            .map_err(|e| MicaError::Io(format!("failed to read {}: {}", source_name, e)))?;
        Ok(Self::new_from_string(&source_name, source))
    }

    /// Build a scan state from in-memory text (REPL lines and tests).
    pub fn new_from_string(source_name: &str, source: String) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(source_name.to_string(), source.clone());

        Self {
            source_name: source_name.to_string(),
            source,
            files,
            file_id,
            reporter: ErrorReporter::new(),
        }
    }

    /// Run the scanner over the held source. Lexical errors land in the
    /// reporter; the returned sequence always ends with the `Eof` token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        log::debug!("scanning {}", self.source_name);
        let tokens = Scanner::new(&self.source, &mut self.reporter).scan_all();
        log::debug!(
            "scanned {} tokens, {} errors",
            tokens.len(),
            self.reporter.error_count()
        );
        tokens
    }

    /// Emit every accumulated diagnostic to stderr.
    pub fn report_diagnostics(&self) -> MicaResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        for error in self.reporter.diagnostics() {
            let diagnostic = error.to_diagnostic();
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)
                .map_err(|e| MicaError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        self.reporter.had_error()
    }

    pub fn error_count(&self) -> usize {
        self.reporter.error_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;

    #[test]
    fn test_tokenize_from_string() {
        let mut state = SourceState::new_from_string("<test>", "var x = 1;".to_string());
        let tokens = state.tokenize();

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Var,
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::Number,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
        assert!(!state.has_errors());
    }

    #[test]
    fn test_errors_reach_the_reporter() {
        let mut state = SourceState::new_from_string("<test>", "~ \"open".to_string());
        state.tokenize();
        assert!(state.has_errors());
        assert_eq!(state.error_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SourceState::new("definitely/not/a/real/file.mica");
        assert!(matches!(result, Err(MicaError::Io(_))));
    }
}
