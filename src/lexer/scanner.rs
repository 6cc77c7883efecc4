//! The Mica scanner: a single-pass tokenizer over in-memory source text.

use crate::error::{DiagnosticSink, LexError};
use crate::lexer::token::{Literal, Token, TokenType};

/// Hand-written scanner that walks the source one character at a time and
/// produces the full token sequence in a single pass.
///
/// Lexical errors are reported through the injected [`DiagnosticSink`] and
/// never stop the scan, so one invocation surfaces every error the input
/// contains. `start` and `current` are byte indices into `source`; the
/// cursor only ever advances by whole characters, so lexeme slices always
/// land on character boundaries.
pub struct Scanner<'a> {
    source: &'a str,
    sink: &'a mut dyn DiagnosticSink,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    // Line of the first character of the lexeme being recognized. Tokens
    // carry this, not the line the cursor ends on, so a multi-line string
    // is attributed to its opening quote.
    start_line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            source,
            sink,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    /// Scan the entire source and return the ordered token sequence,
    /// terminated by a single `Eof` token.
    ///
    /// Calling this again re-scans from the beginning and yields the same
    /// sequence for unchanged source; no cursor state carries over.
    pub fn scan_all(&mut self) -> Vec<Token> {
        self.tokens.clear();
        self.start = 0;
        self.current = 0;
        self.line = 1;

        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), None, self.line));
        std::mem::take(&mut self.tokens)
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let kind = if self.match_char('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.add_token(kind);
            }
            '/' => {
                if self.match_char('/') {
                    // Line comment: discard up to, but not including, the
                    // newline so line counting stays in the newline branch.
                    while self.peek() != Some('\n') && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.scan_string(),
            '0'..='9' => self.scan_number(),
            c if is_alpha(c) => self.scan_identifier(),
            _ => self.sink.report(LexError::UnexpectedCharacter { line: self.line }),
        }
    }

    /// String literal, opening quote already consumed. Multi-line strings
    /// are allowed; escape sequences are not.
    fn scan_string(&mut self) {
        while self.peek() != Some('"') && !self.is_at_end() {
            if self.peek() == Some('\n') {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.sink.report(LexError::UnterminatedString { line: self.line });
            return;
        }

        // The closing quote.
        self.advance();

        // The literal excludes the surrounding quotes; the lexeme keeps them.
        let value = self.source[self.start + 1..self.current - 1].to_string();
        self.add_literal_token(TokenType::String, Literal::String(value));
    }

    /// Number literal, first digit already consumed. A `.` is only part of
    /// the number when a digit follows it, decided with one extra character
    /// of lookahead rather than backtracking.
    fn scan_number(&mut self) {
        while self.peek().is_some_and(is_digit) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(is_digit) {
            // Consume the '.'
            self.advance();
            while self.peek().is_some_and(is_digit) {
                self.advance();
            }
        }

        // A digit run with an optional fraction always parses as f64;
        // out-of-range values round to infinity rather than failing.
        let value = self.lexeme().parse::<f64>().unwrap_or_default();
        self.add_literal_token(TokenType::Number, Literal::Number(value));
    }

    /// Identifier or reserved word, first character already consumed.
    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let kind = TokenType::keyword(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consume and return the next character.
    fn advance(&mut self) -> char {
        let c = self.peek().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    /// Consume the next character only if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// One character of lookahead without advancing.
    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    /// Two characters of lookahead, used only to decide whether a `.`
    /// belongs to a number.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn lexeme(&self) -> &str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenType) {
        self.tokens.push(Token::new(
            kind,
            self.lexeme().to_string(),
            None,
            self.start_line,
        ));
    }

    fn add_literal_token(&mut self, kind: TokenType, literal: Literal) {
        self.tokens.push(Token::new(
            kind,
            self.lexeme().to_string(),
            Some(literal),
            self.start_line,
        ));
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}
