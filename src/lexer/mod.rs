//! Lexical analysis module for the Mica language.
//!
//! This module is responsible for tokenizing Mica source code into a flat,
//! ordered sequence of tokens. It covers single- and multi-character
//! operators, string and numeric literals, comments, keyword recognition,
//! and line-accurate error reporting. Malformed input never aborts a scan:
//! errors go to the caller's diagnostic sink and tokenization continues.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Literal, Token, TokenType};
