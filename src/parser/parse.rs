//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the diagnostic type, the precedence ladder, token-cursor helpers
//! and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The parser keeps exactly two tokens in view: `current` and a one-token
//! lookahead `peek`. Work is split across files using `impl Parser` blocks:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: `let`, `return` and expression statements
//! - `expressions`: Pratt (operator precedence) expression parsing
//!
//! # Error recovery
//!
//! Every statement attempt yields `Result<Option<Statement>, ParseError>`.
//! A failed attempt records its diagnostic, skips ahead to the next `;` or
//! the next `let`/`return`, and parsing resumes, so one pass can surface
//! several diagnostics.

use crate::parser::ast::Program;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use thiserror::Error;

/// Diagnostic recorded when a grammar rule cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lookahead token is not the one the current rule requires.
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },

    /// An expression was required but this token cannot start one.
    #[error("no prefix parse function for {0} found")]
    NoPrefixRule(TokenKind),

    /// Integer literal that does not fit in an `i64`.
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),

    /// Expression nesting beyond [`MAX_NESTING`] levels.
    #[error("expression nested more than {0} levels deep")]
    TooDeep(usize),
}

/// Deepest expression tree the parser will build before giving up on a
/// statement. Parsing is recursive, so this bounds stack use.
pub const MAX_NESTING: usize = 256;

/// Binding power of operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
}

impl Precedence {
    pub(crate) fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}

/// Pratt parser over a single source string.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    errors: Vec<ParseError>,
    pub(crate) depth: usize, // current expression nesting
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(lexer: Lexer<'a>) -> Self {
        let mut parser = Self {
            lexer,
            current: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
            depth: 0,
        };

        // Read two tokens so that `current` and `peek` are both set
        parser.next_token();
        parser.next_token();
        parser
    }

    /// Parse the entire program.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(Some(statement)) => program.statements.push(statement),
                Ok(None) => {}
                Err(error) => {
                    tracing::debug!(%error, token = %self.current, "abandoning statement");
                    self.errors.push(error);
                    self.synchronize();
                }
            }
            self.next_token();
        }

        program
    }

    /// Diagnostics recorded so far, in the order they were raised.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.errors
    }

    /// Diagnostics rendered as human-readable messages.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    // ===== Helper methods =====

    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the lookahead is `kind`, otherwise fail without moving.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                got: self.peek.kind,
            })
        }
    }

    pub(crate) fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    pub(crate) fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    /// Skip the rest of an abandoned statement. Semicolons are optional, so
    /// this also stops just before the next `let` or `return`.
    fn synchronize(&mut self) {
        while !self.current_is(TokenKind::Semicolon)
            && !self.current_is(TokenKind::Eof)
            && !self.peek_is(TokenKind::Let)
            && !self.peek_is(TokenKind::Return)
        {
            self.next_token();
        }
    }
}

/// Parse `source` in one go, returning the tree and every diagnostic.
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    (program, parser.errors)
}
