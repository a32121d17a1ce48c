//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= let_stmt | return_stmt | expr_stmt
//! let_stmt    ::= "let" IDENT "=" expression [";"]
//! return_stmt ::= "return" [expression] [";"]
//! expr_stmt   ::= expression [";"]
//! ```
//!
//! Dispatch is on the kind of the current token. A token that can neither
//! open a statement nor start an expression produces no statement and is
//! skipped by the caller.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser, Precedence};

impl Parser<'_> {
    /// Parse a statement starting at the current token.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Statement>, ParseError> {
        tracing::trace!(token = %self.current, "parsing statement");

        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Some),
            TokenKind::Return => self.parse_return_statement().map(Some),
            kind if Self::prefix_rule(kind).is_some() => {
                self.parse_expression_statement().map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Parse `let <ident> = <expression>;`
    fn parse_let_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::from_token(self.current.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Let(LetStatement { token, name, value }))
    }

    /// Parse `return [<expression>];`
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();

        if self.peek_is(TokenKind::Semicolon) || self.peek_is(TokenKind::Eof) {
            self.skip_optional_semicolon();
            return Ok(Statement::Return(ReturnStatement { token, value: None }));
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Return(ReturnStatement {
            token,
            value: Some(value),
        }))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Expression(ExpressionStatement { token, expression }))
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }
}
