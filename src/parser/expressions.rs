//! Expression parsing implementation
//!
//! Expressions are parsed with operator precedence (Pratt) parsing. Every
//! token kind that can begin an expression has a prefix rule, every binary
//! operator has an infix rule, and [`Precedence::of`] gives each operator
//! its binding power.
//!
//! # Supported Expressions
//!
//! - Identifiers, integer literals, `true` / `false`
//! - Prefix operators: `!`, `-`
//! - Infix operators: `+ - * / == != < >`
//! - Grouping: `( expression )`, which yields the inner node unchanged

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser, Precedence, MAX_NESTING};

type PrefixRule<'a> = fn(&mut Parser<'a>) -> Result<Expression, ParseError>;
type InfixRule<'a> = fn(&mut Parser<'a>, Expression) -> Result<Expression, ParseError>;

impl<'a> Parser<'a> {
    /// Rule that starts an expression at a token of this kind, if any.
    pub(crate) fn prefix_rule(kind: TokenKind) -> Option<PrefixRule<'a>> {
        let rule: PrefixRule<'a> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LParen => Self::parse_grouped_expression,
            _ => return None,
        };
        Some(rule)
    }

    /// Rule that continues an expression at a token of this kind, if any.
    fn infix_rule(kind: TokenKind) -> Option<InfixRule<'a>> {
        InfixOp::from_token(kind).map(|_| Self::parse_infix_expression as InfixRule<'a>)
    }

    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub(crate) fn parse_expression(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep(MAX_NESTING));
        }

        self.depth += 1;
        let result = self.parse_expression_at_depth(precedence);
        self.depth -= 1;
        result
    }

    fn parse_expression_at_depth(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, ParseError> {
        let prefix = Self::prefix_rule(self.current.kind)
            .ok_or(ParseError::NoPrefixRule(self.current.kind))?;
        let mut left = prefix(self)?;

        // Each fold wraps `left` one level deeper
        let mut folds = 0;
        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_rule(self.peek.kind) else {
                break;
            };
            folds += 1;
            if self.depth + folds > MAX_NESTING {
                return Err(ParseError::TooDeep(MAX_NESTING));
            }
            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn parse_identifier(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Identifier(Identifier::from_token(
            self.current.clone(),
        )))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let value = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger(token.literal.clone()))?;

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Boolean(Boolean {
            token: self.current.clone(),
            value: self.current_is(TokenKind::True),
        }))
    }

    /// Parse `!x` / `-x`; the operand binds at prefix precedence.
    fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator =
            PrefixOp::from_token(token.kind).ok_or(ParseError::NoPrefixRule(token.kind))?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// Parse `( expression )`
    fn parse_grouped_expression(&mut self) -> Result<Expression, ParseError> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    /// Parse the right-hand side of a binary operator. The right operand is
    /// parsed at the operator's own precedence, so equal-precedence chains
    /// associate to the left.
    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator =
            InfixOp::from_token(token.kind).ok_or(ParseError::NoPrefixRule(token.kind))?;
        let precedence = self.current_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }
}
