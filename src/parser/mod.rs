//! Source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens, one per call)
//! - [`parse`]: The [`parse::Parser`] and its diagnostics (tokens → AST)
//! - [`ast`]: AST node definitions and their textual rendering
//!
//! # Supported language subset
//!
//! - Statements: `let <name> = <expr>;`, `return [<expr>];`, expression statements
//! - Expressions: identifiers, integers, booleans, prefix `!`/`-`,
//!   infix `+ - * / == != < >`, parenthesised grouping
//!
//! The lexer also recognises `fn`, `if`, `else`, braces, brackets and commas;
//! the parser has no rules for them yet and skips them.
//!
//! # Parser Implementation
//!
//! Hand-written Pratt parser with one token of lookahead. Diagnostics are
//! collected rather than returned early, so a single pass reports every
//! malformed statement.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
