//! # Introduction
//!
//! marmoset is the front end of a small interpreted language. It turns
//! source text into tokens and then into a syntax tree, collecting
//! human-readable diagnostics along the way. There is no evaluator.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → rendered text
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`repl`]: a line-oriented prompt that prints the tokens or the parsed
//!    tree of every line it reads.
//!
//! ## Example
//!
//! ```
//! use marmoset::parser::parse::parse;
//!
//! let (program, errors) = parse("let x = -a * b;");
//! assert!(errors.is_empty());
//! assert_eq!(program.to_string(), "let x = ((-a) * b);");
//! ```

pub mod parser;
pub mod repl;
