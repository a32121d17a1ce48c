//! Interactive prompt
//!
//! Reads one line at a time and either dumps its tokens or parses it and
//! prints the resulting tree. Input and output are generic so the loop can
//! run against in-memory buffers.

use crate::parser::lexer::{Lexer, TokenKind};
use crate::parser::parse::Parser;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">> ";

/// What the prompt prints for each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// One token per line, up to end of input
    #[default]
    Tokens,
    /// The parsed program, or its diagnostics
    Ast,
}

#[derive(Debug, Clone, Copy)]
pub struct Repl {
    mode: Mode,
    color: bool,
}

impl Repl {
    pub fn new(mode: Mode, color: bool) -> Self {
        Self { mode, color }
    }

    /// Run until `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            self.write_prompt(output)?;

            let Some(line) = lines.next() else {
                return Ok(());
            };
            self.eval_line(&line?, output)?;
        }
    }

    /// Handle a single line of input.
    pub fn eval_line<W: Write>(&self, line: &str, output: &mut W) -> io::Result<()> {
        match self.mode {
            Mode::Tokens => {
                let tokens = Lexer::new(line).tokenize();
                for token in tokens.iter().take_while(|token| !token.is(TokenKind::Eof)) {
                    writeln!(output, "{}", token)?;
                }
            }
            Mode::Ast => {
                let mut parser = Parser::new(line);
                let program = parser.parse_program();
                let errors = parser.errors();

                if errors.is_empty() {
                    writeln!(output, "{}", program)?;
                } else {
                    tracing::debug!(count = errors.len(), "line has parse errors");
                    writeln!(output, "parser errors:")?;
                    for error in errors {
                        if self.color {
                            writeln!(output, "\t{}", error.red())?;
                        } else {
                            writeln!(output, "\t{}", error)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn write_prompt<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if self.color {
            write!(output, "{}", PROMPT.green().bold())?;
        } else {
            write!(output, "{}", PROMPT)?;
        }
        output.flush()
    }
}
