//! Lexer (tokenizer) for marmoset source code
//!
//! Converts raw source text into [`Token`]s one call at a time. The lexer
//! never fails: a character it does not recognise comes back as an
//! [`TokenKind::Illegal`] token and scanning carries on after it, so every
//! input eventually reaches [`TokenKind::Eof`].

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    /// Reserved for string literals. The scanner treats `"` as illegal, so
    /// this kind is never produced.
    Str,

    // Operators
    Assign,   // =
    Plus,     // +
    Minus,    // -
    Bang,     // !
    Asterisk, // *
    Slash,    // /
    Lt,       // <
    Gt,       // >
    Eq,       // ==
    NotEq,    // !=

    // Delimiters
    Comma,     // ,
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // Keywords
    Function,
    Let,
    If,
    Else,
    True,
    False,
    Return,
}

impl TokenKind {
    /// Name used when a kind shows up in diagnostics or token dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Str => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Return => "RETURN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved words, keyed by their exact spelling.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut keywords = FxHashMap::default();
    keywords.insert("fn", TokenKind::Function);
    keywords.insert("let", TokenKind::Let);
    keywords.insert("if", TokenKind::If);
    keywords.insert("else", TokenKind::Else);
    keywords.insert("true", TokenKind::True);
    keywords.insert("false", TokenKind::False);
    keywords.insert("return", TokenKind::Return);
    keywords
});

/// Classifies identifier-shaped text as a keyword or a plain identifier.
pub fn lookup_ident(ident: &str) -> TokenKind {
    KEYWORDS.get(ident).copied().unwrap_or(TokenKind::Ident)
}

/// A classified lexical unit: its kind plus the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Type:{} Literal:{}}}", self.kind, self.literal)
    }
}

/// Pull-based lexer over a borrowed source string.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,      // byte offset of `ch`
    read_position: usize, // byte offset just past `ch`
    ch: Option<char>,     // None once the input is exhausted
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Drain the lexer. The returned vector always ends with exactly one
    /// [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan and return the next token. Once the input is exhausted every
    /// further call returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.ch else {
            return Token::eof();
        };

        let kind = match ch {
            '=' => {
                if self.peek_char() == Some('=') {
                    return self.two_char_token(TokenKind::Eq);
                }
                TokenKind::Assign
            }
            '!' => {
                if self.peek_char() == Some('=') {
                    return self.two_char_token(TokenKind::NotEq);
                }
                TokenKind::Bang
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,

            c if is_letter(c) => return self.identifier_or_keyword(),
            c if c.is_ascii_digit() => return self.number_literal(),

            _ => TokenKind::Illegal,
        };

        let token = Token::new(kind, &self.input[self.position..self.read_position]);
        self.read_char();
        token
    }

    /// Consume the current and the following character as one token.
    fn two_char_token(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.read_char();
        self.read_char();
        Token::new(kind, &self.input[start..self.position])
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(is_letter) {
            self.read_char();
        }

        let ident = &self.input[start..self.position];
        Token::new(lookup_ident(ident), ident)
    }

    /// Integers only; no floats, no alternate radices.
    fn number_literal(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
        }

        Token::new(TokenKind::Int, &self.input[start..self.position])
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    /// Advance to the next character.
    fn read_char(&mut self) {
        self.position = self.read_position;
        self.ch = self.input[self.read_position..].chars().next();
        if let Some(ch) = self.ch {
            self.read_position += ch.len_utf8();
        }
    }

    /// Character after the current one, without consuming anything.
    fn peek_char(&self) -> Option<char> {
        self.input[self.read_position..].chars().next()
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_single_character_tokens() {
        let cases = [
            ("=", TokenKind::Assign),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("!", TokenKind::Bang),
            ("*", TokenKind::Asterisk),
            ("/", TokenKind::Slash),
            ("<", TokenKind::Lt),
            (">", TokenKind::Gt),
            (";", TokenKind::Semicolon),
            (",", TokenKind::Comma),
            ("(", TokenKind::LParen),
            (")", TokenKind::RParen),
            ("{", TokenKind::LBrace),
            ("}", TokenKind::RBrace),
            ("[", TokenKind::LBracket),
            ("]", TokenKind::RBracket),
        ];

        for (source, kind) in cases {
            let tokens = Lexer::new(source).tokenize();
            assert_eq!(tokens.len(), 2, "input {:?}", source);
            assert_eq!(tokens[0], Token::new(kind, source));
            assert!(tokens[1].is(TokenKind::Eof));
        }
    }

    #[test]
    fn test_two_character_operators() {
        let mut lexer = Lexer::new("== != = !");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Eq, "=="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::NotEq, "!="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Assign, "="));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Bang, "!"));
        assert!(lexer.next_token().is(TokenKind::Eof));
    }

    #[test]
    fn test_adjacent_operators() {
        assert_eq!(
            kinds("!==="),
            vec![TokenKind::NotEq, TokenKind::Eq, TokenKind::Eof]
        );
        assert_eq!(
            kinds("=!"),
            vec![TokenKind::Assign, TokenKind::Bang, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords() {
        let cases = [
            ("let", TokenKind::Let),
            ("fn", TokenKind::Function),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("return", TokenKind::Return),
        ];

        for (source, kind) in cases {
            let token = Lexer::new(source).next_token();
            assert_eq!(token, Token::new(kind, source));
        }
    }

    #[test]
    fn test_identifiers() {
        for source in ["letx", "foo_bar", "_", "Returns", "x"] {
            let token = Lexer::new(source).next_token();
            assert_eq!(token, Token::new(TokenKind::Ident, source));
        }
    }

    #[test]
    fn test_digits_end_an_identifier() {
        let tokens = Lexer::new("x1").tokenize();
        assert_eq!(tokens[0], Token::new(TokenKind::Ident, "x"));
        assert_eq!(tokens[1], Token::new(TokenKind::Int, "1"));
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("  5 ");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Int, "5"));
        for _ in 0..3 {
            assert_eq!(lexer.next_token(), Token::eof());
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Lexer::new("").tokenize(), vec![Token::eof()]);
        assert_eq!(Lexer::new(" \t\r\n").tokenize(), vec![Token::eof()]);
    }

    #[test]
    fn test_illegal_characters_do_not_stop_scanning() {
        let tokens = Lexer::new("a @ \"b\" é 1").tokenize();
        let expected = vec![
            Token::new(TokenKind::Ident, "a"),
            Token::new(TokenKind::Illegal, "@"),
            Token::new(TokenKind::Illegal, "\""),
            Token::new(TokenKind::Ident, "b"),
            Token::new(TokenKind::Illegal, "\""),
            Token::new(TokenKind::Illegal, "é"),
            Token::new(TokenKind::Int, "1"),
            Token::eof(),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_simple_program() {
        let source = "let five = 5;\nlet add = fn(x, y) {\n  x + y;\n};\n\
                      if (5 < 10) { return true; } else { return false; }\n\
                      10 == 10; 10 != 9; [1, 2];";
        let tokens = Lexer::new(source).tokenize();

        let expected = [
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::Function, "fn"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "y"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Ident, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Ident, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::If, "if"),
            (TokenKind::LParen, "("),
            (TokenKind::Int, "5"),
            (TokenKind::Lt, "<"),
            (TokenKind::Int, "10"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::True, "true"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Else, "else"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::False, "false"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Int, "10"),
            (TokenKind::Eq, "=="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "10"),
            (TokenKind::NotEq, "!="),
            (TokenKind::Int, "9"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::LBracket, "["),
            (TokenKind::Int, "1"),
            (TokenKind::Comma, ","),
            (TokenKind::Int, "2"),
            (TokenKind::RBracket, "]"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];

        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, literal)) in tokens.iter().zip(expected) {
            assert_eq!(token, &Token::new(kind, literal));
        }
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Let, "let");
        assert_eq!(token.to_string(), "{Type:LET Literal:let}");
        assert_eq!(Token::eof().to_string(), "{Type:EOF Literal:}");
        assert_eq!(TokenKind::NotEq.to_string(), "!=");
        assert_eq!(TokenKind::Str.to_string(), "STRING");
    }
}
