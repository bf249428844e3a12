use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

/// Converts source text into a token stream. Scanning is total: illegal
/// bytes and unterminated strings never abort the scan, they produce an
/// `Invalid` token (and a collected [`ScanError`]) and scanning continues.
/// The caller always gets a full token stream ending in `EOF`.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec![],
            errors: vec![],
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
        }
    }

    /// Scans the whole source and returns its tokens plus any scan errors
    /// collected along the way (never panics, never returns early).
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, Location::new(self.line, 0)));

        (self.tokens, self.errors)
    }

    fn advance(&mut self) -> Option<char> {
        match self.source.next() {
            Some(c) => {
                self.current += 1;
                Some(c)
            },
            None => None,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                true
            },
            _ => false,
        }
    }

    fn column(&self) -> usize {
        self.start - self.column_offset + 1
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, Location::new(self.line, self.column())));
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Scans a double-quoted string. Embedded newlines are permitted. If the
    /// closing quote is never found, this emits an `Invalid` token covering
    /// what was consumed and records a [`ScanError`] — there is no recovery
    /// point inside an unterminated string, so scanning simply ends with it
    /// (the source is exhausted by the time this returns).
    fn string(&mut self) {
        self.advance(); // opening quote
        let start_line = self.line;
        let start_column = self.column();

        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => break,
                Some(c) => {
                    self.advance();
                    value.push(c);
                    if c == '\n' {
                        self.line += 1;
                        self.column_offset = self.current;
                    }
                },
                None => {
                    self.errors.push(ScanError {
                        location: Location::new(start_line, start_column),
                        message: "Unterminated string.".to_string(),
                    });
                    self.add_token(Type::Invalid, format!("\"{value}"), None);
                    return;
                },
            }
        }

        self.advance(); // closing quote
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    /// Scans a number. A `.` is only ever part of the number if it is
    /// immediately followed by a digit; a trailing `.` with no fractional
    /// digits is left for the next token to pick up as a standalone `DOT`.
    fn number(&mut self) {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            value.push(c);
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            value.push('.');
            self.advance();

            while let Some(c) = self.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                value.push(c);
                self.advance();
            }
        }

        let number: f64 = value.parse().expect("scanned digits to form a valid f64");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            value.push(c);
            self.advance();
        }

        let token_type = match value.as_str() {
            "and" => Type::And,
            "break" => Type::Break,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    fn scan_token(&mut self) {
        let Some(c) = self.peek() else { return };

        match c {
            '(' => { self.advance(); self.add_token(Type::LeftParen, c.to_string(), None); },
            ')' => { self.advance(); self.add_token(Type::RightParen, c.to_string(), None); },
            '{' => { self.advance(); self.add_token(Type::LeftBrace, c.to_string(), None); },
            '}' => { self.advance(); self.add_token(Type::RightBrace, c.to_string(), None); },
            ',' => { self.advance(); self.add_token(Type::Comma, c.to_string(), None); },
            '.' => { self.advance(); self.add_token(Type::Dot, c.to_string(), None); },
            '-' => { self.advance(); self.add_token(Type::Minus, c.to_string(), None); },
            '+' => { self.advance(); self.add_token(Type::Plus, c.to_string(), None); },
            ';' => { self.advance(); self.add_token(Type::Semicolon, c.to_string(), None); },
            '*' => { self.advance(); self.add_token(Type::Star, c.to_string(), None); },

            '!' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), None);
                }
            },
            '=' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), None);
                }
            },
            '<' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(Type::Less, "<".to_string(), None);
                }
            },
            '>' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), None);
                }
            },
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            },

            ' ' | '\r' | '\t' => { self.advance(); },

            '\n' => {
                self.advance();
                self.line += 1;
                self.column_offset = self.current;
            },

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                self.errors.push(ScanError {
                    location: Location::new(self.line, self.column()),
                    message: format!("Unexpected character '{c}'."),
                });
                self.add_token(Type::Invalid, c.to_string(), None);
            },
        }
    }
}
