use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for the restricted pythonish function syntax
///
/// Layout is significant: the scanner emits `Newline` at the end of each
/// logical line and `Indent`/`Dedent` tokens as the leading whitespace of a
/// line grows or shrinks, so the parser can recover block structure without
/// ever re-inspecting whitespace. Blank and comment-only lines produce no
/// tokens at all.
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of the current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Line where the current token started
    start_line: usize,
    /// Column where the current token started
    start_column: usize,
    /// Stack of active indentation widths; always holds at least 0
    indent_stack: Vec<usize>,
    /// True while positioned at the start of a line, before indentation
    /// has been measured
    at_line_start: bool,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            indent_stack: vec![0],
            at_line_start: true,
        }
    }

    /// Scans all tokens from the source and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            if self.at_line_start {
                self.handle_indentation()?;
                continue;
            }
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token()?;
        }

        // Close the final logical line, then unwind any open blocks.
        if !matches!(
            self.tokens.last().map(|t| &t.kind),
            None | Some(TokenKind::Newline)
        ) {
            self.push_simple(TokenKind::Newline);
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_simple(TokenKind::Dedent);
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), self.line, self.column));
        Ok(self.tokens.clone())
    }

    /// Measures the leading whitespace of the current line and emits
    /// `Indent`/`Dedent` tokens against the indentation stack
    fn handle_indentation(&mut self) -> Result<()> {
        let mut width = 0usize;
        loop {
            match self.peek() {
                ' ' => {
                    width += 1;
                    self.advance();
                }
                '\t' => {
                    // A tab advances to the next multiple of four.
                    width += 4 - width % 4;
                    self.advance();
                }
                _ => break,
            }
        }

        // Blank and comment-only lines carry no layout information.
        match self.peek() {
            '\0' => return Ok(()),
            '\n' => {
                self.advance();
                self.line += 1;
                self.column = 1;
                return Ok(());
            }
            '#' => {
                while !self.is_at_end() && self.peek() != '\n' {
                    self.advance();
                }
                if self.peek() == '\n' {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                return Ok(());
            }
            _ => {}
        }

        self.at_line_start = false;

        let current = *self.indent_stack.last().unwrap_or(&0);
        if width > current {
            self.indent_stack.push(width);
            self.push_simple(TokenKind::Indent);
        } else if width < current {
            while width < *self.indent_stack.last().unwrap_or(&0) {
                self.indent_stack.pop();
                self.push_simple(TokenKind::Dedent);
            }
            if width != *self.indent_stack.last().unwrap_or(&0) {
                return Err(Error::SyntaxError {
                    line: self.line,
                    col: self.column,
                    message: "inconsistent indentation".to_string(),
                });
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\r' | '\t' => {}

            '\n' => {
                self.push_token(TokenKind::Newline);
                self.line += 1;
                self.column = 1;
                self.at_line_start = true;
            }

            '#' => {
                while !self.is_at_end() && self.peek() != '\n' {
                    self.advance();
                }
            }

            '(' => self.push_token(TokenKind::LeftParen),
            ')' => self.push_token(TokenKind::RightParen),
            ':' => self.push_token(TokenKind::Colon),
            ',' => self.push_token(TokenKind::Comma),
            ';' => self.push_token(TokenKind::Semicolon),

            '+' => self.push_token(TokenKind::Plus),
            '-' => self.push_token(TokenKind::Minus),
            '*' => self.push_token(TokenKind::Star),
            '/' => self.push_token(TokenKind::Slash),
            '%' => self.push_token(TokenKind::Percent),

            '=' => {
                if self.match_char('=') {
                    self.push_token(TokenKind::EqEq);
                } else {
                    self.push_token(TokenKind::Assign);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.push_token(TokenKind::NotEq);
                } else {
                    return Err(self.unexpected_char('!'));
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.push_token(TokenKind::LtEq);
                } else {
                    self.push_token(TokenKind::Lt);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.push_token(TokenKind::GtEq);
                } else {
                    self.push_token(TokenKind::Gt);
                }
            }

            '"' => self.scan_string('"')?,
            '\'' => self.scan_string('\'')?,

            d if d.is_ascii_digit() => self.scan_number()?,
            a if a.is_ascii_alphabetic() || a == '_' => self.scan_identifier(),

            other => return Err(self.unexpected_char(other)),
        }

        Ok(())
    }

    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let value = text.parse::<i64>().map_err(|_| Error::SyntaxError {
            line: self.start_line,
            col: self.start_column,
            message: format!("integer literal out of range: {}", text),
        })?;
        self.push_token(TokenKind::Integer(value));
        Ok(())
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let kind = match text.as_str() {
            "def" => TokenKind::Def,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "return" => TokenKind::Return,
            "pass" => TokenKind::Pass,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            _ => TokenKind::Identifier(text.clone()),
        };
        self.push_token(kind);
    }

    fn scan_string(&mut self, quote: char) -> Result<()> {
        while !self.is_at_end() && self.peek() != quote && self.peek() != '\n' {
            self.advance();
        }
        if self.is_at_end() || self.peek() == '\n' {
            return Err(Error::SyntaxError {
                line: self.start_line,
                col: self.start_column,
                message: "unterminated string literal".to_string(),
            });
        }
        self.advance(); // closing quote

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.push_token(TokenKind::String(value));
        Ok(())
    }

    fn unexpected_char(&self, c: char) -> Error {
        Error::SyntaxError {
            line: self.start_line,
            col: self.start_column,
            message: format!("unexpected character '{}'", c),
        }
    }

    fn push_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.start_line, self.start_column));
    }

    /// Pushes a synthetic layout token with no source text
    fn push_simple(&mut self, kind: TokenKind) {
        self.tokens
            .push(Token::new(kind, String::new(), self.line, self.column));
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}
