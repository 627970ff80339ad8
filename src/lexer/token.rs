use serde::{Deserialize, Serialize};

/// A single token from submitted source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where the token appears (1-indexed)
    pub line: usize,
    /// Column number where the token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All token types of the restricted function language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer(i64),
    /// String literal
    String(String),
    /// Boolean true literal
    True,
    /// Boolean false literal
    False,

    /// Identifier (variable or function name)
    Identifier(String),

    // Keywords
    /// `def` keyword
    Def,
    /// `if` keyword
    If,
    /// `elif` keyword
    Elif,
    /// `else` keyword
    Else,
    /// `while` keyword
    While,
    /// `for` keyword
    For,
    /// `in` keyword
    In,
    /// `return` keyword
    Return,
    /// `pass` keyword
    Pass,
    /// `and` keyword
    And,
    /// `or` keyword
    Or,
    /// `not` keyword
    Not,

    // Operators
    /// Addition operator (+)
    Plus,
    /// Subtraction operator (-)
    Minus,
    /// Multiplication operator (*)
    Star,
    /// Division operator (/)
    Slash,
    /// Modulo operator (%)
    Percent,
    /// Assignment operator (=)
    Assign,
    /// Equality operator (==)
    EqEq,
    /// Inequality operator (!=)
    NotEq,
    /// Less-than operator (<)
    Lt,
    /// Greater-than operator (>)
    Gt,
    /// Less-or-equal operator (<=)
    LtEq,
    /// Greater-or-equal operator (>=)
    GtEq,

    // Punctuation
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// Colon introducing a block
    Colon,
    /// Comma separating parameters or arguments
    Comma,
    /// Semicolon separating statements on one line
    Semicolon,

    // Layout
    /// End of a logical line
    Newline,
    /// Increase in indentation level
    Indent,
    /// Decrease in indentation level
    Dedent,
    /// End of input
    Eof,
}
