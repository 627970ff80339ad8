//! Lexer for the restricted single-function language

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
