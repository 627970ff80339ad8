//! Parser for the restricted single-function language

mod ast;
mod func_parser;

pub use ast::{BinaryOp, ElifBranch, Expression, FunctionDef, Statement, UnaryOp};
pub use func_parser::FuncParser;
