//! Logical term representation and translation environment

mod env;
mod term;

pub use env::Environment;
pub use term::{ArithOp, CompareOp, Term};
