//! Lowering of parsed syntax into logical terms
//!
//! [`translate_expr`] is the leaf algorithm of every analysis mode: it turns
//! one expression node into a [`crate::logic::Term`] against an immutable
//! [`crate::logic::Environment`]. [`ProgramModel`] builds on it to compile a
//! whole restricted function into a path condition.

mod expr;
mod model;

pub use expr::{translate_expr, MAX_TRANSLATION_DEPTH};
pub use model::ProgramModel;
