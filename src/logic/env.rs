use std::collections::HashMap;

use crate::logic::Term;

/// Immutable mapping from variable name to the term currently bound to it
///
/// A fresh environment is created per analysis request and threaded through
/// translation calls by value; [`Environment::bind`] returns a new
/// environment rather than mutating in place, so no binding state can leak
/// between requests or between translation steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Term>,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Returns a new environment with `name` bound to `term`
    ///
    /// Rebinding an existing name replaces the previous binding entirely
    /// (last write wins); the receiver is left untouched.
    pub fn bind(&self, name: impl Into<String>, term: Term) -> Environment {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), term);
        Environment { bindings }
    }

    /// Looks up the term bound to `name`, if any
    pub fn lookup(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    /// Returns true if `name` has a binding
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates over the bound names (order unspecified)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no names are bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{ArithOp, Term};

    #[test]
    fn bind_and_lookup() {
        let env = Environment::new().bind("x", Term::var("x"));
        assert_eq!(env.lookup("x"), Some(&Term::var("x")));
        assert_eq!(env.lookup("y"), None);
    }

    #[test]
    fn bind_does_not_mutate_receiver() {
        let base = Environment::new();
        let extended = base.bind("x", Term::int(1));

        assert!(base.is_empty());
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn rebinding_replaces_previous_term() {
        let env = Environment::new().bind("z", Term::int(1));
        let env = env.bind(
            "z",
            Term::arith(ArithOp::Add, Term::var("x"), Term::var("y")),
        );

        assert_eq!(
            env.lookup("z"),
            Some(&Term::arith(ArithOp::Add, Term::var("x"), Term::var("y")))
        );
        assert_eq!(env.len(), 1);
    }
}
