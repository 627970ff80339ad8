//! Decision-procedure interface and the Z3-backed implementation
//!
//! The verification core never implements satisfiability search itself; it
//! compiles [`Term`]s and hands them to a [`SolverAdapter`]. The adapter
//! interface is deliberately small — declare, assert, check, model — so the
//! concrete engine can be swapped or scripted in tests.

mod z3_adapter;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::logic::Term;

pub use z3_adapter::Z3Adapter;

/// Answer of a satisfiability query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatOutcome {
    /// The asserted constraints admit at least one assignment
    Sat,
    /// The asserted constraints are jointly unsatisfiable
    Unsat,
}

/// External decision procedure over linear integer arithmetic and booleans
///
/// One adapter instance serves exactly one request; no solver state is
/// shared across requests. Declarations and assertions accumulate until
/// [`SolverAdapter::check_sat`] is called.
pub trait SolverAdapter {
    /// Declares an integer-sorted variable to appear in the model
    ///
    /// Re-declaring a name is a no-op. Variables mentioned in assertions
    /// but never declared take part in solving but are omitted from the
    /// model, which is restricted to declared variables.
    fn declare(&mut self, name: &str);

    /// Asserts a boolean-sorted term as a constraint
    fn assert_term(&mut self, term: Term);

    /// Decides satisfiability of the conjunction of all asserted terms
    fn check_sat(&mut self) -> Result<SatOutcome>;

    /// Returns the witness assignment for declared variables
    ///
    /// Only valid after [`SolverAdapter::check_sat`] returned
    /// [`SatOutcome::Sat`]; fails with a solver error otherwise. Variables
    /// without a forced value are completed to an arbitrary one, so every
    /// declared name is present.
    fn get_model(&self) -> Result<BTreeMap<String, i64>>;
}
