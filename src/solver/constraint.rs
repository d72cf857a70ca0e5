use crate::{
    error::Result,
    solver::{engine::VariableId, semantics::DomainSemantics, solution::Solution},
};

/// A human-readable description of a constraint, used for reporting.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule that must be satisfied by any complete assignment.
///
/// Constraints participate in propagation through [`Constraint::revise`]: the
/// engine repeatedly asks each constraint to prune the domain of one of its
/// variables against the current state. A revision that empties a domain
/// proves the current state inconsistent.
pub trait Constraint<S: DomainSemantics>: std::fmt::Debug {
    /// The variables this constraint ranges over.
    fn variables(&self) -> &[VariableId];

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Attempts to prune `target_var`'s domain (and possibly others) given
    /// the current solution state.
    ///
    /// Returns `Ok(Some(solution))` with a new state if anything was pruned,
    /// `Ok(None)` if no new information could be derived.
    fn revise(
        &self,
        target_var: &VariableId,
        solution: &Solution<S>,
    ) -> Result<Option<Solution<S>>>;
}
