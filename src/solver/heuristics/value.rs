use crate::solver::{engine::VariableId, semantics::DomainSemantics, solution::Solution};

/// A trait for strategies that determine the order in which values are tried
/// for a branching variable.
pub trait ValueOrderingHeuristic<S: DomainSemantics> {
    /// Returns the values of `var`'s domain in the order they should be
    /// tried.
    fn order_values(&self, var: VariableId, solution: &Solution<S>) -> Vec<S::Value>;
}

/// A simple heuristic that returns values in their natural iteration order.
pub struct IdentityValueHeuristic;

impl<S: DomainSemantics> ValueOrderingHeuristic<S> for IdentityValueHeuristic {
    fn order_values(&self, var: VariableId, solution: &Solution<S>) -> Vec<S::Value> {
        solution
            .domains
            .get(&var)
            .map(|domain| domain.iter().cloned().collect())
            .unwrap_or_default()
    }
}
