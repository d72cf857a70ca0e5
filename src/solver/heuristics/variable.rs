//! Standard heuristics for selecting which variable to branch on next
//! during the search process.

use std::cell::RefCell;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::solver::{engine::VariableId, semantics::DomainSemantics, solution::Solution};

/// A trait for variable-selection heuristics.
///
/// Implementors define a strategy for choosing which unassigned variable the
/// solver should branch on next. A good heuristic can dramatically improve
/// solver performance.
pub trait VariableSelectionHeuristic<S: DomainSemantics> {
    /// Selects the next variable to be assigned, or `None` if every domain
    /// is already a singleton.
    fn select_variable(&self, solution: &Solution<S>) -> Option<VariableId>;
}

/// Selects the unassigned variable with the smallest ID.
///
/// This provides a basic, deterministic way to select variables.
pub struct SelectFirstHeuristic;

impl<S: DomainSemantics> VariableSelectionHeuristic<S> for SelectFirstHeuristic {
    fn select_variable(&self, solution: &Solution<S>) -> Option<VariableId> {
        solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(var_id, _)| *var_id)
            .map(|(var_id, _)| *var_id)
    }
}

/// Selects the variable with the Minimum Remaining Values in its domain.
///
/// This is a "fail-first" strategy that prioritizes the most constrained
/// variable, which tends to prune the search space early. Ties are broken by
/// variable ID to keep the search deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl<S: DomainSemantics> VariableSelectionHeuristic<S> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, solution: &Solution<S>) -> Option<VariableId> {
        solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by(|(var_a, domain_a), (var_b, domain_b)| {
                (domain_a.len(), *var_a).cmp(&(domain_b.len(), *var_b))
            })
            .map(|(var_id, _)| *var_id)
    }
}

/// Selects an unassigned variable at random.
///
/// Driven by a seedable ChaCha generator so runs can be reproduced.
pub struct RandomVariableHeuristic {
    rng: RefCell<ChaCha8Rng>,
}

impl RandomVariableHeuristic {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomVariableHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DomainSemantics> VariableSelectionHeuristic<S> for RandomVariableHeuristic {
    fn select_variable(&self, solution: &Solution<S>) -> Option<VariableId> {
        let unassigned_vars: Vec<VariableId> = solution
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .map(|(var_id, _)| *var_id)
            .collect();

        unassigned_vars.choose(&mut *self.rng.borrow_mut()).copied()
    }
}
