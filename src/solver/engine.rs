use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::Result,
    solver::{
        constraint::Constraint,
        heuristics::{value::ValueOrderingHeuristic, variable::VariableSelectionHeuristic},
        semantics::DomainSemantics,
        solution::{HashSetDomain, Solution},
        work_list::WorkList,
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// Propagation counters for a single constraint.
#[derive(Debug, Clone, Default)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

/// Counters collected over one solve call.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The main engine for solving constraint satisfaction problems.
///
/// The `SolverEngine` takes a problem definition - a set of variables, their
/// domains, and a list of constraints - and finds an assignment that
/// satisfies all constraints, or proves that none exists.
///
/// It combines constraint propagation (the AC-3 algorithm) with backtracking
/// search, branching according to the configured heuristics. The engine holds
/// no problem state of its own: every call to [`SolverEngine::solve`] is an
/// independent session over the solution state it is given.
pub struct SolverEngine<S: DomainSemantics> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<S>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<S>>,
}

impl<S: DomainSemantics + std::fmt::Debug> SolverEngine<S> {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<S>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<S>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
        }
    }

    /// Attempts to solve the given constraint satisfaction problem.
    ///
    /// # Returns
    ///
    /// * `Ok((Some(solution), stats))` if a complete assignment was found.
    /// * `Ok((None, stats))` if the problem is proven unsatisfiable.
    /// * `Err(error)` if the engine itself failed.
    pub fn solve(
        &self,
        constraints: &[Box<dyn Constraint<S>>],
        initial_solution: Solution<S>,
    ) -> Result<(Option<Solution<S>>, SearchStats)> {
        let mut stats = SearchStats::default();

        // A variable declared with an empty domain can never be assigned.
        if initial_solution
            .domains
            .values()
            .any(|domain| domain.is_empty())
        {
            return Ok((None, stats));
        }

        let Some(solution) = self.arc_consistency(constraints, initial_solution, &mut stats)?
        else {
            return Ok((None, stats));
        };
        if solution.is_complete() {
            return Ok((Some(solution), stats));
        }

        self.search(constraints, solution, stats)
    }

    fn search(
        &self,
        constraints: &[Box<dyn Constraint<S>>],
        solution: Solution<S>,
        mut stats: SearchStats,
    ) -> Result<(Option<Solution<S>>, SearchStats)> {
        stats.nodes_visited += 1;

        if solution.is_complete() {
            return Ok((Some(solution), stats));
        }

        let Some(var_to_branch) = self.variable_heuristic.select_variable(&solution) else {
            return Ok((Some(solution), stats));
        };

        for value in self.value_heuristic.order_values(var_to_branch, &solution) {
            let new_domain = Box::new(HashSetDomain::new(im::hashset! {value}));
            let new_domains = solution.domains.update(var_to_branch, new_domain);
            let guess_solution = solution.clone_with_domains(new_domains);

            if let Some(propagated_solution) =
                self.arc_consistency(constraints, guess_solution, &mut stats)?
            {
                let (found_solution, new_stats) =
                    self.search(constraints, propagated_solution, stats)?;
                stats = new_stats;
                if found_solution.is_some() {
                    return Ok((found_solution, stats));
                }
            }
            stats.backtracks += 1;
        }

        Ok((None, stats))
    }

    /// Establishes arc consistency using the AC-3 algorithm.
    fn arc_consistency(
        &self,
        constraints: &[Box<dyn Constraint<S>>],
        initial_solution: Solution<S>,
        stats: &mut SearchStats,
    ) -> Result<Option<Solution<S>>> {
        let mut solution = initial_solution;

        let mut dependency_graph: HashMap<VariableId, Vec<ConstraintId>> = HashMap::new();
        for (i, constraint) in constraints.iter().enumerate() {
            for var_id in constraint.variables() {
                dependency_graph.entry(*var_id).or_default().push(i);
            }
        }

        let mut worklist = WorkList::new();
        for (constraint_id, constraint) in constraints.iter().enumerate() {
            for var_id in constraint.variables() {
                worklist.push_back(*var_id, constraint_id);
            }
        }

        while let Some((target_var, constraint_id)) = worklist.pop_front() {
            let constraint = &constraints[constraint_id];
            let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();

            let start_time = std::time::Instant::now();
            constraint_stats.revisions += 1;

            if let Some(new_solution) = constraint.revise(&target_var, &solution)? {
                let old_domain_size = solution.domain(&target_var)?.len();
                let new_domain_size = new_solution.domain(&target_var)?.len();

                if new_domain_size == 0 {
                    return Ok(None);
                }

                if new_domain_size < old_domain_size {
                    let constraint_stats =
                        stats.constraint_stats.entry(constraint_id).or_default();
                    constraint_stats.prunings += 1;
                    solution = new_solution;

                    // The domain of `target_var` has shrunk; every other
                    // constraint touching it must be rechecked.
                    if let Some(dependent_constraints) = dependency_graph.get(&target_var) {
                        for &dep_constraint_id in dependent_constraints {
                            for &neighbor_var in constraints[dep_constraint_id].variables() {
                                if neighbor_var != target_var {
                                    worklist.push_back(neighbor_var, dep_constraint_id);
                                }
                            }
                        }
                    }
                }
            }
            let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
            constraint_stats.time_spent_micros += start_time.elapsed().as_micros() as u64;
        }

        debug!("propagation reached a fixed point");

        Ok(Some(solution))
    }
}

impl<S: DomainSemantics + std::fmt::Debug> Default for SolverEngine<S> {
    fn default() -> Self {
        use crate::solver::heuristics::{
            value::IdentityValueHeuristic, variable::MinimumRemainingValuesHeuristic,
        };
        Self::new(
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(IdentityValueHeuristic),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use im::HashMap;

    use super::*;
    use crate::solver::constraints::{
        exact_count::ExactCountConstraint,
        forbid_value::ForbidValueConstraint,
        require_value::RequireValueConstraint,
        test_support::{domain_of, Shade, TestSemantics},
    };

    fn solution_of(domains: Domains) -> Solution<TestSemantics> {
        Solution::new(domains, HashMap::new(), Arc::new(TestSemantics))
    }

    type Domains = im::HashMap<VariableId, crate::solver::solution::Domain<Shade>>;

    #[test]
    fn propagation_alone_solves_a_forced_problem() {
        let a = 0;
        let b = 1;
        let domains = im::hashmap! {
            a => domain_of(&[Shade::Red, Shade::Green, Shade::Blue]),
            b => domain_of(&[Shade::Green]),
        };

        // Exactly one of {a, b} is Red, and b cannot be: a must be.
        let constraints: Vec<Box<dyn Constraint<TestSemantics>>> = vec![Box::new(
            ExactCountConstraint::new(vec![a, b], Shade::Red, 1),
        )];

        let engine = SolverEngine::default();
        let (solution, stats) = engine.solve(&constraints, solution_of(domains)).unwrap();
        let solution = solution.unwrap();

        assert_eq!(
            solution.domains.get(&a).unwrap().get_singleton_value(),
            Some(Shade::Red)
        );
        assert!(stats.nodes_visited <= 1);
    }

    #[test]
    fn contradictory_constraints_are_unsatisfiable() {
        let a = 0;
        let domains = im::hashmap! {
            a => domain_of(&[Shade::Red, Shade::Green]),
        };

        let constraints: Vec<Box<dyn Constraint<TestSemantics>>> = vec![
            Box::new(RequireValueConstraint::new(a, Shade::Red)),
            Box::new(ForbidValueConstraint::new(a, Shade::Red)),
        ];

        let engine = SolverEngine::default();
        let (solution, _stats) = engine.solve(&constraints, solution_of(domains)).unwrap();
        assert!(solution.is_none());
    }

    #[test]
    fn unconstrained_variables_are_assigned_by_search() {
        let domains = im::hashmap! {
            0 => domain_of(&[Shade::Red, Shade::Green]),
            1 => domain_of(&[Shade::Red, Shade::Green]),
        };

        let engine = SolverEngine::default();
        let (solution, stats) = engine.solve(&[], solution_of(domains)).unwrap();
        let solution = solution.unwrap();

        assert!(solution.is_complete());
        assert!(stats.nodes_visited >= 1);
    }

    #[test]
    fn undeclared_variable_is_an_engine_failure() {
        let constraints: Vec<Box<dyn Constraint<TestSemantics>>> =
            vec![Box::new(ForbidValueConstraint::new(9, Shade::Red))];

        let engine = SolverEngine::default();
        let result = engine.solve(&constraints, solution_of(im::hashmap! {}));
        assert!(matches!(
            result,
            Err(crate::error::Error::Engine { .. })
        ));
    }

    #[test]
    fn empty_initial_domain_is_unsatisfiable() {
        let domains = im::hashmap! {
            0 => domain_of(&[]),
        };

        let engine = SolverEngine::default();
        let (solution, _stats) = engine.solve(&[], solution_of(domains)).unwrap();
        assert!(solution.is_none());
    }
}
