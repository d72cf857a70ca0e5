//! A counting constraint: exactly `n` of the given variables take a value.

use std::marker::PhantomData;

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        engine::VariableId,
        semantics::DomainSemantics,
        solution::Solution,
    },
};

/// Enforces `|{ i : Xi == v }| == n`.
///
/// Propagation works from the two bounds on the count: variables already
/// pinned to `v` give the lower bound, variables that can still take `v` give
/// the upper bound. When either bound meets `n`, the remaining variables are
/// forced; when `n` falls outside the bounds, the state is inconsistent.
#[derive(Debug, Clone)]
pub struct ExactCountConstraint<S: DomainSemantics + std::fmt::Debug> {
    vars: Vec<VariableId>,
    value: S::Value,
    count: usize,
    _phantom: PhantomData<S>,
}

impl<S: DomainSemantics + std::fmt::Debug> ExactCountConstraint<S> {
    pub fn new(vars: Vec<VariableId>, value: S::Value, count: usize) -> Self {
        Self {
            vars,
            value,
            count,
            _phantom: PhantomData,
        }
    }
}

impl<S: DomainSemantics + std::fmt::Debug> Constraint<S> for ExactCountConstraint<S> {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars_str = self
            .vars
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "ExactCountConstraint".to_string(),
            description: format!(
                "|[{}] == {:?}| == {}",
                vars_str, self.value, self.count
            ),
        }
    }

    fn revise(
        &self,
        target_var: &VariableId,
        solution: &Solution<S>,
    ) -> Result<Option<Solution<S>>> {
        if !self.vars.contains(target_var) {
            return Ok(None);
        }

        let mut pinned = 0;
        let mut possible = 0;
        for var in &self.vars {
            let domain = solution.domain(var)?;
            if domain.contains(&self.value) {
                possible += 1;
                if domain.is_singleton() {
                    pinned += 1;
                }
            }
        }

        let target_domain = solution.domain(target_var)?;

        // The count can no longer be met: signal the contradiction by
        // emptying the target's domain.
        if pinned > self.count || possible < self.count {
            let empty = target_domain.retain(&|_| false);
            let new_domains = solution.domains.update(*target_var, empty);
            return Ok(Some(solution.clone_with_domains(new_domains)));
        }

        let new_domain = if pinned == self.count {
            // Quota already met: no undecided variable may take the value.
            if target_domain.is_singleton() {
                return Ok(None);
            }
            target_domain.retain(&|v| v != &self.value)
        } else if possible == self.count {
            // Every remaining candidate is needed to reach the count.
            if !target_domain.contains(&self.value) {
                return Ok(None);
            }
            target_domain.retain(&|v| v == &self.value)
        } else {
            return Ok(None);
        };

        if new_domain.len() < target_domain.len() {
            let new_domains = solution.domains.update(*target_var, new_domain);
            Ok(Some(solution.clone_with_domains(new_domains)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraints::test_support::{domain_of, solution_of, Shade};

    #[test]
    fn revise_excludes_the_value_once_the_quota_is_met() {
        let constraint = ExactCountConstraint::new(vec![0, 1, 2], Shade::Red, 1);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red])),
            (1, domain_of(&[Shade::Red, Shade::Green])),
            (2, domain_of(&[Shade::Red, Shade::Blue])),
        ]);

        let revised = constraint.revise(&1, &solution).unwrap().unwrap();
        let domain = revised.domains.get(&1).unwrap();
        assert_eq!(domain.get_singleton_value(), Some(Shade::Green));
    }

    #[test]
    fn revise_pins_every_candidate_when_all_are_needed() {
        let constraint = ExactCountConstraint::new(vec![0, 1], Shade::Red, 2);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red, Shade::Green])),
            (1, domain_of(&[Shade::Red, Shade::Blue])),
        ]);

        let revised = constraint.revise(&0, &solution).unwrap().unwrap();
        let domain = revised.domains.get(&0).unwrap();
        assert_eq!(domain.get_singleton_value(), Some(Shade::Red));
    }

    #[test]
    fn revise_detects_too_many_pinned_values() {
        let constraint = ExactCountConstraint::new(vec![0, 1], Shade::Red, 0);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red])),
            (1, domain_of(&[Shade::Green])),
        ]);

        let revised = constraint.revise(&0, &solution).unwrap().unwrap();
        assert!(revised.domains.get(&0).unwrap().is_empty());
    }

    #[test]
    fn revise_detects_an_unreachable_count() {
        let constraint = ExactCountConstraint::new(vec![0, 1], Shade::Red, 2);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Green])),
            (1, domain_of(&[Shade::Red, Shade::Green])),
        ]);

        let revised = constraint.revise(&1, &solution).unwrap().unwrap();
        assert!(revised.domains.get(&1).unwrap().is_empty());
    }

    #[test]
    fn revise_does_nothing_while_the_count_is_open() {
        let constraint = ExactCountConstraint::new(vec![0, 1, 2], Shade::Red, 1);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red, Shade::Green])),
            (1, domain_of(&[Shade::Red, Shade::Green])),
            (2, domain_of(&[Shade::Red, Shade::Green])),
        ]);

        assert!(constraint.revise(&0, &solution).unwrap().is_none());
    }

    #[test]
    fn a_zero_count_over_excluded_domains_is_satisfied() {
        let constraint = ExactCountConstraint::new(vec![0, 1], Shade::Red, 0);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Green])),
            (1, domain_of(&[Shade::Blue])),
        ]);

        assert!(constraint.revise(&0, &solution).unwrap().is_none());
    }
}
