//! A conditional constraint: `(X == x) => (Y == y)`.
//!
//! Revision is directional, pruning only the target variable: once `X` is
//! pinned to `x`, `Y` is pruned to `y`; and once `y` leaves `Y`'s domain,
//! `x` is no longer possible for `X`.

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

/// Enforces `(X == x) => (Y == y)`.
#[derive(Debug, Clone)]
pub struct ImpliesEqualConstraint<S: DomainSemantics + std::fmt::Debug> {
    vars: [VariableId; 2],
    condition: S::Value,
    consequence: S::Value,
    _phantom: PhantomData<S>,
}

impl<S: DomainSemantics + std::fmt::Debug> ImpliesEqualConstraint<S> {
    pub fn new(x: VariableId, condition: S::Value, y: VariableId, consequence: S::Value) -> Self {
        Self {
            vars: [x, y],
            condition,
            consequence,
            _phantom: PhantomData,
        }
    }
}

impl<S: DomainSemantics + std::fmt::Debug> Constraint<S> for ImpliesEqualConstraint<S> {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "ImpliesEqualConstraint".to_string(),
            description: format!(
                "(?{} == {:?}) => (?{} == {:?})",
                self.vars[0], self.condition, self.vars[1], self.consequence
            ),
        }
    }

    fn revise(
        &self,
        target_var: &VariableId,
        solution: &Solution<S>,
    ) -> Result<Option<Solution<S>>> {
        let x_var = self.vars[0];
        let y_var = self.vars[1];

        let target_domain = solution.domain(target_var)?;

        let new_domain = if *target_var == y_var {
            // Forward: the condition holds, so the consequence must.
            let x_domain = solution.domain(&x_var)?;
            if !(x_domain.is_singleton() && x_domain.contains(&self.condition)) {
                return Ok(None);
            }
            target_domain.retain(&|v| v == &self.consequence)
        } else if *target_var == x_var {
            // Contrapositive: the consequence is impossible, so the
            // condition cannot hold.
            let y_domain = solution.domain(&y_var)?;
            if y_domain.contains(&self.consequence) {
                return Ok(None);
            }
            target_domain.retain(&|v| v != &self.condition)
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
    fn revise_propagates_the_condition_forward() {
        let constraint = ImpliesEqualConstraint::new(0, Shade::Red, 1, Shade::Green);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red])),
            (1, domain_of(&[Shade::Red, Shade::Green, Shade::Blue])),
        ]);

        let revised = constraint.revise(&1, &solution).unwrap().unwrap();
        let y_domain = revised.domains.get(&1).unwrap();
        assert_eq!(y_domain.get_singleton_value(), Some(Shade::Green));
    }

    #[test]
    fn revise_propagates_the_contrapositive() {
        let constraint = ImpliesEqualConstraint::new(0, Shade::Red, 1, Shade::Green);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red, Shade::Blue])),
            (1, domain_of(&[Shade::Red, Shade::Blue])),
        ]);

        let revised = constraint.revise(&0, &solution).unwrap().unwrap();
        let x_domain = revised.domains.get(&0).unwrap();
        assert_eq!(x_domain.get_singleton_value(), Some(Shade::Blue));
    }

    #[test]
    fn revise_detects_a_violated_implication() {
        // X is pinned to the condition but Y cannot take the consequence.
        let constraint = ImpliesEqualConstraint::new(0, Shade::Red, 1, Shade::Green);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red])),
            (1, domain_of(&[Shade::Blue])),
        ]);

        let revised = constraint.revise(&0, &solution).unwrap().unwrap();
        assert!(revised.domains.get(&0).unwrap().is_empty());

        let revised = constraint.revise(&1, &solution).unwrap().unwrap();
        assert!(revised.domains.get(&1).unwrap().is_empty());
    }

    #[test]
    fn revise_does_nothing_while_the_condition_is_open() {
        let constraint = ImpliesEqualConstraint::new(0, Shade::Red, 1, Shade::Green);
        let solution = solution_of(vec![
            (0, domain_of(&[Shade::Red, Shade::Blue])),
            (1, domain_of(&[Shade::Green, Shade::Blue])),
        ]);

        assert!(constraint.revise(&0, &solution).unwrap().is_none());
        assert!(constraint.revise(&1, &solution).unwrap().is_none());
    }
}
