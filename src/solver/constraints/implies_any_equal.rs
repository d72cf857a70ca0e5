//! A conditional disjunction: `(X == x) => (Y1 == y or ... or Yn == y)`.
//!
//! Revision is directional, pruning only the target variable. For the
//! condition variable, `x` loses support once no witness can take `y`. For
//! a witness, support analysis is relative to the others: if the condition
//! is pinned and no other witness can take `y`, this one must.

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

/// Enforces `(X == x) => at least one of [Y1..Yn] == y`.
#[derive(Debug, Clone)]
pub struct ImpliesAnyEqualConstraint<S: DomainSemantics + std::fmt::Debug> {
    condition_var: VariableId,
    condition: S::Value,
    witnesses: Vec<VariableId>,
    witness_value: S::Value,
    all_vars: Vec<VariableId>,
    _phantom: PhantomData<S>,
}

impl<S: DomainSemantics + std::fmt::Debug> ImpliesAnyEqualConstraint<S> {
    pub fn new(
        condition_var: VariableId,
        condition: S::Value,
        witnesses: Vec<VariableId>,
        witness_value: S::Value,
    ) -> Self {
        let mut all_vars = witnesses.clone();
        all_vars.push(condition_var);
        Self {
            condition_var,
            condition,
            witnesses,
            witness_value,
            all_vars,
            _phantom: PhantomData,
        }
    }
}

impl<S: DomainSemantics + std::fmt::Debug> Constraint<S> for ImpliesAnyEqualConstraint<S> {
    fn variables(&self) -> &[VariableId] {
        &self.all_vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let witnesses_str = self
            .witnesses
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "ImpliesAnyEqualConstraint".to_string(),
            description: format!(
                "(?{} == {:?}) => any of [{}] == {:?}",
                self.condition_var, self.condition, witnesses_str, self.witness_value
            ),
        }
    }

    fn revise(
        &self,
        target_var: &VariableId,
        solution: &Solution<S>,
    ) -> Result<Option<Solution<S>>> {
        let target_domain = solution.domain(target_var)?;

        let new_domain = if *target_var == self.condition_var {
            // No witness can take the value, so the condition cannot hold.
            let mut any_possible = false;
            for witness in &self.witnesses {
                if solution.domain(witness)?.contains(&self.witness_value) {
                    any_possible = true;
                    break;
                }
            }
            if any_possible {
                return Ok(None);
            }
            target_domain.retain(&|v| v != &self.condition)
        } else {
            // The condition is pinned and every other witness is out: the
            // target must be the witness.
            let x_domain = solution.domain(&self.condition_var)?;
            if !(x_domain.is_singleton() && x_domain.contains(&self.condition)) {
                return Ok(None);
            }
            let mut others_possible = false;
            for witness in &self.witnesses {
                if witness == target_var {
                    continue;
                }
                if solution.domain(witness)?.contains(&self.witness_value) {
                    others_possible = true;
                    break;
                }
            }
            if others_possible {
                return Ok(None);
            }
            target_domain.retain(&|v| v == &self.witness_value)
        };

        if new_domain.len() < target_domain.len() {
            let new_domains = solution.domains.update(*target_var, new_domain);
            Ok(Some(solution.clone_with_domains(new_domains)))
        } else {
            Ok(None)
        }
    }
}
