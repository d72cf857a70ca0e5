//! A unary constraint that excludes a single value: `X != v`.

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

/// Enforces `X != v`.
#[derive(Debug, Clone)]
pub struct ForbidValueConstraint<S: DomainSemantics + std::fmt::Debug> {
    vars: [VariableId; 1],
    value: S::Value,
    _phantom: PhantomData<S>,
}

impl<S: DomainSemantics + std::fmt::Debug> ForbidValueConstraint<S> {
    pub fn new(var: VariableId, value: S::Value) -> Self {
        Self {
            vars: [var],
            value,
            _phantom: PhantomData,
        }
    }
}

impl<S: DomainSemantics + std::fmt::Debug> Constraint<S> for ForbidValueConstraint<S> {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "ForbidValueConstraint".to_string(),
            description: format!("?{} != {:?}", self.vars[0], self.value),
        }
    }

    fn revise(
        &self,
        target_var: &VariableId,
        solution: &Solution<S>,
    ) -> Result<Option<Solution<S>>> {
        let target_domain = solution.domain(target_var)?;
        let new_domain = target_domain.retain(&|v| v != &self.value);

        if new_domain.len() < target_domain.len() {
            let new_domains = solution.domains.update(*target_var, new_domain);
            Ok(Some(solution.clone_with_domains(new_domains)))
        } else {
            Ok(None)
        }
    }
}
