//! The standard library of generic constraints understood by the engine.
//!
//! Each constraint is problem-agnostic: it ranges over variable IDs and
//! domain values supplied by a frontend, and implements the propagation
//! contract of [`crate::solver::constraint::Constraint`].

pub mod exact_count;
pub mod forbid_value;
pub mod implies_any_equal;
pub mod implies_equal;
pub mod require_value;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use im::HashMap;

    use crate::solver::{
        constraint::Constraint,
        engine::VariableId,
        semantics::DomainSemantics,
        solution::{Domain, HashSetDomain, Solution},
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Shade {
        Red,
        Green,
        Blue,
    }

    #[derive(Debug, Clone)]
    pub struct TestSemantics;

    impl DomainSemantics for TestSemantics {
        type Value = Shade;
        type VariableMetadata = ();
        type ConstraintDefinition = ();

        fn build_constraint(&self, _definition: &()) -> Box<dyn Constraint<Self>> {
            unimplemented!("not needed for constraint unit tests")
        }
    }

    pub fn domain_of(values: &[Shade]) -> Domain<Shade> {
        Box::new(HashSetDomain::of(values))
    }

    pub fn solution_of(domains: Vec<(VariableId, Domain<Shade>)>) -> Solution<TestSemantics> {
        Solution::new(
            domains.into_iter().collect(),
            HashMap::new(),
            Arc::new(TestSemantics),
        )
    }
}
