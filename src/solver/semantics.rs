use crate::solver::{constraint::Constraint, value::ValueEquality};

/// A trait that defines the "frontend" for a specific problem domain.
///
/// This is the primary interface for connecting a concrete problem (like the
/// Light Up frontend in this crate) to the generic solver engine. By
/// implementing this trait, you give the engine all the information it needs
/// about your problem's value type and rules.
pub trait DomainSemantics: 'static + Clone {
    /// The concrete type for a value in a variable's domain.
    type Value: ValueEquality;

    /// Semantic information attached to each variable, e.g. a grid
    /// coordinate. The engine carries it around untouched; frontends use it
    /// to map a solved variable back onto their own problem shape.
    type VariableMetadata: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static;

    /// A structure that declares a single constraint in the problem domain.
    ///
    /// Typically an enum where each variant is a different kind of rule.
    type ConstraintDefinition: std::fmt::Debug;

    /// A factory method that constructs a runnable [`Constraint`] object from
    /// its declarative definition.
    fn build_constraint(
        &self,
        definition: &Self::ConstraintDefinition,
    ) -> Box<dyn Constraint<Self>>;
}
