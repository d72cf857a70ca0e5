use std::sync::Arc;

use im::{HashMap, HashSet};

use crate::{
    error::SolverError,
    solver::{engine::VariableId, semantics::DomainSemantics, value::ValueEquality},
};

pub type Domain<V> = Box<dyn DomainRepresentation<V>>;
pub type Domains<V> = HashMap<VariableId, Domain<V>>;

/// A single, immutable state in the solver's search space.
///
/// A `Solution` holds the current domain of possible values for every
/// declared variable. Because it uses persistent (immutable) data structures,
/// it can be cloned cheaply: when a constraint prunes a domain, a new
/// `Solution` is created rather than mutating the existing one.
#[derive(Clone, Debug)]
pub struct Solution<S: DomainSemantics> {
    /// A map from each variable's ID to its current domain of possible values.
    pub domains: Domains<S::Value>,
    /// Per-variable semantic metadata, untouched by the engine.
    pub metadata: HashMap<VariableId, S::VariableMetadata>,
    /// Read-only access to the problem's semantics, shared across all states.
    pub semantics: Arc<S>,
}

impl<S: DomainSemantics> Solution<S> {
    pub fn new(
        domains: Domains<S::Value>,
        metadata: HashMap<VariableId, S::VariableMetadata>,
        semantics: Arc<S>,
    ) -> Self {
        Self {
            domains,
            metadata,
            semantics,
        }
    }

    /// A copy of this state with different domains; metadata and semantics
    /// are shared.
    pub fn clone_with_domains(&self, domains: Domains<S::Value>) -> Self {
        Self {
            domains,
            metadata: self.metadata.clone(),
            semantics: self.semantics.clone(),
        }
    }

    /// Looks up the domain of a declared variable.
    ///
    /// A constraint asking for a variable that was never declared is an
    /// engine-level failure, not a puzzle-level one.
    pub fn domain(&self, var: &VariableId) -> Result<&Domain<S::Value>, SolverError> {
        self.domains
            .get(var)
            .ok_or(SolverError::UnknownVariable(*var))
    }

    /// Checks whether every variable's domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(|domain| domain.is_singleton())
    }
}

/// A trait for different ways to represent a variable's domain.
///
/// This allows the engine to be flexible about how domains are stored while
/// providing a consistent interface for its algorithms.
pub trait DomainRepresentation<V: ValueEquality>: std::fmt::Debug {
    /// Returns the number of possible values in the domain.
    fn len(&self) -> usize;

    /// Returns `true` if the domain contains no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the domain contains exactly one value.
    fn is_singleton(&self) -> bool {
        self.len() == 1
    }

    /// If the domain is a singleton, returns the single value.
    fn get_singleton_value(&self) -> Option<V>;

    /// Returns `true` if `value` is still possible for this variable.
    fn contains(&self, value: &V) -> bool;

    /// Returns an iterator over the values in the domain.
    fn iter(&self) -> Box<dyn Iterator<Item = &V> + '_>;

    /// Creates a new domain containing only the values that satisfy the
    /// predicate.
    fn retain(&self, f: &dyn Fn(&V) -> bool) -> Box<dyn DomainRepresentation<V>>;

    /// Returns a boxed clone of the domain.
    fn clone_box(&self) -> Box<dyn DomainRepresentation<V>>;
}

/// A [`DomainRepresentation`] backed by an `im::HashSet`.
///
/// Efficient for the small, explicitly enumerated domains used by puzzle
/// frontends, and cheap to clone during search.
#[derive(Clone, Debug)]
pub struct HashSetDomain<V: ValueEquality>(pub HashSet<V>);

impl<V: ValueEquality> HashSetDomain<V> {
    pub fn new(values: HashSet<V>) -> Self {
        Self(values)
    }

    /// Builds a domain from an explicit list of values.
    pub fn of(values: &[V]) -> Self {
        Self(values.iter().cloned().collect())
    }
}

impl<V: ValueEquality> DomainRepresentation<V> for HashSetDomain<V> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get_singleton_value(&self) -> Option<V> {
        if self.len() == 1 {
            self.0.iter().next().cloned()
        } else {
            None
        }
    }

    fn contains(&self, value: &V) -> bool {
        self.0.contains(value)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.0.iter())
    }

    fn retain(&self, f: &dyn Fn(&V) -> bool) -> Box<dyn DomainRepresentation<V>> {
        let new_set = self.0.iter().filter(|v| f(v)).cloned().collect();
        Box::new(Self(new_set))
    }

    fn clone_box(&self) -> Box<dyn DomainRepresentation<V>> {
        Box::new(self.clone())
    }
}

impl<V: ValueEquality> Clone for Box<dyn DomainRepresentation<V>> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
