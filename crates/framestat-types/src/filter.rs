//! Allow-set filtering on a single dimension.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Immutable set of admissible values, supplied per aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeSet<u64>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, value: u64) -> bool {
        self.0.contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &FilterSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<u64> for FilterSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeSet<u64>> for FilterSet {
    fn from(values: BTreeSet<u64>) -> Self {
        Self(values)
    }
}

impl From<Vec<u64>> for FilterSet {
    fn from(values: Vec<u64>) -> Self {
        values.into_iter().collect()
    }
}

impl<const N: usize> From<[u64; N]> for FilterSet {
    fn from(values: [u64; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Decides whether a hit takes part in the aggregation.
///
/// With no set, or an empty one, every value is admitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    allowed: Option<FilterSet>,
}

impl FilterPredicate {
    pub fn new(allowed: Option<FilterSet>) -> Self {
        Self {
            allowed: allowed.filter(|set| !set.is_empty()),
        }
    }

    pub fn admit_all() -> Self {
        Self { allowed: None }
    }

    pub fn only(allowed: impl Into<FilterSet>) -> Self {
        Self::new(Some(allowed.into()))
    }

    /// True when the predicate can reject values.
    pub fn is_active(&self) -> bool {
        self.allowed.is_some()
    }

    pub fn admits(&self, value: u64) -> bool {
        match &self.allowed {
            Some(set) => set.contains(value),
            None => true,
        }
    }
}
