use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Axis, ConfigError};

/// An ordered set of active row or column indices.
///
/// Serialized as a plain JSON array. Duplicate indices collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveSet(BTreeSet<u32>);

impl ActiveSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    /// Smallest active index.
    pub fn first(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// Largest active index.
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// True if the indices form one unbroken run.
    pub fn is_contiguous(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last - first) as usize + 1 == self.0.len(),
            _ => true,
        }
    }

    /// Fail if any index is outside `[0, bound)`.
    pub fn check_bounds(&self, axis: Axis, bound: u32) -> Result<(), ConfigError> {
        match self.0.iter().find(|&&index| index >= bound) {
            Some(&index) => Err(ConfigError::IndexOutOfRange { axis, index, bound }),
            None => Ok(()),
        }
    }
}

impl FromIterator<u32> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[u32; N]> for ActiveSet {
    fn from(indices: [u32; N]) -> Self {
        indices.into_iter().collect()
    }
}
