use std::collections::BTreeSet;

use crate::scalar::ColumnRefId;

/// Ordered set of column ids.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct ColumnRefSet {
    ids: BTreeSet<ColumnRefId>,
}

impl ColumnRefSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I: Into<ColumnRefId>>(&mut self, id: I) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: ColumnRefId) -> bool {
        self.ids.contains(&id)
    }

    pub fn contains_all(&self, other: &ColumnRefSet) -> bool {
        other.ids.is_subset(&self.ids)
    }

    pub fn contains_any(&self, other: &ColumnRefSet) -> bool {
        !self.ids.is_disjoint(&other.ids)
    }

    pub fn union(&mut self, other: &ColumnRefSet) {
        self.ids.extend(other.ids.iter().copied());
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ColumnRefId> + '_ {
        self.ids.iter().copied()
    }
}

impl<I: Into<ColumnRefId>> FromIterator<I> for ColumnRefSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
