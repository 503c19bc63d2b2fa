use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::ProductId;

/// Immutable snapshot of the favorited product ids.
///
/// Cloning is cheap (shared storage). Mutation goes through
/// [`FavoritesSet::toggled`], which returns a new set and leaves the
/// original untouched, so a snapshot handed to a reader never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    ids: Arc<BTreeSet<ProductId>>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
    }

    /// Copy of this set with `id` added if absent, removed otherwise.
    ///
    /// Returns the new set and whether `id` is now a member.
    pub fn toggled(&self, id: &ProductId) -> (Self, bool) {
        let mut next = (*self.ids).clone();
        let added = if next.remove(id) {
            false
        } else {
            next.insert(id.clone());
            true
        };
        (Self { ids: Arc::new(next) }, added)
    }
}

impl FromIterator<ProductId> for FavoritesSet {
    fn from_iter<T: IntoIterator<Item = ProductId>>(iter: T) -> Self {
        Self {
            ids: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<'a> FromIterator<&'a str> for FavoritesSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(ProductId::from).collect()
    }
}
