use crate::catalog::CatalogSnapshot;
use crate::favorites::FavoritesSnapshot;
use crate::view::mvi::Intent;

#[derive(Debug, Clone)]
pub enum HomeIntent {
    /// A catalog fetch was issued. Keeps the last good catalog.
    RefreshStarted,
    /// The fetch completed; `favorites` was read from the store at merge time.
    CatalogLoaded {
        catalog: CatalogSnapshot,
        favorites: FavoritesSnapshot,
    },
    /// The fetch task failed. Clears loading, keeps the last good catalog.
    CatalogFailed,
    /// The favorites feed emitted a new snapshot.
    FavoritesChanged(FavoritesSnapshot),
    SearchInput(String),
}

impl Intent for HomeIntent {}
