use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{CatalogSnapshot, Category, Offer, Product};
use crate::favorites::{FavoritesSet, FavoritesSnapshot};
use crate::view::mvi::UiState;

/// Internal model of the storefront home flow.
///
/// Holds the last successfully fetched catalog (if any) next to the
/// latest favorites snapshot. Presentation never sees this type; it
/// receives the [`ViewState`] projected from it.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeModel {
    pub catalog: Option<CatalogSnapshot>,
    pub favorites: FavoritesSnapshot,
    pub is_loading: bool,
    pub search_input: String,
}

impl UiState for HomeModel {}

impl HomeModel {
    /// Model before the first catalog fetch completes.
    pub fn loading() -> Self {
        Self {
            catalog: None,
            favorites: FavoritesSnapshot {
                revision: 0,
                favorites: FavoritesSet::new(),
            },
            is_loading: true,
            search_input: String::new(),
        }
    }

    /// Project the model into the snapshot published to presentation.
    ///
    /// `HasData` requires a completed fetch with at least one product.
    pub fn to_view_state(&self) -> ViewState {
        match &self.catalog {
            Some(catalog) if !catalog.products.is_empty() => ViewState::HasData {
                products: Arc::clone(&catalog.products),
                categories: Arc::clone(&catalog.categories),
                offers: Arc::clone(&catalog.offers),
                favorites: self.favorites.favorites.clone(),
                is_loading: self.is_loading,
                search_input: self.search_input.clone(),
            },
            _ => ViewState::NoData {
                is_loading: self.is_loading,
                search_input: self.search_input.clone(),
            },
        }
    }
}

/// Immutable snapshot consumed by presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    NoData {
        is_loading: bool,
        search_input: String,
    },
    HasData {
        products: Arc<[Product]>,
        categories: Arc<[Category]>,
        offers: Arc<[Offer]>,
        favorites: FavoritesSet,
        is_loading: bool,
        search_input: String,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        match self {
            Self::NoData { is_loading, .. } | Self::HasData { is_loading, .. } => *is_loading,
        }
    }

    pub fn search_input(&self) -> &str {
        match self {
            Self::NoData { search_input, .. } | Self::HasData { search_input, .. } => search_input,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, Self::HasData { .. })
    }

    pub fn products(&self) -> &[Product] {
        match self {
            Self::HasData { products, .. } => products,
            Self::NoData { .. } => &[],
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            Self::HasData { categories, .. } => categories,
            Self::NoData { .. } => &[],
        }
    }

    pub fn offers(&self) -> &[Offer] {
        match self {
            Self::HasData { offers, .. } => offers,
            Self::NoData { .. } => &[],
        }
    }

    /// Favorites as of this snapshot; empty for `NoData`.
    pub fn favorites(&self) -> FavoritesSet {
        match self {
            Self::HasData { favorites, .. } => favorites.clone(),
            Self::NoData { .. } => FavoritesSet::new(),
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        match self {
            Self::HasData { favorites, .. } => favorites.contains(id),
            Self::NoData { .. } => false,
        }
    }

    /// Favorited products in catalog order.
    ///
    /// Favorited ids with no catalog record are skipped.
    pub fn favorite_products(&self) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| self.is_favorite(p.id.as_str()))
            .collect()
    }

    pub fn products_in_category(&self, code: &str) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.in_category(code))
            .collect()
    }

    pub fn featured_products(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.featured).collect()
    }

    /// Products whose name or brand contains the search input,
    /// ignoring case. An empty input matches everything.
    pub fn matching_products(&self) -> Vec<&Product> {
        let needle = self.search_input().trim().to_lowercase();
        self.products()
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
