//! Per-session wiring.
//!
//! The catalog, the favorites store and the projector are built once per
//! session and passed explicitly; nothing here is process-global.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::catalog::CatalogProvider;
use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::shutdown::ShutdownCoordinator;
use crate::view::{ProjectorHandle, ViewStateProjector};

pub struct Session {
    catalog: Arc<dyn CatalogProvider>,
    favorites: FavoritesStore,
    projector: ProjectorHandle,
    shutdown: ShutdownCoordinator,
    task: JoinHandle<()>,
}

impl Session {
    /// Build the store, apply the configured initial favorites and spawn
    /// the projector. Must be called from within a tokio runtime.
    pub fn start(config: &Config, catalog: Arc<dyn CatalogProvider>) -> Self {
        let favorites = FavoritesStore::with_capacity(config.favorites.feed_capacity);
        for id in &config.favorites.initial {
            if !favorites.is_favorite(id) {
                favorites.toggle(id.as_str());
            }
        }

        let shutdown = ShutdownCoordinator::new();
        let projector = ViewStateProjector::new(
            Arc::clone(&catalog),
            favorites.clone(),
            config.catalog.fetch_latency(),
        );
        let (projector, task) = projector.spawn(shutdown.handle());

        tracing::info!(
            initial_favorites = favorites.current_favorites().len(),
            "Session started"
        );

        Self {
            catalog,
            favorites,
            projector,
            shutdown,
            task,
        }
    }

    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.catalog.as_ref()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn projector(&self) -> &ProjectorHandle {
        &self.projector
    }

    /// Stop the projector loop and wait for it to finish.
    pub async fn shutdown(self) {
        self.shutdown.signal();
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "Projector task ended abnormally");
        }
    }
}
