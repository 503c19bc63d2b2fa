//! View state projector.
//!
//! Merges one catalog fetch with the live favorites feed and publishes
//! a fresh [`ViewState`] on every change. All transitions go through
//! [`HomeReducer`] inside a single task, so published snapshots are
//! totally ordered and never mutated after publish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::catalog::{CatalogProvider, CatalogSnapshot, ProductId};
use crate::favorites::{FavoritesStore, FavoritesSubscription};
use crate::shutdown::ShutdownHandle;
use crate::view::home::{HomeIntent, HomeModel, HomeReducer, ViewState};
use crate::view::mvi::Reducer;

#[derive(Debug)]
enum ProjectorCommand {
    Refresh,
    SearchInput(String),
}

/// Builds the projector task for one session.
pub struct ViewStateProjector {
    provider: Arc<dyn CatalogProvider>,
    favorites: FavoritesStore,
    fetch_latency: Duration,
}

impl ViewStateProjector {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        favorites: FavoritesStore,
        fetch_latency: Duration,
    ) -> Self {
        Self {
            provider,
            favorites,
            fetch_latency,
        }
    }

    /// Publish the initial loading state, start the catalog fetch and
    /// spawn the projection loop.
    ///
    /// The loop runs until `shutdown` fires or every [`ProjectorHandle`]
    /// is dropped. Must be called from within a tokio runtime.
    pub fn spawn(self, shutdown: ShutdownHandle) -> (ProjectorHandle, JoinHandle<()>) {
        let model = HomeModel::loading();
        let (state_tx, state_rx) = watch::channel(model.to_view_state());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let feed = self.favorites.changes();

        let handle = ProjectorHandle {
            commands: command_tx,
            state: state_rx,
            favorites: self.favorites.clone(),
        };
        let task = tokio::spawn(self.run(model, command_rx, feed, state_tx, shutdown));
        (handle, task)
    }

    async fn run(
        self,
        mut model: HomeModel,
        mut commands: mpsc::UnboundedReceiver<ProjectorCommand>,
        mut feed: FavoritesSubscription,
        state_tx: watch::Sender<ViewState>,
        shutdown: ShutdownHandle,
    ) {
        let (fetch_tx, mut fetch_rx) = mpsc::channel::<Option<CatalogSnapshot>>(1);
        self.start_fetch(fetch_tx.clone());
        let mut fetching = true;
        let mut feed_open = true;

        loop {
            let intent = tokio::select! {
                _ = shutdown.wait() => break,
                Some(fetched) = fetch_rx.recv() => {
                    fetching = false;
                    match fetched {
                        Some(catalog) => {
                            tracing::info!(
                                products = catalog.products.len(),
                                categories = catalog.categories.len(),
                                offers = catalog.offers.len(),
                                "Catalog fetch completed"
                            );
                            // Read fresh so changes made while loading are folded in.
                            HomeIntent::CatalogLoaded {
                                catalog,
                                favorites: self.favorites.snapshot(),
                            }
                        }
                        None => HomeIntent::CatalogFailed,
                    }
                }
                command = commands.recv() => match command {
                    Some(ProjectorCommand::Refresh) => {
                        if fetching {
                            tracing::debug!("Refresh ignored, catalog fetch already in flight");
                            continue;
                        }
                        self.start_fetch(fetch_tx.clone());
                        fetching = true;
                        HomeIntent::RefreshStarted
                    }
                    Some(ProjectorCommand::SearchInput(text)) => HomeIntent::SearchInput(text),
                    None => {
                        tracing::debug!("All projector handles dropped");
                        break;
                    }
                },
                change = feed.recv(), if feed_open => match change {
                    Some(snapshot) => HomeIntent::FavoritesChanged(snapshot),
                    None => {
                        feed_open = false;
                        continue;
                    }
                },
            };

            model = HomeReducer::reduce(model, intent);
            publish(&state_tx, &model);
        }

        tracing::debug!("Projector loop stopped");
    }

    /// Always reports back on `done`, with `None` if the provider failed.
    fn start_fetch(&self, done: mpsc::Sender<Option<CatalogSnapshot>>) {
        let provider = Arc::clone(&self.provider);
        let latency = self.fetch_latency;
        tracing::info!(latency_ms = latency.as_millis() as u64, "Catalog fetch started");

        tokio::spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let catalog = match tokio::task::spawn_blocking(move || provider.snapshot()).await {
                Ok(catalog) => Some(catalog),
                Err(err) => {
                    tracing::error!(error = %err, "Catalog fetch task failed");
                    None
                }
            };
            if done.send(catalog).await.is_err() {
                tracing::trace!("Catalog fetched after projector stopped");
            }
        });
    }
}

fn publish(state_tx: &watch::Sender<ViewState>, model: &HomeModel) {
    let next = model.to_view_state();
    state_tx.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

/// Presentation-side command surface of a running projector.
///
/// Commands are fire-and-forget: effects are observed through
/// [`ProjectorHandle::subscribe`].
#[derive(Clone)]
pub struct ProjectorHandle {
    commands: mpsc::UnboundedSender<ProjectorCommand>,
    state: watch::Receiver<ViewState>,
    favorites: FavoritesStore,
}

impl ProjectorHandle {
    /// Toggle a favorite through the store's gate.
    ///
    /// Never computes the next set here: the store is the only writer.
    pub fn toggle_favorite(&self, id: impl Into<ProductId>) {
        self.favorites.toggle(id);
    }

    /// Re-fetch the catalog, keeping favorites and the last good snapshot.
    ///
    /// No-op while a fetch is already in flight.
    pub fn refresh(&self) {
        self.send(ProjectorCommand::Refresh);
    }

    pub fn set_search_input(&self, text: impl Into<String>) {
        self.send(ProjectorCommand::SearchInput(text.into()));
    }

    /// Latest published snapshot.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait for the first snapshot that is not loading.
    ///
    /// Returns the latest snapshot if the projector stops first.
    pub async fn ready(&self) -> ViewState {
        let mut rx = self.state.clone();
        let ready = rx.wait_for(|state| !state.is_loading()).await.map(|s| s.clone());
        ready.unwrap_or_else(|_| rx.borrow().clone())
    }

    fn send(&self, command: ProjectorCommand) {
        if let Err(err) = self.commands.send(command) {
            tracing::trace!(command = ?err.0, "Projector command dropped (loop stopped)");
        }
    }
}
