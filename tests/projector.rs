use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use storefront::catalog::{CatalogProvider, Category, Offer, Product, StaticCatalog};
use storefront::config::Config;
use storefront::favorites::FavoritesStore;
use storefront::session::Session;
use storefront::shutdown::ShutdownCoordinator;
use storefront::view::{ViewState, ViewStateProjector};

/// Mock catalog that counts fetches.
struct CountingCatalog {
    inner: StaticCatalog,
    fetches: AtomicUsize,
}

impl CountingCatalog {
    fn new(inner: StaticCatalog) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fetches: AtomicUsize::new(0),
        })
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CatalogProvider for CountingCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.list_products()
    }

    fn list_categories(&self) -> Vec<Category> {
        self.inner.list_categories()
    }

    fn list_offers(&self) -> Vec<Offer> {
        self.inner.list_offers()
    }
}

/// Mock catalog whose first product listing panics.
struct FlakyCatalog {
    inner: StaticCatalog,
    failed: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyCatalog {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: StaticCatalog::mock(),
            failed: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogProvider for FlakyCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.failed.swap(true, Ordering::SeqCst) {
            panic!("catalog backend unavailable");
        }
        self.inner.list_products()
    }

    fn list_categories(&self) -> Vec<Category> {
        self.inner.list_categories()
    }

    fn list_offers(&self) -> Vec<Offer> {
        self.inner.list_offers()
    }
}

fn config_with_latency(ms: u64) -> Config {
    let mut config = Config::default();
    config.catalog.fetch_latency_ms = ms;
    config
}

fn product_ids(state: &ViewState) -> Vec<String> {
    state.products().iter().map(|p| p.id.to_string()).collect()
}

#[tokio::test]
async fn test_initial_state_is_loading_no_data() {
    let session = Session::start(&config_with_latency(60_000), Arc::new(StaticCatalog::mock()));
    assert_eq!(
        session.projector().state(),
        ViewState::NoData {
            is_loading: true,
            search_input: String::new(),
        }
    );
    session.shutdown().await;
}

#[tokio::test]
async fn test_ready_state_has_catalog_in_order() {
    let catalog = Arc::new(StaticCatalog::mock());
    let session = Session::start(&config_with_latency(0), catalog.clone());

    let state = session.projector().ready().await;
    assert!(state.has_data());
    assert!(!state.is_loading());

    let expected: Vec<String> = catalog
        .list_products()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(product_ids(&state), expected);
    assert_eq!(state.categories().len(), 6);
    assert_eq!(state.offers().len(), 5);
    assert_eq!(state.favorites(), session.favorites().current_favorites());

    session.shutdown().await;
}

#[tokio::test]
async fn test_empty_catalog_never_has_data() {
    let session = Session::start(&config_with_latency(0), Arc::new(StaticCatalog::empty()));
    let mut states = session.projector().subscribe();

    let state = session.projector().ready().await;
    assert_eq!(
        state,
        ViewState::NoData {
            is_loading: false,
            search_input: String::new(),
        }
    );

    session.favorites().toggle("PFI001");
    session.projector().set_search_input("camiseta");
    states
        .wait_for(|s| {
            assert!(!s.has_data(), "empty catalog published HasData: {:?}", s);
            s.search_input() == "camiseta"
        })
        .await
        .unwrap();

    // Any emission still queued behind the search input must be NoData too.
    while let Ok(changed) = tokio::time::timeout(Duration::from_millis(50), states.changed()).await {
        changed.unwrap();
        assert!(!states.borrow_and_update().has_data());
    }

    session.shutdown().await;
}

#[tokio::test]
async fn test_failed_fetch_does_not_block_refresh() {
    let catalog = FlakyCatalog::new();
    let session = Session::start(&config_with_latency(0), catalog.clone());
    let projector = session.projector();

    let failed = projector.ready().await;
    assert!(!failed.has_data());
    assert!(!failed.is_loading());
    assert_eq!(catalog.calls(), 1);

    let mut states = projector.subscribe();
    projector.refresh();
    let reloaded = tokio::time::timeout(
        Duration::from_secs(5),
        states.wait_for(|s| s.has_data() && !s.is_loading()),
    )
    .await
    .expect("refresh after a failed fetch should load the catalog")
    .unwrap()
    .clone();

    assert_eq!(reloaded.products().len(), 7);
    assert_eq!(catalog.calls(), 2);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_favorites_toggled_while_loading_are_folded_in() {
    let session = Session::start(&config_with_latency(5_000), Arc::new(StaticCatalog::mock()));
    let projector = session.projector();

    projector.toggle_favorite("PFI001");
    projector.toggle_favorite("INF001");
    projector.toggle_favorite("PFI001");
    assert!(!projector.state().has_data());

    let state = projector.ready().await;
    assert!(state.has_data());
    assert!(state.is_favorite("INF001"));
    assert!(!state.is_favorite("PFI001"));

    session.shutdown().await;
}

#[tokio::test]
async fn test_toggle_after_ready_publishes_new_snapshot() {
    let session = Session::start(&config_with_latency(0), Arc::new(StaticCatalog::mock()));
    let projector = session.projector();
    let before = projector.ready().await;

    let mut states = projector.subscribe();
    projector.toggle_favorite("MASC015");
    let after = states
        .wait_for(|s| s.is_favorite("MASC015"))
        .await
        .unwrap()
        .clone();

    assert!(after.has_data());
    assert_eq!(product_ids(&after), product_ids(&before));
    let favorites: Vec<String> = after
        .favorite_products()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(favorites, vec!["MASC015"]);

    // The earlier snapshot is never mutated by a later publish.
    assert!(!before.is_favorite("MASC015"));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_refresh_keeps_last_snapshot_and_favorites() {
    let session = Session::start(&config_with_latency(1_000), Arc::new(StaticCatalog::mock()));
    let projector = session.projector();
    projector.ready().await;
    projector.toggle_favorite("FEM001");

    let mut states = projector.subscribe();
    projector.refresh();

    let loading = states.wait_for(|s| s.is_loading()).await.unwrap().clone();
    assert!(loading.has_data(), "refresh must not flash empty content");

    let reloaded = states.wait_for(|s| !s.is_loading()).await.unwrap().clone();
    assert!(reloaded.has_data());
    assert!(reloaded.is_favorite("FEM001"));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_refresh_while_in_flight_is_ignored() {
    let catalog = CountingCatalog::new(StaticCatalog::mock());
    let session = Session::start(&config_with_latency(1_000), catalog.clone());
    let projector = session.projector();

    projector.refresh();
    projector.ready().await;
    assert_eq!(catalog.fetches(), 1);

    projector.refresh();
    projector.refresh();
    let mut states = projector.subscribe();
    states.wait_for(|s| s.is_loading()).await.unwrap();
    states.wait_for(|s| !s.is_loading()).await.unwrap();
    assert_eq!(catalog.fetches(), 2);

    session.shutdown().await;
}

#[tokio::test]
async fn test_search_input_is_published() {
    let session = Session::start(&config_with_latency(0), Arc::new(StaticCatalog::mock()));
    let projector = session.projector();
    projector.ready().await;

    projector.set_search_input("lince");
    let mut states = projector.subscribe();
    let state = states
        .wait_for(|s| s.search_input() == "lince")
        .await
        .unwrap()
        .clone();

    let matches: Vec<String> = state
        .matching_products()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(matches, vec!["MASC015"]);

    session.shutdown().await;
}

#[tokio::test]
async fn test_initial_favorites_from_config() {
    let mut config = config_with_latency(0);
    config.favorites.initial = vec!["PFI001".to_string(), "PFI001".to_string(), "FEM015".to_string()];
    let session = Session::start(&config, Arc::new(StaticCatalog::mock()));

    let state = session.projector().ready().await;
    assert!(state.is_favorite("PFI001"));
    assert!(state.is_favorite("FEM015"));
    assert_eq!(state.favorites().len(), 2);

    session.shutdown().await;
}

#[tokio::test]
async fn test_commands_after_shutdown_are_dropped() {
    let session = Session::start(&config_with_latency(0), Arc::new(StaticCatalog::mock()));
    let projector = session.projector().clone();
    projector.ready().await;
    session.shutdown().await;

    projector.refresh();
    projector.set_search_input("ignored");
    assert_eq!(projector.state().search_input(), "");
}

#[tokio::test]
async fn test_loop_stops_when_handles_dropped() {
    let shutdown = ShutdownCoordinator::new();
    let projector = ViewStateProjector::new(
        Arc::new(StaticCatalog::mock()),
        FavoritesStore::new(),
        Duration::ZERO,
    );
    let (handle, task) = projector.spawn(shutdown.handle());
    handle.ready().await;
    drop(handle);

    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("projector loop should stop")
        .unwrap();
    assert!(!shutdown.is_shutting_down());
}
