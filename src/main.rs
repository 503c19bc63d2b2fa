use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use storefront::catalog::{Product, StaticCatalog};
use storefront::config::Config;
use storefront::logging::init_tracing;
use storefront::navigation::{Destination, Route};
use storefront::session::Session;
use storefront::view::ViewState;

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Demo storefront catalog and favorites")]
struct Cli {
    /// Config file (default: ~/.config/storefront/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the simulated catalog fetch latency
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Wait for the catalog and print the current view state
    Show {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle favorites in order, printing the set after each
    Toggle {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Resolve a route such as `product/PFI001` and print the destination
    Open { route: String },
    /// Print every published view state until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(latency_ms) = cli.latency_ms {
        config.catalog.fetch_latency_ms = latency_ms;
    }
    init_tracing(&config.logging);

    let session = Session::start(&config, Arc::new(StaticCatalog::mock()));
    let result = run(cli.command, &session).await;
    session.shutdown().await;
    result
}

async fn run(command: Command, session: &Session) -> anyhow::Result<()> {
    let projector = session.projector();
    match command {
        Command::Show { json } => {
            let state = projector.ready().await;
            if json {
                let out = serde_json::to_string_pretty(&state)
                    .context("Failed to serialize view state")?;
                println!("{}", out);
            } else {
                print!("{}", render_state(&state));
            }
        }
        Command::Toggle { ids } => {
            for id in ids {
                projector.toggle_favorite(id.as_str());
                let favorites: Vec<String> = session
                    .favorites()
                    .current_favorites()
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                println!("toggle {:<10} -> {{{}}}", id, favorites.join(", "));
            }
        }
        Command::Open { route } => {
            let route: Route = route.parse()?;
            let state = projector.ready().await;
            let destination = route
                .resolve(&state)
                .with_context(|| format!("Cannot open '{}'", route))?;
            print!("{}", render_destination(&destination, &state));
        }
        Command::Watch => {
            let mut states = projector.subscribe();
            print!("{}", render_state(&states.borrow_and_update().clone()));
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = states.borrow_and_update().clone();
                        println!("---");
                        print!("{}", render_state(&state));
                    }
                }
            }
        }
    }
    Ok(())
}

fn render_state(state: &ViewState) -> String {
    if !state.has_data() {
        return format!("no data (loading: {})\n", state.is_loading());
    }

    let mut out = format!(
        "products: {}, categories: {}, offers: {}, favorites: {}, loading: {}\n",
        state.products().len(),
        state.categories().len(),
        state.offers().len(),
        state.favorites().len(),
        state.is_loading()
    );
    for product in state.matching_products() {
        out.push_str(&render_product(product, state.is_favorite(product.id.as_str())));
    }
    out
}

fn render_product(product: &Product, favorite: bool) -> String {
    let marker = if favorite { '*' } else { ' ' };
    let price = if product.on_sale() {
        format!("R$ {} (was {})", product.sale_price(), product.price)
    } else {
        format!("R$ {}", product.price)
    };
    format!(
        "  [{}] {:<8} {:<12} {}\n",
        marker, product.id, product.brand, price
    )
}

fn render_destination(destination: &Destination, state: &ViewState) -> String {
    match destination {
        Destination::Home => render_state(state),
        Destination::About => {
            "Storefront demo: catalog, offers, categories and favorites.\n".to_string()
        }
        Destination::Favorites { products } => products
            .iter()
            .map(|p| render_product(p, true))
            .collect(),
        Destination::Product(product) => {
            let colors: Vec<&str> = product.colors.iter().map(|c| c.name.as_str()).collect();
            let mut out = render_product(product, state.is_favorite(product.id.as_str()));
            out.push_str(&format!("  {}\n", product.name));
            out.push_str(&format!("  {}\n", product.payment_details));
            out.push_str(&format!("  sizes: {}\n", product.sizes.join(", ")));
            out.push_str(&format!("  colors: {}\n", colors.join(", ")));
            out
        }
        Destination::Offer(offer) => {
            let mut out = format!("{}: {}\n", offer.name, offer.description);
            for product in &offer.products {
                out.push_str(&render_product(product, state.is_favorite(product.id.as_str())));
            }
            out
        }
        Destination::Category { category, products } => {
            let mut out = format!("{}\n", category.name);
            for product in products {
                out.push_str(&render_product(product, state.is_favorite(product.id.as_str())));
            }
            out
        }
    }
}
