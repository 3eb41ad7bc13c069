//! HTTP API over the Rick & Morty catalogue
//!
//! Episodes and characters are read-only; users and comments support full
//! CRUD. Every route except `/health` and `/token` requires a bearer token
//! issued by `/token`.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extract;
pub mod importer;
pub mod integrity;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
