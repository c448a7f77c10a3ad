//! Recharge Travels quote service.
//!
//! Serves trip quotes, quick estimates and transfer prices to the booking
//! site and the admin back office.

use recharge_quotes::{
    build_router, cache::QuoteCache, config::Settings, error::AppError, quote::PricingCatalog,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recharge_quotes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env().map_err(AppError::from)?;

    let catalog = match &settings.catalog_path {
        Some(path) => {
            tracing::info!("Loading pricing catalog from {}", path.display());
            PricingCatalog::load(path).map_err(AppError::from)?
        }
        None => {
            tracing::info!("Using built-in Sri Lanka pricing catalog");
            let catalog = PricingCatalog::sri_lanka();
            catalog.verify().map_err(AppError::from)?;
            catalog
        }
    };
    tracing::info!(
        vehicles = catalog.vehicles.len(),
        destinations = catalog.destinations.len(),
        "Pricing catalog ready"
    );

    let cache = QuoteCache::new(settings.cache_capacity, settings.cache_ttl);
    let app = build_router(AppState::new(catalog, cache));

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Listening on {}", settings.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
