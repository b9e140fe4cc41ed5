use savora_api::{app, AppState};
use savora_reserve::{HoldManager, RandomSlots, ReservationManager};
use savora_store::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "savora_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = savora_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Savora API on port {}", config.server.port);
    tracing::info!(
        holds_table = %config.tables.holds,
        reservations_table = %config.tables.reservations,
        restaurants_table = %config.tables.restaurants,
        "store tables configured"
    );

    // In-memory store adapter; a managed keyed store drops in behind the
    // same traits.
    let store = Arc::new(MemoryStore::new());

    let app_state = AppState {
        holds: Arc::new(HoldManager::new(
            store.clone(),
            config.booking_rules.clone(),
        )),
        reservations: Arc::new(ReservationManager::new(
            store.clone(),
            store.clone(),
            store.clone(),
            config.booking_rules.clone(),
        )),
        availability: Arc::new(RandomSlots::new(config.availability.clone())),
        catalog: store.clone(),
        preferences: store,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
