//! # Rusty-Trips Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use actix_web::{web, App, HttpServer};
use rt_api::handlers::AppState;
use rt_api::middleware::{cors_policy, standard_middleware};
use rt_core::TripService;
use settings::Settings;
use std::sync::Arc;

// Feature-gated imports: This is the "Compiled-to-Order" magic
#[cfg(all(feature = "db-sqlite", not(feature = "db-memory")))]
use rt_db_sqlite::SqliteStore;

#[cfg(feature = "db-memory")]
use rt_core::InMemoryStore;

#[cfg(feature = "auth-simple")]
use rt_auth_simple::TokenAuthProvider;

#[cfg(not(any(feature = "db-sqlite", feature = "db-memory")))]
compile_error!("enable one storage feature: db-sqlite or db-memory");

#[cfg(not(feature = "auth-simple"))]
compile_error!("enable an auth feature: auth-simple");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;
    if !settings.policy.enforce_ownership {
        log::warn!("ownership enforcement is OFF: any caller may modify any trip");
    }

    // 1. Initialize Database Implementation
    #[cfg(all(feature = "db-sqlite", not(feature = "db-memory")))]
    let store = Arc::new(SqliteStore::new(&settings.database_url).await?);

    #[cfg(feature = "db-memory")]
    let store = {
        log::warn!("using the in-memory store; data is lost on shutdown");
        Arc::new(InMemoryStore::new())
    };

    // 2. Initialize Auth Implementation (tokens are looked up in the same store)
    #[cfg(feature = "auth-simple")]
    let auth = TokenAuthProvider::new(Box::new(store.clone()));

    // 3. Wrap in AppState (Using dynamic dispatch for maximum flexibility)
    let state = web::Data::new(AppState {
        service: TripService::new(Box::new(store), settings.policy),
        auth: Box::new(auth),
    });

    log::info!(
        "🚀 Rusty-Trips starting on http://{}:{}",
        settings.bind_address,
        settings.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(standard_middleware())
            .wrap(cors_policy())
            .app_data(state.clone())
            .configure(rt_api::configure_routes)
    })
    .bind((settings.bind_address.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
