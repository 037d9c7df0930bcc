mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpResponse, HttpServer,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{Config, StartupPolicy};
use crate::db::Database;
use crate::store::StoreFactory;
use crate::utils::id::{IdGenerator, UuidGenerator};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub ids: Arc<dyn IdGenerator>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Crawler API");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded from environment (store: {:?}, database: {})",
        config.store_backend, config.database
    );

    let store = StoreFactory::create(config.store_backend, config.mongo_config()?).await?;
    let db = Database::new(store);
    check_database(&db, config.startup_policy).await?;

    let state = web::Data::new(AppState {
        db: db.clone(),
        config: Arc::new(config.clone()),
        ids: Arc::new(UuidGenerator),
    });

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let cors_allow_origin = config.cors_allow_origin.clone();

    info!("Server running at http://{}", addr);

    let server = HttpServer::new(move || {
        let cors = if cors_allow_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            let mut cors = Cors::default();
            for origin in cors_allow_origin.split(',').map(|s| s.trim()) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                .max_age(3600)
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .route("/", web::get().to(root))
            .route("/health", web::get().to(health_check))
            .route("/health/db", web::get().to(health_check_db))
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await;

    db.close().await;
    info!("Crawler API stopped");

    server?;
    Ok(())
}

/// Verify connectivity once at startup and apply the configured policy
async fn check_database(db: &Database, policy: StartupPolicy) -> anyhow::Result<()> {
    match db.check_connection().await {
        Ok(()) => {
            info!("Database connected ({})", db.backend_name());
            Ok(())
        }
        Err(e) if policy == StartupPolicy::Degraded => {
            warn!(
                "Database unreachable, serving in degraded mode until it recovers: {}",
                e
            );
            Ok(())
        }
        Err(e) => {
            error!("Database unreachable: {}", e);
            Err(e.into())
        }
    }
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Hello Crawler API" }))
}

// Health check endpoints
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": true }))
}

async fn health_check_db(
    state: web::Data<AppState>,
) -> Result<HttpResponse, crate::error::AppError> {
    state.db.ping().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": true })))
}

#[cfg(test)]
pub fn test_state(unchanged_update: config::UnchangedUpdate) -> web::Data<AppState> {
    web::Data::new(AppState {
        db: Database::new(Arc::new(store::MemoryStore::new())),
        config: Arc::new(Config {
            unchanged_update,
            ..Config::default()
        }),
        ids: Arc::new(utils::id::SequentialIds::new("id")),
    })
}
