use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::catalog::{ConcertCatalog, MongoConcertRepository};

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::load_default().unwrap_or_default();

    // One store handle for the process lifetime; every request reuses it.
    let db = if cfg.database.url.trim().is_empty() {
        models::db::connect(&cfg.database.database).await?
    } else {
        cfg.database.validate()?;
        models::db::connect_with_config(&cfg.database).await?
    };
    info!(database = %cfg.database.database, collection = %cfg.database.collection, "connected to document store");

    let repo = Arc::new(MongoConcertRepository::new(&db, &cfg.database.collection));
    let state = ServerState { catalog: Arc::new(ConcertCatalog::new(repo)) };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting concert catalog service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
