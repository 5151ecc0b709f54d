//! Backend entry-point: loads settings, connects to MongoDB, and serves the
//! users API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig as _;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::MongoStore;
use users_api::settings::ServiceSettings;

const ENDPOINTS: [&str; 4] = [
    "GET /users",
    "POST /users",
    "PUT /users/{id}",
    "DELETE /users/{id}",
];

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load().map_err(|err| eyre!("invalid configuration: {err}"))?;

    let store = match MongoStore::connect(&settings.mongo_config()).await {
        Ok(store) => {
            info!(database = store.database_name(), "MongoDB connected successfully!");
            store
        }
        Err(err) => {
            error!(error = %err, "MongoDB connection error");
            return Err(err).wrap_err("failed to connect to MongoDB");
        }
    };

    let config = ServerConfig::new(settings.bind_addr(), store);
    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;

    info!(address = %bind_addr, "Server running on http://{bind_addr}");
    for endpoint in ENDPOINTS {
        info!(endpoint, "endpoint available");
    }

    server.await.wrap_err("HTTP server failed")
}
