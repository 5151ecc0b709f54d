//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered: command-line flags override environment variables,
//! which override defaults. Environment variables carry no prefix (`PORT`,
//! `MONGO_URI`, ...).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_SERVER_SELECTION_TIMEOUT, MongoConfig};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings for the users service process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
pub struct ServiceSettings {
    /// Listen port.
    pub port: Option<u16>,
    /// Bind address.
    pub host: Option<IpAddr>,
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database name; falls back to the one in the connection string.
    pub mongo_database: Option<String>,
    /// Driver server-selection timeout in seconds.
    pub mongo_server_selection_timeout_secs: Option<u64>,
}

impl ServiceSettings {
    /// Return the configured port, falling back to 5000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured bind address, falling back to all interfaces.
    pub fn host(&self) -> IpAddr {
        self.host.unwrap_or(DEFAULT_HOST)
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host(), self.port())
    }

    /// Connection settings for the storage client.
    pub fn mongo_config(&self) -> MongoConfig {
        let timeout = self
            .mongo_server_selection_timeout_secs
            .map_or(DEFAULT_SERVER_SELECTION_TIMEOUT, Duration::from_secs);
        let config =
            MongoConfig::new(self.mongo_uri.clone()).with_server_selection_timeout(timeout);
        match &self.mongo_database {
            Some(database) => config.with_database(database.clone()),
            None => config,
        }
    }
}
