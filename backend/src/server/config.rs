//! HTTP server configuration object.

use std::net::SocketAddr;

use users_api::outbound::persistence::MongoStore;

/// Everything the server needs beyond its routes.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: MongoStore,
}

impl ServerConfig {
    /// Construct a server configuration for a connected store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: MongoStore) -> Self {
        Self { bind_addr, store }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
