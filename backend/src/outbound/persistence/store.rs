//! MongoDB client handle and connection settings.
//!
//! The driver keeps its own connection pool inside [`mongodb::Client`]; this
//! module only builds the client from a connection string and checks that a
//! server answers before the application starts serving.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Database used when neither the settings nor the connection string name one.
pub const DEFAULT_DATABASE: &str = "test";

/// How long the driver waits for a usable server unless configured.
pub const DEFAULT_SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(30);

const APP_NAME: &str = "users-api";

/// Errors raised while establishing the storage connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid MongoDB connection string: {message}")]
    Options { message: String },

    /// No server answered the initial ping.
    #[error("MongoDB is unreachable: {message}")]
    Unreachable { message: String },
}

impl StoreError {
    /// Create an options error with the given message.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// Create an unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017")
///     .with_database("users")
///     .with_server_selection_timeout(Duration::from_secs(2));
/// assert_eq!(config.uri(), "mongodb://localhost:27017");
/// ```
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: Option<String>,
    server_selection_timeout: Duration,
}

impl MongoConfig {
    /// Create a configuration for the given connection string.
    ///
    /// The server selection timeout defaults to 30 seconds.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: None,
            server_selection_timeout: DEFAULT_SERVER_SELECTION_TIMEOUT,
        }
    }

    /// Name the database explicitly, overriding the connection string.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Bound how long the driver waits for a usable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn server_selection_timeout(&self) -> Duration {
        self.server_selection_timeout
    }
}

/// Handle on the application database.
///
/// Cloning is cheap; all clones share the driver's connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client and ping the target database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Options`] when the connection string is invalid
    /// and [`StoreError::Unreachable`] when no server answers within the
    /// configured selection timeout.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| StoreError::options(err.to_string()))?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.app_name.get_or_insert_with(|| APP_NAME.to_owned());

        let database_name = config
            .database()
            .map(str::to_owned)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

        let client =
            Client::with_options(options).map_err(|err| StoreError::options(err.to_string()))?;
        let database = client.database(&database_name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::unreachable(err.to_string()))?;
        debug!(database = %database_name, "mongodb ping succeeded");

        Ok(Self { database })
    }

    /// Name of the database this store points at.
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Drop the whole database. Used to clean up after integration tests.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn drop_database(&self) -> mongodb::error::Result<()> {
        self.database.drop().await
    }

    pub(crate) fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.database.collection(name)
    }
}
