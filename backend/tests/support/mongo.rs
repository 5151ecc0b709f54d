//! Helpers for integration tests that need a running MongoDB server.
//!
//! Tests read the connection string from `MONGO_TEST_URI` and are skipped
//! when it is unset, so the suite passes on machines without a server. Each
//! test gets its own uniquely named database, dropped on completion.

use users_api::outbound::persistence::{MongoConfig, MongoStore};
use uuid::Uuid;

/// Returns the test server connection string, or prints a skip marker.
pub fn mongo_test_uri() -> Option<String> {
    match std::env::var("MONGO_TEST_URI") {
        Ok(uri) if !uri.trim().is_empty() => Some(uri),
        _ => {
            eprintln!("SKIP-MONGO: MONGO_TEST_URI is not set");
            None
        }
    }
}

/// Connect to a fresh database on the test server.
///
/// Panics when `MONGO_TEST_URI` is set but the server cannot be reached, so
/// CI breakage is not masked.
pub async fn isolated_store(uri: &str) -> MongoStore {
    let database = format!("users_api_test_{}", Uuid::new_v4().simple());
    let config = MongoConfig::new(uri).with_database(database);
    MongoStore::connect(&config)
        .await
        .unwrap_or_else(|err| panic!("MONGO_TEST_URI is set but unusable: {err}"))
}
