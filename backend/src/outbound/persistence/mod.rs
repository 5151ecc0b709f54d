//! MongoDB persistence adapters.
//!
//! Repository implementations only translate between BSON documents and
//! domain types; validation has already happened by the time a record gets
//! here. Document structs (`documents.rs`) stay private to this module, and
//! every driver error is mapped to [`crate::domain::ports::UserPersistenceError`].
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{MongoConfig, MongoStore, MongoUserRepository};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MongoConfig::new("mongodb://localhost:27017").with_database("users");
//! let store = MongoStore::connect(&config).await?;
//! let repository = MongoUserRepository::new(&store);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod documents;
mod error_mapping;
#[cfg(any(test, feature = "test-support"))]
mod in_memory_user_repository;
mod mongo_user_repository;
mod store;

#[cfg(any(test, feature = "test-support"))]
pub use in_memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{
    DEFAULT_DATABASE, DEFAULT_SERVER_SELECTION_TIMEOUT, MongoConfig, MongoStore, StoreError,
};
