//! Driven port for user persistence.
//!
//! Adapters translate driver failures into [`UserPersistenceError`] so that
//! nothing above this boundary inspects driver-specific error types.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

/// Storage failure categories raised by user repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The identifier does not match the storage identifier format.
    #[error("malformed user id: {id}")]
    MalformedId { id: String },
    /// The database could not be reached.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedId { id: id.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for storing and retrieving users.
///
/// `update` and `delete` return `Ok(None)` when the identifier is well formed
/// but matches no record; a badly formed identifier is
/// [`UserPersistenceError::MalformedId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in storage order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Store a validated user and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Apply `patch` and return the record as it is after the update.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user and return the record as it was before removal.
    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
