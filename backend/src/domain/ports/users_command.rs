//! Driving port for mutating users.
//!
//! Inputs are raw JSON field mappings; implementations own validation so the
//! HTTP adapter never needs to know the record schema.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{Error, User, UserId};

/// Use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate `fields` and store a new user.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::InvalidRequest`] when validation fails,
    /// [`crate::domain::ErrorCode::InternalError`] when storage fails.
    async fn create_user(&self, fields: Map<String, Value>) -> Result<User, Error>;

    /// Validate the supplied subset of `fields` and apply it to user `id`.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when no user has this id,
    /// [`crate::domain::ErrorCode::InvalidRequest`] when the id is malformed
    /// or the patch is invalid.
    async fn update_user(&self, id: UserId, fields: Map<String, Value>) -> Result<User, Error>;

    /// Remove user `id`, returning the record as it was.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when no user has this id,
    /// [`crate::domain::ErrorCode::InvalidRequest`] when the id is malformed.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;
}
