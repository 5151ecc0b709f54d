//! User directory service implementing the driving ports.
//!
//! Validates request fields against the record schema, delegates storage to a
//! [`UserRepository`], and turns repository outcomes into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId, UserPatch, UserValidationError};

/// Message returned when no user matches an identifier.
pub const USER_NOT_FOUND: &str = "User not found";
/// Message returned when an identifier does not fit the storage format.
pub const INVALID_USER_ID: &str = "Invalid User ID format";
/// Message returned for any other storage failure.
pub const SERVER_ERROR: &str = "Server error";

/// User service backed by a repository.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    repository: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_validation_error(error: &UserValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(error.details())
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::MalformedId { id } => Error::invalid_request(INVALID_USER_ID)
            .with_details(json!({ "field": "id", "value": id, "code": "malformed_id" })),
        UserPersistenceError::Connection { .. } | UserPersistenceError::Query { .. } => {
            // The cause stays in the details for logging; the HTTP adapter
            // redacts internal errors before they reach clients.
            Error::internal(SERVER_ERROR).with_details(json!({ "cause": error.to_string() }))
        }
    }
}

fn found(user: Option<User>) -> Result<User, Error> {
    user.ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, fields: Map<String, Value>) -> Result<User, Error> {
        let candidate = NewUser::from_fields(&fields).map_err(|err| map_validation_error(&err))?;
        self.repository
            .insert(&candidate)
            .await
            .map_err(map_persistence_error)
    }

    async fn update_user(&self, id: UserId, fields: Map<String, Value>) -> Result<User, Error> {
        let patch = UserPatch::from_fields(&fields).map_err(|err| map_validation_error(&err))?;
        let updated = self
            .repository
            .update(&id, &patch)
            .await
            .map_err(map_persistence_error)?;
        found(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        let deleted = self
            .repository
            .delete(&id)
            .await
            .map_err(map_persistence_error)?;
        found(deleted)
    }
}
