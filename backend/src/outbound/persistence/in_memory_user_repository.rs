//! In-memory `UserRepository` for tests.
//!
//! Identifiers use the same 24-character hex format as MongoDB so handlers see
//! identical malformed-id and not-found behaviour without a running server.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

/// Insertion-ordered user store held in process memory.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use users_api::domain::UserDirectoryService;
/// use users_api::outbound::persistence::InMemoryUserRepository;
///
/// let service = UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()));
/// # let _ = service;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    failure: Option<UserPersistenceError>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails with `failure`.
    pub fn failing(failure: UserPersistenceError) -> Self {
        Self {
            users: Mutex::default(),
            failure: Some(failure),
        }
    }

    fn check(&self) -> Result<(), UserPersistenceError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

fn validate_id(id: &UserId) -> Result<(), UserPersistenceError> {
    ObjectId::parse_str(id.as_ref())
        .map(|_| ())
        .map_err(|_| UserPersistenceError::malformed_id(id.as_ref()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.check()?;
        Ok(self.users.lock().await.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        self.check()?;
        let stored = User::new(UserId::new(ObjectId::new().to_hex()), user.clone());
        self.users.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        validate_id(id)?;
        let mut users = self.users.lock().await;
        Ok(users.iter_mut().find(|user| user.id() == id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.check()?;
        validate_id(id)?;
        let mut users = self.users.lock().await;
        Ok(users
            .iter()
            .position(|user| user.id() == id)
            .map(|index| users.remove(index)))
    }
}
