//! Driving port for reading users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every stored user. Order is not guaranteed.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
