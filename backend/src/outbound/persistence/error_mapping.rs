//! Mapping from MongoDB driver errors to user persistence errors.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

pub(super) fn map_mongo_error(error: MongoError) -> UserPersistenceError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => {
            UserPersistenceError::connection(error.to_string())
        }
        _ => UserPersistenceError::query(error.to_string()),
    }
}
