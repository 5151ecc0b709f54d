//! MongoDB-backed `UserRepository` implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{USER_ENTITY, collection_name};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::documents::{UserDocument, by_id, update_modifiers};
use super::error_mapping::map_mongo_error;
use super::store::MongoStore;

/// Repository over the `users` collection.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Bind the repository to the store's user collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.collection(&collection_name(USER_ENTITY)),
        }
    }
}

fn parse_id(id: &UserId) -> Result<ObjectId, UserPersistenceError> {
    ObjectId::parse_str(id.as_ref()).map_err(|_| UserPersistenceError::malformed_id(id.as_ref()))
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;
        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let document = UserDocument::new(ObjectId::new(), user);
        self.collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;
        debug!(id = %document.id, "user inserted");
        Ok(document.into())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let object_id = parse_id(id)?;
        // An empty modifier document is rejected by the server.
        let document = if patch.is_empty() {
            self.collection.find_one(by_id(object_id)).await
        } else {
            self.collection
                .find_one_and_update(by_id(object_id), update_modifiers(patch))
                .return_document(ReturnDocument::After)
                .await
        }
        .map_err(map_mongo_error)?;
        Ok(document.map(User::from))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let object_id = parse_id(id)?;
        let document = self
            .collection
            .find_one_and_delete(by_id(object_id))
            .await
            .map_err(map_mongo_error)?;
        Ok(document.map(User::from))
    }
}
