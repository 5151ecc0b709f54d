//! BSON document shapes stored in MongoDB.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::{NewUser, User, UserId, UserPatch};

/// A document in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default)]
    pub favorite_foods: Vec<String>,
}

impl UserDocument {
    pub fn new(id: ObjectId, user: &NewUser) -> Self {
        Self {
            id,
            name: user.name().to_owned(),
            age: user.age(),
            favorite_foods: user.favorite_foods().to_vec(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User::from_stored(
            UserId::new(document.id.to_hex()),
            document.name,
            document.age,
            document.favorite_foods,
        )
    }
}

/// Build the `$set`/`$unset` modifiers for a non-empty patch.
pub(crate) fn update_modifiers(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    if let Some(name) = patch.name() {
        set.insert("name", name);
    }
    match patch.age() {
        Some(Some(age)) => {
            set.insert("age", age);
        }
        Some(None) => {
            unset.insert("age", "");
        }
        None => {}
    }
    if let Some(foods) = patch.favorite_foods() {
        let foods: Vec<Bson> = foods.iter().cloned().map(Bson::String).collect();
        set.insert("favoriteFoods", foods);
    }

    let mut modifiers = Document::new();
    if !set.is_empty() {
        modifiers.insert("$set", set);
    }
    if !unset.is_empty() {
        modifiers.insert("$unset", unset);
    }
    modifiers
}

/// Filter matching a single document by identifier.
pub(crate) fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}
