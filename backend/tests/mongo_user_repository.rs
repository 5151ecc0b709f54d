//! Integration tests for `MongoUserRepository` against a live MongoDB server.
//!
//! Set `MONGO_TEST_URI` (for example `mongodb://localhost:27017`) to run them;
//! without it every test returns early.

use rstest::rstest;
use serde_json::{Map, Value, json};
use users_api::domain::ports::{UserPersistenceError, UserRepository};
use users_api::domain::{NewUser, UserId, UserPatch};
use users_api::outbound::persistence::{MongoStore, MongoUserRepository};

#[path = "support/mongo.rs"]
mod mongo;

use mongo::{isolated_store, mongo_test_uri};

const MISSING_ID: &str = "65f0c2a1e4b0a1b2c3d4e5f6";

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("test fields must be an object, got {other}"),
    }
}

fn new_user(value: Value) -> NewUser {
    NewUser::from_fields(&fields(value)).expect("valid user")
}

async fn setup() -> Option<(MongoStore, MongoUserRepository)> {
    let uri = mongo_test_uri()?;
    let store = isolated_store(&uri).await;
    let repository = MongoUserRepository::new(&store);
    Some((store, repository))
}

async fn teardown(store: MongoStore) {
    store.drop_database().await.expect("drop test database");
}

#[rstest]
#[tokio::test]
async fn insert_then_list_round_trips_records() {
    let Some((store, repository)) = setup().await else {
        return;
    };

    let first = repository
        .insert(&new_user(json!({ "name": "Ada", "age": 36, "favoriteFoods": ["Tea"] })))
        .await
        .expect("insert first");
    let second = repository
        .insert(&new_user(json!({ "name": "Grace" })))
        .await
        .expect("insert second");

    let users = repository.list_all().await.expect("list users");
    assert_eq!(users, vec![first, second]);

    teardown(store).await;
}

#[rstest]
#[tokio::test]
async fn update_sets_and_unsets_fields() {
    let Some((store, repository)) = setup().await else {
        return;
    };
    let stored = repository
        .insert(&new_user(json!({ "name": "John Doe", "age": 30, "favoriteFoods": ["Pizza"] })))
        .await
        .expect("insert");

    let bump = UserPatch::from_fields(&fields(json!({ "age": 31 }))).expect("patch");
    let updated = repository
        .update(stored.id(), &bump)
        .await
        .expect("update")
        .expect("user exists");
    assert_eq!(updated.name(), "John Doe");
    assert_eq!(updated.age(), Some(31.0));
    assert_eq!(updated.favorite_foods(), ["Pizza"]);

    let clear = UserPatch::from_fields(&fields(json!({ "age": null }))).expect("patch");
    let cleared = repository
        .update(stored.id(), &clear)
        .await
        .expect("update")
        .expect("user exists");
    assert_eq!(cleared.age(), None);

    let unchanged = repository
        .update(stored.id(), &UserPatch::default())
        .await
        .expect("empty update");
    assert_eq!(unchanged, Some(cleared));

    teardown(store).await;
}

#[rstest]
#[tokio::test]
async fn delete_returns_prior_record_once() {
    let Some((store, repository)) = setup().await else {
        return;
    };
    let stored = repository
        .insert(&new_user(json!({ "name": "Ada" })))
        .await
        .expect("insert");

    let removed = repository.delete(stored.id()).await.expect("delete");
    assert_eq!(removed, Some(stored.clone()));
    assert_eq!(repository.delete(stored.id()).await, Ok(None));
    assert!(repository.list_all().await.expect("list").is_empty());

    teardown(store).await;
}

#[rstest]
#[tokio::test]
async fn unknown_and_malformed_ids_are_distinguished() {
    let Some((store, repository)) = setup().await else {
        return;
    };

    let patch = UserPatch::from_fields(&fields(json!({ "age": 1 }))).expect("patch");
    assert_eq!(
        repository.update(&UserId::new(MISSING_ID), &patch).await,
        Ok(None)
    );
    assert_eq!(
        repository.delete(&UserId::new("not-an-id")).await,
        Err(UserPersistenceError::malformed_id("not-an-id"))
    );

    teardown(store).await;
}
