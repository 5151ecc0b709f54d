//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{MockUsersQuery, UserPersistenceError};
use crate::domain::user_directory::{INVALID_USER_ID, SERVER_ERROR, USER_NOT_FOUND};
use crate::domain::{TRACE_ID_HEADER, UserDirectoryService};
use crate::inbound::http::json_config;
use crate::middleware::Trace;
use crate::outbound::persistence::InMemoryUserRepository;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

const MISSING_ID: &str = "65f0c2a1e4b0a1b2c3d4e5f6";

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
}

fn in_memory_state() -> HttpState {
    let repository = Arc::new(InMemoryUserRepository::new());
    HttpState::from_service(Arc::new(UserDirectoryService::new(repository)))
}

fn post_user(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/users")
        .set_json(body)
}

fn error_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

#[actix_web::test]
async fn create_returns_created_user_with_new_id() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        post_user(json!({
            "name": "John Doe",
            "age": 30,
            "favoriteFoods": ["Pizza", "Pasta"],
        }))
        .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["name"], json!("John Doe"));
    assert_eq!(body["age"], json!(30));
    assert_eq!(body["favoriteFoods"], json!(["Pizza", "Pasta"]));
    assert_eq!(body["id"].as_str().map(str::len), Some(24));
}

#[rstest]
#[case(json!({ "age": 3 }), "User validation failed: name: Path `name` is required.")]
#[case(
    json!({ "name": "Ada", "age": "abc" }),
    "User validation failed: age: Cast to Number failed for value \"abc\" (type string) at path \"age\""
)]
#[actix_web::test]
async fn create_rejects_invalid_users_without_storing(
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(&app, post_user(payload).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(message));
    assert_eq!(body["code"], json!("invalid_request"));

    let list = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    let users: Value = actix_test::read_body_json(list).await;
    assert_eq!(users, json!([]));
}

#[actix_web::test]
async fn create_rejects_non_object_bodies() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(&app, post_user(json!(["Ada"])).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[actix_web::test]
async fn list_returns_every_created_user_in_order() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    for name in ["Ada", "Grace", "Linus"] {
        let response =
            actix_test::call_service(&app, post_user(json!({ "name": name })).to_request()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = actix_test::read_body_json(response).await;
    let names: Vec<_> = users.iter().map(User::name).collect();
    assert_eq!(names, ["Ada", "Grace", "Linus"]);
}

#[actix_web::test]
async fn update_merges_supplied_fields() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let created: User = actix_test::call_and_read_body_json(
        &app,
        post_user(json!({ "name": "John Doe", "age": 30, "favoriteFoods": ["Pizza"] }))
            .to_request(),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/users/{}", created.id()))
            .set_json(json!({ "age": 31 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = actix_test::read_body_json(response).await;
    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.name(), "John Doe");
    assert_eq!(updated.age(), Some(31.0));
    assert_eq!(updated.favorite_foods(), ["Pizza"]);
}

#[actix_web::test]
async fn update_of_missing_user_is_not_found() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/users/{MISSING_ID}"))
            .set_json(json!({ "age": 31 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(USER_NOT_FOUND));
}

#[rstest]
#[case(actix_test::TestRequest::put().set_json(json!({ "age": 1 })))]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_ids_are_rejected(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response =
        actix_test::call_service(&app, request.uri("/users/not-an-id").to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(INVALID_USER_ID));
}

#[actix_web::test]
async fn delete_returns_removed_user_once() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let created: User = actix_test::call_and_read_body_json(
        &app,
        post_user(json!({ "name": "Ada" })).to_request(),
    )
    .await;
    let uri = format!("/users/{}", created.id());

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: DeleteUserResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.message, USER_DELETED);
    assert_eq!(body.deleted_user, created);

    let users: Vec<User> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert!(users.is_empty());

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn storage_failures_are_redacted() {
    let repository = Arc::new(InMemoryUserRepository::failing(
        UserPersistenceError::connection("connection refused"),
    ));
    let state = HttpState::from_service(Arc::new(UserDirectoryService::new(repository)));
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(&app, post_user(json!({ "name": "Ada" })).to_request())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(SERVER_ERROR));
    assert!(body.get("details").is_none());
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}

#[actix_web::test]
async fn list_failure_from_query_port_is_a_server_error() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .returning(|| Err(Error::internal("cursor exhausted")));
    let command = UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()));
    let state = HttpState::new(Arc::new(query), Arc::new(command));
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(SERVER_ERROR));
}

#[actix_web::test]
async fn update_without_body_returns_current_record() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let created: User = actix_test::call_and_read_body_json(
        &app,
        post_user(json!({ "name": "Ada", "age": 36 })).to_request(),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/users/{}", created.id()))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: User = actix_test::read_body_json(response).await;
    assert_eq!(body, created);
}

#[rstest]
#[case("{not json")]
#[case("[1, 2]")]
#[actix_web::test]
async fn update_rejects_bodies_that_are_not_objects(#[case] payload: &'static str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/users/{MISSING_ID}"))
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}
