//! Users API handlers.
//!
//! ```text
//! GET    /users
//! POST   /users       {"name":"John Doe","age":30,"favoriteFoods":["Pizza"]}
//! PUT    /users/{id}  {"age":31}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CreateUserSchema, DeleteUserSchema, ErrorSchema, UpdateUserSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;

/// Confirmation message returned by `DELETE /users/{id}`.
pub const USER_DELETED: &str = "User deleted successfully";

/// Response body for `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserResponse {
    pub message: String,
    pub deleted_user: User,
}

/// Write one diagnostic line for a failed request.
fn log_failure(operation: &'static str, err: &Error) {
    match err.code() {
        ErrorCode::InternalError => error!(
            operation,
            message = err.message(),
            details = ?err.details(),
            trace_id = err.trace_id(),
            "user request failed"
        ),
        _ => warn!(
            operation,
            message = err.message(),
            trace_id = err.trace_id(),
            "user request rejected"
        ),
    }
}

/// Return every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserSchema]),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state
        .users
        .list_users()
        .await
        .inspect_err(|err| log_failure("list users", err))?;
    Ok(web::Json(users))
}

/// Validate and store a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner())
        .await
        .inspect_err(|err| log_failure("create user", err))?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace the supplied fields of an existing user.
///
/// A missing body is treated as an empty patch and returns the current record.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Malformed id or invalid fields", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let fields = patch_fields(&body).inspect_err(|err| log_failure("update user", err))?;
    let user = state
        .users_command
        .update_user(id, fields)
        .await
        .inspect_err(|err| log_failure("update user", err))?;
    Ok(web::Json(user))
}

/// Parse a PUT body. An empty body is an empty patch, which leaves the
/// record unchanged.
fn patch_fields(body: &[u8]) -> Result<Map<String, Value>, Error> {
    if body.trim_ascii().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("Json deserialize error: {err}")))
}

/// Remove a user, returning the record as it was.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = UserId::new(path.into_inner());
    let deleted_user = state
        .users_command
        .delete_user(id)
        .await
        .inspect_err(|err| log_failure("delete user", err))?;
    Ok(web::Json(DeleteUserResponse {
        message: USER_DELETED.to_owned(),
        deleted_user,
    }))
}

#[cfg(test)]
mod tests;
