//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors live in the HTTP
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage or server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "User not found")]
    message: String,
    /// Correlation id, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Per-field validation failures for `invalid_request` errors.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Identifier assigned by the storage layer.
    #[schema(example = "65f0c2a1e4b0a1b2c3d4e5f6")]
    id: String,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = 30)]
    age: Option<f64>,
    #[schema(example = json!(["Pizza", "Pasta"]))]
    favorite_foods: Vec<String>,
}

/// Request body for `POST /users`.
///
/// `age` also accepts a numeric string and `favoriteFoods` a single string.
/// Unknown fields are ignored.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserSchema {
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = 30)]
    age: Option<f64>,
    #[schema(example = json!(["Pizza", "Pasta"]))]
    favorite_foods: Option<Vec<String>>,
}

/// Request body for `PUT /users/{id}`; every field is optional.
///
/// `age: null` clears the age; `favoriteFoods: null` empties the list.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateUserSchema {
    #[schema(example = "John Doe")]
    name: Option<String>,
    #[schema(example = 31)]
    age: Option<f64>,
    #[schema(example = json!(["Hamburger", "Sushi"]))]
    favorite_foods: Option<Vec<String>>,
}

/// Response body for `DELETE /users/{id}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeleteUserSchema {
    #[schema(example = "User deleted successfully")]
    message: String,
    deleted_user: UserSchema,
}
