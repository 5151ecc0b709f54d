//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints, the health probes, and the schema
//! wrappers from [`crate::inbound::http::schemas`], which describe domain
//! types without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    CreateUserSchema, DeleteUserSchema, ErrorCodeSchema, ErrorSchema, UpdateUserSchema,
    UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "Create, list, update and delete user records stored in MongoDB."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        CreateUserSchema,
        UpdateUserSchema,
        DeleteUserSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
