//! OpenAPI documentation configuration.
//!
//! Aggregates the handler annotations into a single [`ApiDoc`] served by
//! Swagger UI in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "Minimal CRUD interface for the user resource."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::User,
        crate::domain::ErrorCode,
        crate::inbound::http::users::UsersEnvelope,
        crate::inbound::http::users::CreateUserRequest,
    )),
    tags(
        (name = "users", description = "User resource"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
