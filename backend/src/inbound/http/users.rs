//! Users API handlers.
//!
//! ```text
//! GET  /user/{id}
//! GET  /users
//! POST /user {"name":"..."}
//! ```
//!
//! Success bodies are compact JSON and byte-stable across identical reads;
//! the original clients of this API compare them byte for byte.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List-response wrapper: `{"users":[...]}`.
///
/// An empty store serialises as `{"users":[]}`, never as a missing field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersEnvelope {
    /// Users in store retrieval order (primary key ascending).
    pub users: Vec<User>,
}

/// Request body for `POST /user`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Name for the new user; must be non-empty.
    #[schema(example = "foo")]
    pub name: String,
}

/// JSON extractor configuration pinning malformed bodies to 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::Error::from(crate::inbound::http::error::ApiError::from(
            Error::invalid_request(format!("malformed JSON body: {err}")),
        ))
    })
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(
        ("id" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Id is not a valid integer"),
        (status = 404, description = "No user with this id")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id: i32 = raw
        .parse()
        .map_err(|_| Error::invalid_request(format!("user id must be an integer, got {raw:?}")))?;

    match state.users.fetch_user(id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = UsersEnvelope),
        (status = 500, description = "Persistence failure")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersEnvelope>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersEnvelope { users }))
}

/// Create a user; the store assigns the id.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Malformed body or empty name"),
        (status = 500, description = "Persistence failure")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let created = state.users.create_user(&payload.name).await?;
    Ok(HttpResponse::Created().json(created))
}
