//! Users API handlers.
//!
//! ```text
//! POST /api/users {"name":"Amina","email":"a@x.com","password":"pw"}
//! GET /api/users?skip=0&limit=100
//! GET /api/users/7
//! GET /api/users/email/a@x.com
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Error, NewUser, User, UserValidationError};
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body for `POST /api/users`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Defaults to `"user"` when absent.
    #[serde(default)]
    pub role: Option<String>,
}

/// Outbound user record. The stored password hash never appears here.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("Email already registered"),
    }
}

/// Register a user account.
///
/// The raw password is hashed before it reaches the repository; plaintext is
/// neither stored nor echoed back.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Created user", body = UserOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 409, description = "Email already registered", body = crate::domain::DomainError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserCreate>,
) -> ApiResult<web::Json<UserOut>> {
    let payload = payload.into_inner();
    if payload.password.is_empty() {
        return Err(map_user_validation_error(UserValidationError::EmptyPassword));
    }
    let draft = NewUser::try_from_parts(&payload.name, &payload.email, payload.phone, payload.role)
        .map_err(map_user_validation_error)?;

    let hashed = state
        .password_hasher
        .hash(&payload.password)
        .map_err(|err| Error::internal(err.to_string()))?;

    let user = state
        .users
        .create(&draft, &hashed)
        .await
        .map_err(map_user_persistence_error)?;
    Ok(web::Json(UserOut::from(user)))
}

/// List accounts in creation order.
#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = [UserOut])
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<UserOut>>> {
    let users = state
        .users
        .list(page.into_inner().into())
        .await
        .map_err(map_user_persistence_error)?;
    Ok(web::Json(users.into_iter().map(UserOut::from).collect()))
}

/// Fetch one account by id.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserOut),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserOut>> {
    let user_id = path.into_inner();
    let user = state
        .users
        .find_by_id(user_id)
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| Error::not_found("User not found"))?;
    Ok(web::Json(UserOut::from(user)))
}

/// Fetch one account by email. Internal-use lookup.
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User", body = UserOut),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/email/{email}")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserOut>> {
    let email = path.into_inner();
    let user = state
        .users
        .find_by_email(&email)
        .await
        .map_err(map_user_persistence_error)?
        .ok_or_else(|| Error::not_found("User not found"))?;
    Ok(web::Json(UserOut::from(user)))
}
