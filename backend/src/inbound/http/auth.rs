//! Token endpoint: exchange account credentials for a bearer credential.
//!
//! ```text
//! POST /api/auth/token  (urlencoded: username=a@x.com&password=pw)
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Credentials, CredentialsValidationError, Error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Detail returned for any credential mismatch. Unknown email and wrong
/// password share it on purpose.
const BAD_CREDENTIALS_DETAIL: &str = "Incorrect email or password";

/// Login form for `POST /api/auth/token`. The username field carries the
/// account email.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Issued bearer credential. Field names follow the OAuth2 password-flow
/// convention, so this payload stays snake_case on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TryFrom<TokenForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: TokenForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::EmptyEmail => ("username", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Authenticate and issue a time-bounded bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Bearer credential", body = TokenResponse),
        (status = 400, description = "Bad credentials", body = crate::domain::DomainError)
    ),
    tags = ["auth"],
    operation_id = "token",
    security([])
)]
#[post("/auth/token")]
pub async fn token(
    state: web::Data<HttpState>,
    form: web::Form<TokenForm>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        Credentials::try_from(form.into_inner()).map_err(map_credentials_validation_error)?;

    let user = state
        .authenticator
        .authenticate(&credentials)
        .await?
        .ok_or_else(|| Error::invalid_request(BAD_CREDENTIALS_DETAIL))?;

    let access_token = state
        .tokens
        .issue(user.id)
        .map_err(|err| Error::internal(err.to_string()))?;

    Ok(web::Json(TokenResponse {
        access_token,
        token_type: "bearer".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{json, Value};

    async fn register_account(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
        password: &str,
    ) {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({ "name": "Rider", "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }

    async fn request_token(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
        password: &str,
    ) -> actix_web::dev::ServiceResponse {
        actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/auth/token")
                .set_form(TokenForm {
                    username: username.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await
    }

    #[actix_web::test]
    async fn correct_credentials_yield_a_bearer_token() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;
        register_account(&app, "a@x.com", "pw").await;

        let response = request_token(&app, "a@x.com", "pw").await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("token_type").and_then(Value::as_str),
            Some("bearer")
        );
        assert!(body
            .get("access_token")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.is_empty()));
    }

    #[actix_web::test]
    async fn wrong_password_and_unknown_email_are_observably_identical() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;
        register_account(&app, "a@x.com", "pw").await;

        let wrong_password = request_token(&app, "a@x.com", "wrong").await;
        assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
        let wrong_body: Value = actix_test::read_body_json(wrong_password).await;

        let unknown_email = request_token(&app, "b@x.com", "pw").await;
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
        let unknown_body: Value = actix_test::read_body_json(unknown_email).await;

        assert_eq!(wrong_body, unknown_body);
        assert_eq!(
            wrong_body.get("message").and_then(Value::as_str),
            Some(BAD_CREDENTIALS_DETAIL)
        );
    }

    #[actix_web::test]
    async fn empty_username_is_a_validation_error() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = request_token(&app, "  ", "pw").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details").and_then(|d| d.get("field")),
            Some(&json!("username"))
        );
    }
}
