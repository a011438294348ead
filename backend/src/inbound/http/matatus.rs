//! Matatus API handlers.
//!
//! ```text
//! POST /api/matatus {"registrationNumber":"KDA 123A","operatorId":"op-77"}
//! GET /api/matatus?skip=0&limit=100
//! GET /api/matatus/5
//! GET /api/matatus/registration/KDA%20123A
//! GET /api/matatus/operator/op-77
//! DELETE /api/matatus/5
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::domain::ports::MatatuPersistenceError;
use crate::domain::{Error, Matatu, MatatuValidationError, NewMatatu};
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Detail returned whenever registration does not produce a vehicle. The
/// cause lands in the server log, not in the response.
const REGISTRATION_FAILED_DETAIL: &str =
    "Matatu already exists or registration failed. Check backend logs for details.";

/// Registration request body for `POST /api/matatus`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatatuCreate {
    pub registration_number: String,
    pub operator_id: String,
    #[serde(default)]
    pub fleet_id: Option<i32>,
    #[serde(default)]
    pub pochi_number: Option<String>,
    #[serde(default)]
    pub paybill_number: Option<String>,
    #[serde(default)]
    pub till_number: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub send_money_phone: Option<String>,
    #[serde(default)]
    pub mpesa_option: Option<String>,
    #[serde(default)]
    pub route_start: Option<String>,
    #[serde(default)]
    pub route_end: Option<String>,
    #[serde(default)]
    pub vehicle_tag: Option<String>,
}

/// Outbound matatu record.
///
/// `matatuId` and `fleetId` are decimal strings. `stops` and `fleetname`
/// describe data sourced outside this service; until that collaborator
/// exists they are always an empty list and null.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatatuOut {
    pub matatu_id: String,
    pub registration_number: String,
    pub operator_id: String,
    pub fleet_id: Option<String>,
    pub pochi_number: Option<String>,
    pub paybill_number: Option<String>,
    pub till_number: Option<String>,
    pub account_number: Option<String>,
    pub send_money_phone: Option<String>,
    pub mpesa_option: Option<String>,
    pub route_start: Option<String>,
    pub route_end: Option<String>,
    pub vehicle_tag: Option<String>,
    pub stops: Vec<String>,
    pub fleetname: Option<String>,
}

impl From<Matatu> for MatatuOut {
    fn from(matatu: Matatu) -> Self {
        Self {
            matatu_id: matatu.id.to_string(),
            registration_number: matatu.registration_number,
            operator_id: matatu.operator_id,
            fleet_id: matatu.fleet_id.map(|id| id.to_string()),
            pochi_number: matatu.pochi_number,
            paybill_number: matatu.paybill_number,
            till_number: matatu.till_number,
            account_number: matatu.account_number,
            send_money_phone: matatu.send_money_phone,
            mpesa_option: matatu.mpesa_option,
            route_start: matatu.route_start,
            route_end: matatu.route_end,
            vehicle_tag: matatu.vehicle_tag,
            stops: Vec::new(),
            fleetname: None,
        }
    }
}

impl TryFrom<MatatuCreate> for NewMatatu {
    type Error = MatatuValidationError;

    fn try_from(value: MatatuCreate) -> Result<Self, Self::Error> {
        let mut draft = Self::new(&value.registration_number, &value.operator_id)?;
        draft.fleet_id = value.fleet_id;
        draft.pochi_number = value.pochi_number;
        draft.paybill_number = value.paybill_number;
        draft.till_number = value.till_number;
        draft.account_number = value.account_number;
        draft.send_money_phone = value.send_money_phone;
        draft.mpesa_option = value.mpesa_option;
        draft.route_start = value.route_start;
        draft.route_end = value.route_end;
        draft.vehicle_tag = value.vehicle_tag;
        Ok(draft)
    }
}

fn map_matatu_validation_error(err: MatatuValidationError) -> Error {
    let (field, code) = match err {
        MatatuValidationError::EmptyRegistrationNumber => {
            ("registrationNumber", "empty_registration_number")
        }
        MatatuValidationError::EmptyOperatorId => ("operatorId", "empty_operator_id"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_matatu_persistence_error(error: MatatuPersistenceError) -> Error {
    match error {
        MatatuPersistenceError::Connection { message } => Error::service_unavailable(message),
        MatatuPersistenceError::Query { message } => Error::internal(message),
        MatatuPersistenceError::NotFound { .. } => Error::not_found("Matatu not found"),
        MatatuPersistenceError::DuplicateRegistration { .. } => {
            Error::conflict(REGISTRATION_FAILED_DETAIL)
        }
    }
}

/// Map registration failures to the opaque caller-facing outcome, logging
/// the underlying cause for operators.
fn map_registration_error(registration_number: &str, error: MatatuPersistenceError) -> Error {
    match error {
        MatatuPersistenceError::Connection { message } => Error::service_unavailable(message),
        MatatuPersistenceError::DuplicateRegistration { .. } => {
            Error::conflict(REGISTRATION_FAILED_DETAIL)
        }
        MatatuPersistenceError::Query { message } => {
            error!(
                registration_number,
                cause = %message,
                "matatu registration failed"
            );
            Error::conflict(REGISTRATION_FAILED_DETAIL)
        }
        MatatuPersistenceError::NotFound { matatu_id } => {
            error!(
                registration_number,
                matatu_id, "unexpected missing-row outcome during registration"
            );
            Error::conflict(REGISTRATION_FAILED_DETAIL)
        }
    }
}

/// Register a vehicle. Duplicate registration numbers are rejected without
/// touching storage.
#[utoipa::path(
    post,
    path = "/api/matatus",
    request_body = MatatuCreate,
    responses(
        (status = 200, description = "Registered matatu", body = MatatuOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 409, description = "Already exists or registration failed", body = crate::domain::DomainError)
    ),
    tags = ["matatus"],
    operation_id = "createMatatu"
)]
#[post("/matatus")]
pub async fn create_matatu(
    state: web::Data<HttpState>,
    payload: web::Json<MatatuCreate>,
) -> ApiResult<web::Json<MatatuOut>> {
    let draft = NewMatatu::try_from(payload.into_inner()).map_err(map_matatu_validation_error)?;
    let registration_number = draft.registration_number.clone();
    let matatu = state
        .matatus
        .register(&draft)
        .await
        .map_err(|err| map_registration_error(&registration_number, err))?;
    Ok(web::Json(MatatuOut::from(matatu)))
}

/// List matatus in creation order.
#[utoipa::path(
    get,
    path = "/api/matatus",
    params(PageQuery),
    responses(
        (status = 200, description = "Matatus", body = [MatatuOut])
    ),
    tags = ["matatus"],
    operation_id = "listMatatus"
)]
#[get("/matatus")]
pub async fn list_matatus(
    state: web::Data<HttpState>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<MatatuOut>>> {
    let matatus = state
        .matatus
        .list(page.into_inner().into())
        .await
        .map_err(map_matatu_persistence_error)?;
    Ok(web::Json(matatus.into_iter().map(MatatuOut::from).collect()))
}

/// Fetch one matatu by id.
#[utoipa::path(
    get,
    path = "/api/matatus/{matatu_id}",
    params(("matatu_id" = i32, Path, description = "Matatu identifier")),
    responses(
        (status = 200, description = "Matatu", body = MatatuOut),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["matatus"],
    operation_id = "getMatatu"
)]
#[get("/matatus/{matatu_id}")]
pub async fn get_matatu(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MatatuOut>> {
    let matatu_id = path.into_inner();
    let matatu = state
        .matatus
        .find_by_id(matatu_id)
        .await
        .map_err(map_matatu_persistence_error)?
        .ok_or_else(|| Error::not_found("Matatu not found"))?;
    Ok(web::Json(MatatuOut::from(matatu)))
}

/// Fetch one matatu by its registration number.
#[utoipa::path(
    get,
    path = "/api/matatus/registration/{registration_number}",
    params(("registration_number" = String, Path, description = "Vehicle registration number")),
    responses(
        (status = 200, description = "Matatu", body = MatatuOut),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["matatus"],
    operation_id = "getMatatuByRegistration"
)]
#[get("/matatus/registration/{registration_number}")]
pub async fn get_matatu_by_registration(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MatatuOut>> {
    let registration_number = path.into_inner();
    let matatu = state
        .matatus
        .find_by_registration(&registration_number)
        .await
        .map_err(map_matatu_persistence_error)?
        .ok_or_else(|| Error::not_found("Matatu not found"))?;
    Ok(web::Json(MatatuOut::from(matatu)))
}

/// List every matatu owned by one operator.
#[utoipa::path(
    get,
    path = "/api/matatus/operator/{operator_id}",
    params(("operator_id" = String, Path, description = "Operator identifier")),
    responses(
        (status = 200, description = "Matatus", body = [MatatuOut])
    ),
    tags = ["matatus"],
    operation_id = "listMatatusForOperator"
)]
#[get("/matatus/operator/{operator_id}")]
pub async fn list_matatus_for_operator(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MatatuOut>>> {
    let operator_id = path.into_inner();
    let matatus = state
        .matatus
        .list_by_operator(&operator_id)
        .await
        .map_err(map_matatu_persistence_error)?;
    Ok(web::Json(matatus.into_iter().map(MatatuOut::from).collect()))
}

/// Delete a matatu. Fares and payments referencing it keep their rows.
#[utoipa::path(
    delete,
    path = "/api/matatus/{matatu_id}",
    params(("matatu_id" = i32, Path, description = "Matatu identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["matatus"],
    operation_id = "deleteMatatu"
)]
#[delete("/matatus/{matatu_id}")]
pub async fn delete_matatu(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let matatu_id = path.into_inner();
    state
        .matatus
        .delete(matatu_id)
        .await
        .map_err(map_matatu_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_app, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{json, Value};

    fn registration_body(registration: &str) -> Value {
        json!({ "registrationNumber": registration, "operatorId": "op-77" })
    }

    #[actix_web::test]
    async fn registered_matatu_always_carries_stops_and_fleetname() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(json!({
                    "registrationNumber": "KDA 123A",
                    "operatorId": "op-77",
                    "paybillNumber": "400200",
                    "accountNumber": "77",
                }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("stops"), Some(&json!([])));
        assert_eq!(body.get("fleetname"), Some(&json!(null)));
        assert_eq!(
            body.get("paybillNumber").and_then(Value::as_str),
            Some("400200")
        );
        assert_eq!(body.get("fleetId"), Some(&json!(null)));
        assert!(body.get("matatuId").and_then(Value::as_str).is_some());
    }

    #[actix_web::test]
    async fn duplicate_registration_is_opaque_and_leaves_store_unchanged() {
        let (state, registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(registration_body("KDA 123A"))
                .to_request(),
        )
        .await;
        assert!(first.status().is_success());
        assert_eq!(registry.matatu_count(), 1);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(registration_body("KDA 123A"))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some(REGISTRATION_FAILED_DETAIL)
        );
        assert_eq!(registry.matatu_count(), 1);
    }

    #[actix_web::test]
    async fn pagination_windows_follow_creation_order() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        for index in 0..5 {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/matatus")
                    .set_json(registration_body(&format!("KDA {index:03}A")))
                    .to_request(),
            )
            .await;
            assert!(response.status().is_success());
        }

        let first_page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/matatus?skip=0&limit=2")
                .to_request(),
        )
        .await;
        let first: Value = actix_test::read_body_json(first_page).await;
        let first = first.as_array().expect("array body");
        assert_eq!(first.len(), 2);

        let second_page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/matatus?skip=2&limit=2")
                .to_request(),
        )
        .await;
        let second: Value = actix_test::read_body_json(second_page).await;
        let second = second.as_array().expect("array body");
        assert_eq!(second.len(), 2);

        let registrations: Vec<_> = first
            .iter()
            .chain(second.iter())
            .map(|m| {
                m.get("registrationNumber")
                    .and_then(Value::as_str)
                    .expect("registration present")
                    .to_owned()
            })
            .collect();
        assert_eq!(
            registrations,
            vec!["KDA 000A", "KDA 001A", "KDA 002A", "KDA 003A"]
        );
    }

    #[actix_web::test]
    async fn lookup_by_registration_resolves() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(registration_body("KDA 123A"))
                .to_request(),
        )
        .await;
        assert!(created.status().is_success());

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/matatus/registration/KDA%20123A")
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("registrationNumber").and_then(Value::as_str),
            Some("KDA 123A")
        );
    }

    #[actix_web::test]
    async fn delete_returns_204_then_404() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(registration_body("KDA 123A"))
                .to_request(),
        )
        .await;
        let created: Value = actix_test::read_body_json(created).await;
        let id = created
            .get("matatuId")
            .and_then(Value::as_str)
            .expect("id present")
            .to_owned();

        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/matatus/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/matatus/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn missing_registration_number_is_a_validation_error() {
        let (state, _registry) = test_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/matatus")
                .set_json(json!({ "registrationNumber": "  ", "operatorId": "op-77" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details").and_then(|d| d.get("field")),
            Some(&json!("registrationNumber"))
        );
    }
}
