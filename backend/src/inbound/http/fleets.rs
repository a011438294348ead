//! Fleets API handlers.
//!
//! ```text
//! POST /api/fleets {"name":"Super Metro","operatorId":"op-77"}
//! GET /api/fleets?skip=0&limit=100
//! GET /api/fleets/3
//! GET /api/fleets/operator/op-77
//! DELETE /api/fleets/3
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::FleetPersistenceError;
use crate::domain::{Error, Fleet, FleetValidationError, NewFleet};
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation request body for `POST /api/fleets`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetCreate {
    pub name: String,
    pub operator_id: String,
}

/// Outbound fleet record; identifiers are rendered as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FleetOut {
    pub fleet_id: String,
    pub name: String,
    pub operator_id: String,
}

impl From<Fleet> for FleetOut {
    fn from(fleet: Fleet) -> Self {
        Self {
            fleet_id: fleet.id.to_string(),
            name: fleet.name,
            operator_id: fleet.operator_id,
        }
    }
}

impl TryFrom<FleetCreate> for NewFleet {
    type Error = FleetValidationError;

    fn try_from(value: FleetCreate) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.operator_id)
    }
}

fn map_fleet_validation_error(err: FleetValidationError) -> Error {
    let (field, code) = match err {
        FleetValidationError::EmptyName => ("name", "empty_name"),
        FleetValidationError::EmptyOperatorId => ("operatorId", "empty_operator_id"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_fleet_persistence_error(error: FleetPersistenceError) -> Error {
    match error {
        FleetPersistenceError::Connection { message } => Error::service_unavailable(message),
        FleetPersistenceError::Query { message } => Error::internal(message),
        FleetPersistenceError::NotFound { .. } => Error::not_found("Fleet not found"),
        FleetPersistenceError::MatatusAssigned { .. } => {
            Error::conflict("Cannot delete fleet with matatus assigned")
        }
    }
}

/// Register a fleet.
#[utoipa::path(
    post,
    path = "/api/fleets",
    request_body = FleetCreate,
    responses(
        (status = 200, description = "Created fleet", body = FleetOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError)
    ),
    tags = ["fleets"],
    operation_id = "createFleet"
)]
#[post("/fleets")]
pub async fn create_fleet(
    state: web::Data<HttpState>,
    payload: web::Json<FleetCreate>,
) -> ApiResult<web::Json<FleetOut>> {
    let draft = NewFleet::try_from(payload.into_inner()).map_err(map_fleet_validation_error)?;
    let fleet = state
        .fleets
        .create(&draft)
        .await
        .map_err(map_fleet_persistence_error)?;
    Ok(web::Json(FleetOut::from(fleet)))
}

/// List fleets in creation order.
#[utoipa::path(
    get,
    path = "/api/fleets",
    params(PageQuery),
    responses(
        (status = 200, description = "Fleets", body = [FleetOut])
    ),
    tags = ["fleets"],
    operation_id = "listFleets"
)]
#[get("/fleets")]
pub async fn list_fleets(
    state: web::Data<HttpState>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<FleetOut>>> {
    let fleets = state
        .fleets
        .list(page.into_inner().into())
        .await
        .map_err(map_fleet_persistence_error)?;
    Ok(web::Json(fleets.into_iter().map(FleetOut::from).collect()))
}

/// Fetch one fleet by id.
#[utoipa::path(
    get,
    path = "/api/fleets/{fleet_id}",
    params(("fleet_id" = i32, Path, description = "Fleet identifier")),
    responses(
        (status = 200, description = "Fleet", body = FleetOut),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["fleets"],
    operation_id = "getFleet"
)]
#[get("/fleets/{fleet_id}")]
pub async fn get_fleet(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FleetOut>> {
    let fleet_id = path.into_inner();
    let fleet = state
        .fleets
        .find_by_id(fleet_id)
        .await
        .map_err(map_fleet_persistence_error)?
        .ok_or_else(|| Error::not_found("Fleet not found"))?;
    Ok(web::Json(FleetOut::from(fleet)))
}

/// List every fleet owned by one operator.
#[utoipa::path(
    get,
    path = "/api/fleets/operator/{operator_id}",
    params(("operator_id" = String, Path, description = "Operator identifier")),
    responses(
        (status = 200, description = "Fleets", body = [FleetOut])
    ),
    tags = ["fleets"],
    operation_id = "listFleetsForOperator"
)]
#[get("/fleets/operator/{operator_id}")]
pub async fn list_fleets_for_operator(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<FleetOut>>> {
    let operator_id = path.into_inner();
    let fleets = state
        .fleets
        .list_by_operator(&operator_id)
        .await
        .map_err(map_fleet_persistence_error)?;
    Ok(web::Json(fleets.into_iter().map(FleetOut::from).collect()))
}

/// Delete a fleet unless matatus are still assigned to it.
#[utoipa::path(
    delete,
    path = "/api/fleets/{fleet_id}",
    params(("fleet_id" = i32, Path, description = "Fleet identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::domain::DomainError),
        (status = 409, description = "Matatus still assigned", body = crate::domain::DomainError)
    ),
    tags = ["fleets"],
    operation_id = "deleteFleet"
)]
#[delete("/fleets/{fleet_id}")]
pub async fn delete_fleet(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let fleet_id = path.into_inner();
    state
        .fleets
        .delete(fleet_id)
        .await
        .map_err(map_fleet_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}
