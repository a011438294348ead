//! Fares API handlers.
//!
//! ```text
//! POST /api/fares {"matatuId":5,"peakFare":100.0,...}
//! GET /api/fares?skip=0&limit=100
//! GET /api/fares/matatu/5
//! PUT /api/fares/9
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::FarePersistenceError;
use crate::domain::{Error, Fare, FareValidationError, NewFare};
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation and full-replacement body for fares.
///
/// Send `disabilityDiscount` as a decimal fraction (0.02 for 2%).
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FareUpsert {
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    /// Defaults to 0.0 when absent.
    #[serde(default)]
    pub disability_discount: Option<f64>,
}

/// Outbound fare record; identifiers stay numeric on this resource.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FareOut {
    pub fare_id: i32,
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    pub disability_discount: f64,
}

impl From<Fare> for FareOut {
    fn from(fare: Fare) -> Self {
        Self {
            fare_id: fare.id,
            matatu_id: fare.matatu_id,
            peak_fare: fare.peak_fare,
            non_peak_fare: fare.non_peak_fare,
            rainy_peak_fare: fare.rainy_peak_fare,
            rainy_non_peak_fare: fare.rainy_non_peak_fare,
            disability_discount: fare.disability_discount,
        }
    }
}

impl TryFrom<FareUpsert> for NewFare {
    type Error = FareValidationError;

    fn try_from(value: FareUpsert) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.matatu_id,
            value.peak_fare,
            value.non_peak_fare,
            value.rainy_peak_fare,
            value.rainy_non_peak_fare,
            value.disability_discount,
        )
    }
}

fn map_fare_validation_error(err: FareValidationError) -> Error {
    let message = err.to_string();
    let FareValidationError::NegativeRate { field } = err;
    Error::invalid_request(message).with_details(json!({ "field": field, "code": "negative_rate" }))
}

fn map_fare_persistence_error(error: FarePersistenceError) -> Error {
    match error {
        FarePersistenceError::Connection { message } => Error::service_unavailable(message),
        FarePersistenceError::Query { message } => Error::internal(message),
        FarePersistenceError::NotFound { .. } => Error::not_found("Fare not found"),
    }
}

/// Attach a fare schedule to a matatu. A matatu may carry several; no
/// single-active-fare rule exists.
#[utoipa::path(
    post,
    path = "/api/fares",
    request_body = FareUpsert,
    responses(
        (status = 200, description = "Created fare", body = FareOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError)
    ),
    tags = ["fares"],
    operation_id = "createFare"
)]
#[post("/fares")]
pub async fn create_fare(
    state: web::Data<HttpState>,
    payload: web::Json<FareUpsert>,
) -> ApiResult<web::Json<FareOut>> {
    let draft = NewFare::try_from(payload.into_inner()).map_err(map_fare_validation_error)?;
    let fare = state
        .fares
        .create(&draft)
        .await
        .map_err(map_fare_persistence_error)?;
    Ok(web::Json(FareOut::from(fare)))
}

/// List fares in creation order.
#[utoipa::path(
    get,
    path = "/api/fares",
    params(PageQuery),
    responses(
        (status = 200, description = "Fares", body = [FareOut])
    ),
    tags = ["fares"],
    operation_id = "listFares"
)]
#[get("/fares")]
pub async fn list_fares(
    state: web::Data<HttpState>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<FareOut>>> {
    let fares = state
        .fares
        .list(page.into_inner().into())
        .await
        .map_err(map_fare_persistence_error)?;
    Ok(web::Json(fares.into_iter().map(FareOut::from).collect()))
}

/// List every fare attached to one matatu.
#[utoipa::path(
    get,
    path = "/api/fares/matatu/{matatu_id}",
    params(("matatu_id" = i32, Path, description = "Matatu identifier")),
    responses(
        (status = 200, description = "Fares", body = [FareOut])
    ),
    tags = ["fares"],
    operation_id = "listFaresForMatatu"
)]
#[get("/fares/matatu/{matatu_id}")]
pub async fn list_fares_for_matatu(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<FareOut>>> {
    let matatu_id = path.into_inner();
    let fares = state
        .fares
        .list_for_matatu(matatu_id)
        .await
        .map_err(map_fare_persistence_error)?;
    Ok(web::Json(fares.into_iter().map(FareOut::from).collect()))
}

/// Replace every field of a fare schedule.
#[utoipa::path(
    put,
    path = "/api/fares/{fare_id}",
    params(("fare_id" = i32, Path, description = "Fare identifier")),
    request_body = FareUpsert,
    responses(
        (status = 200, description = "Updated fare", body = FareOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 404, description = "Not found", body = crate::domain::DomainError)
    ),
    tags = ["fares"],
    operation_id = "updateFare"
)]
#[put("/fares/{fare_id}")]
pub async fn update_fare(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<FareUpsert>,
) -> ApiResult<web::Json<FareOut>> {
    let fare_id = path.into_inner();
    let draft = NewFare::try_from(payload.into_inner()).map_err(map_fare_validation_error)?;
    let fare = state
        .fares
        .update(fare_id, &draft)
        .await
        .map_err(map_fare_persistence_error)?;
    Ok(web::Json(FareOut::from(fare)))
}
