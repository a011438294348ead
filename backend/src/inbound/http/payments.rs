//! Payments API handlers.
//!
//! ```text
//! POST /api/payments {"userId":1,"matatuId":5,"amount":50.0}
//! GET /api/payments?skip=0&limit=100
//! GET /api/payments/user/1
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::PaymentPersistenceError;
use crate::domain::{Error, NewPayment, Payment};
use crate::inbound::http::pagination::PageQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation request body for `POST /api/payments`.
///
/// Referenced ids are recorded as given; the storage-level foreign keys are
/// the only existence guard.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    #[serde(default)]
    pub route: Option<String>,
    /// Defaults to `"pending"` when absent.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_location: Option<String>,
    #[serde(default)]
    pub end_location: Option<String>,
    #[serde(default)]
    pub mpesa_receipt_number: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub fleet_id: Option<i32>,
}

/// Outbound payment record with its server-assigned timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOut {
    pub id: i32,
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    pub route: Option<String>,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub mpesa_receipt_number: Option<String>,
    pub payment_method: Option<String>,
    pub phone_number: Option<String>,
    pub fleet_id: Option<i32>,
}

impl From<Payment> for PaymentOut {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            matatu_id: payment.matatu_id,
            amount: payment.amount,
            route: payment.route,
            status: payment.status,
            timestamp: payment.timestamp,
            start_location: payment.start_location,
            end_location: payment.end_location,
            mpesa_receipt_number: payment.mpesa_receipt_number,
            payment_method: payment.payment_method,
            phone_number: payment.phone_number,
            fleet_id: payment.fleet_id,
        }
    }
}

impl From<PaymentCreate> for NewPayment {
    fn from(value: PaymentCreate) -> Self {
        let mut draft = Self::new(value.user_id, value.matatu_id, value.amount);
        draft.route = value.route;
        draft.status = value.status;
        draft.start_location = value.start_location;
        draft.end_location = value.end_location;
        draft.mpesa_receipt_number = value.mpesa_receipt_number;
        draft.payment_method = value.payment_method;
        draft.phone_number = value.phone_number;
        draft.fleet_id = value.fleet_id;
        draft
    }
}

fn map_payment_persistence_error(error: PaymentPersistenceError) -> Error {
    match error {
        PaymentPersistenceError::Connection { message } => Error::service_unavailable(message),
        PaymentPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Record a payment event.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = PaymentCreate,
    responses(
        (status = 200, description = "Recorded payment", body = PaymentOut),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError)
    ),
    tags = ["payments"],
    operation_id = "createPayment"
)]
#[post("/payments")]
pub async fn create_payment(
    state: web::Data<HttpState>,
    payload: web::Json<PaymentCreate>,
) -> ApiResult<web::Json<PaymentOut>> {
    let draft = NewPayment::from(payload.into_inner());
    let payment = state
        .payments
        .create(&draft)
        .await
        .map_err(map_payment_persistence_error)?;
    Ok(web::Json(PaymentOut::from(payment)))
}

/// List payments in creation order.
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PageQuery),
    responses(
        (status = 200, description = "Payments", body = [PaymentOut])
    ),
    tags = ["payments"],
    operation_id = "listPayments"
)]
#[get("/payments")]
pub async fn list_payments(
    state: web::Data<HttpState>,
    page: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<PaymentOut>>> {
    let payments = state
        .payments
        .list(page.into_inner().into())
        .await
        .map_err(map_payment_persistence_error)?;
    Ok(web::Json(
        payments.into_iter().map(PaymentOut::from).collect(),
    ))
}

/// List every payment recorded for one user.
#[utoipa::path(
    get,
    path = "/api/payments/user/{user_id}",
    params(("user_id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Payments", body = [PaymentOut])
    ),
    tags = ["payments"],
    operation_id = "listPaymentsForUser"
)]
#[get("/payments/user/{user_id}")]
pub async fn list_payments_for_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<PaymentOut>>> {
    let user_id = path.into_inner();
    let payments = state
        .payments
        .list_for_user(user_id)
        .await
        .map_err(map_payment_persistence_error)?;
    Ok(web::Json(
        payments.into_iter().map(PaymentOut::from).collect(),
    ))
}
