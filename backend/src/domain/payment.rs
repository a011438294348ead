//! Payment record entity and creation draft.

use chrono::{DateTime, Utc};

/// Status assigned to payments that do not declare one.
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// Immutable record of a rider's payment event.
///
/// Payments are passively recorded facts; there is no settlement state
/// machine behind the `status` string.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    pub route: Option<String>,
    /// Server-assigned at creation, UTC.
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub mpesa_receipt_number: Option<String>,
    pub payment_method: Option<String>,
    pub phone_number: Option<String>,
    pub fleet_id: Option<i32>,
}

/// Draft for recording a payment.
///
/// Referenced user and matatu ids are not resolved here; the storage-level
/// foreign keys are the only existence guard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPayment {
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    pub route: Option<String>,
    pub status: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub mpesa_receipt_number: Option<String>,
    pub payment_method: Option<String>,
    pub phone_number: Option<String>,
    pub fleet_id: Option<i32>,
}

impl NewPayment {
    /// Construct a draft with the required references and amount; optional
    /// attributes default to unset.
    pub fn new(user_id: i32, matatu_id: i32, amount: f64) -> Self {
        Self {
            user_id,
            matatu_id,
            amount,
            ..Self::default()
        }
    }

    /// Status to persist, falling back to [`DEFAULT_PAYMENT_STATUS`].
    pub fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_owned())
    }
}
