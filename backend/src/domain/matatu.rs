//! Matatu (registered transit vehicle) entity and creation draft.

use std::fmt;

/// Registered transit vehicle, the central business entity.
///
/// Payment-channel attributes are all optional: a vehicle may collect via a
/// pochi number, a paybill/account pair, a till, or plain send-money,
/// depending on how its operator is set up with the mobile-money provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matatu {
    pub id: i32,
    /// Globally unique number-plate registration.
    pub registration_number: String,
    /// Weak reference to the owning fleet; unassigned vehicles carry none.
    pub fleet_id: Option<i32>,
    pub pochi_number: Option<String>,
    pub paybill_number: Option<String>,
    pub till_number: Option<String>,
    pub account_number: Option<String>,
    pub send_money_phone: Option<String>,
    pub mpesa_option: Option<String>,
    pub route_start: Option<String>,
    pub route_end: Option<String>,
    /// Free-form vehicle tag carried for the operator's own bookkeeping.
    pub vehicle_tag: Option<String>,
    pub operator_id: String,
}

/// Validation errors returned by [`NewMatatu::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatatuValidationError {
    EmptyRegistrationNumber,
    EmptyOperatorId,
}

impl fmt::Display for MatatuValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRegistrationNumber => {
                write!(f, "registration number must not be empty")
            }
            Self::EmptyOperatorId => write!(f, "operator id must not be empty"),
        }
    }
}

impl std::error::Error for MatatuValidationError {}

/// Validated draft for registering a matatu.
///
/// Only the registration number and operator id are mandatory; the optional
/// channel fields default to `None` and are filled in by the inbound
/// adapter after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMatatu {
    pub registration_number: String,
    pub fleet_id: Option<i32>,
    pub pochi_number: Option<String>,
    pub paybill_number: Option<String>,
    pub till_number: Option<String>,
    pub account_number: Option<String>,
    pub send_money_phone: Option<String>,
    pub mpesa_option: Option<String>,
    pub route_start: Option<String>,
    pub route_end: Option<String>,
    pub vehicle_tag: Option<String>,
    pub operator_id: String,
}

impl NewMatatu {
    /// Validate the required fields and construct a draft with every
    /// optional attribute unset.
    pub fn new(registration_number: &str, operator_id: &str) -> Result<Self, MatatuValidationError> {
        if registration_number.trim().is_empty() {
            return Err(MatatuValidationError::EmptyRegistrationNumber);
        }
        if operator_id.trim().is_empty() {
            return Err(MatatuValidationError::EmptyOperatorId);
        }
        Ok(Self {
            registration_number: registration_number.trim().to_owned(),
            operator_id: operator_id.trim().to_owned(),
            ..Self::default()
        })
    }
}
