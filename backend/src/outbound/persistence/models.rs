//! Diesel row types used by the repository adapters.
//!
//! Queryable rows convert into domain entities via `From`; insertable rows
//! borrow from the validated domain drafts.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Fare, Fleet, Matatu, Payment, User};

use super::schema::{fares, fleets, matatus, payments, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub phone: Option<String>,
    pub role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            hashed_password: row.hashed_password,
            phone: row.phone,
            role: row.role,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fleets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FleetRow {
    pub id: i32,
    pub name: String,
    pub operator_id: String,
}

impl From<FleetRow> for Fleet {
    fn from(row: FleetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            operator_id: row.operator_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = fleets)]
pub(crate) struct NewFleetRow<'a> {
    pub name: &'a str,
    pub operator_id: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = matatus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MatatuRow {
    pub id: i32,
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

impl From<MatatuRow> for Matatu {
    fn from(row: MatatuRow) -> Self {
        Self {
            id: row.id,
            registration_number: row.registration_number,
            fleet_id: row.fleet_id,
            pochi_number: row.pochi_number,
            paybill_number: row.paybill_number,
            till_number: row.till_number,
            account_number: row.account_number,
            send_money_phone: row.send_money_phone,
            mpesa_option: row.mpesa_option,
            route_start: row.route_start,
            route_end: row.route_end,
            vehicle_tag: row.vehicle_tag,
            operator_id: row.operator_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = matatus)]
pub(crate) struct NewMatatuRow<'a> {
    pub registration_number: &'a str,
    pub fleet_id: Option<i32>,
    pub pochi_number: Option<&'a str>,
    pub paybill_number: Option<&'a str>,
    pub till_number: Option<&'a str>,
    pub account_number: Option<&'a str>,
    pub send_money_phone: Option<&'a str>,
    pub mpesa_option: Option<&'a str>,
    pub route_start: Option<&'a str>,
    pub route_end: Option<&'a str>,
    pub vehicle_tag: Option<&'a str>,
    pub operator_id: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fares)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FareRow {
    pub id: i32,
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    pub disability_discount: f64,
}

impl From<FareRow> for Fare {
    fn from(row: FareRow) -> Self {
        Self {
            id: row.id,
            matatu_id: row.matatu_id,
            peak_fare: row.peak_fare,
            non_peak_fare: row.non_peak_fare,
            rainy_peak_fare: row.rainy_peak_fare,
            rainy_non_peak_fare: row.rainy_non_peak_fare,
            disability_discount: row.disability_discount,
        }
    }
}

/// Insert and full-replace share this shape: `update_fare` overwrites every
/// stored field, so the changeset carries them all.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = fares)]
pub(crate) struct FareWriteRow {
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    pub disability_discount: f64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: i32,
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    pub route: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub mpesa_receipt_number: Option<String>,
    pub payment_method: Option<String>,
    pub phone_number: Option<String>,
    pub fleet_id: Option<i32>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            matatu_id: row.matatu_id,
            amount: row.amount,
            route: row.route,
            timestamp: row.timestamp,
            status: row.status,
            start_location: row.start_location,
            end_location: row.end_location,
            mpesa_receipt_number: row.mpesa_receipt_number,
            payment_method: row.payment_method,
            phone_number: row.phone_number,
            fleet_id: row.fleet_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payments)]
pub(crate) struct NewPaymentRow<'a> {
    pub user_id: i32,
    pub matatu_id: i32,
    pub amount: f64,
    pub route: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
    pub status: &'a str,
    pub start_location: Option<&'a str>,
    pub end_location: Option<&'a str>,
    pub mpesa_receipt_number: Option<&'a str>,
    pub payment_method: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub fleet_id: Option<i32>,
}
