//! PostgreSQL-backed `PaymentRepository` implementation using Diesel.
//!
//! Timestamps are assigned here, not taken from the caller. Referenced ids
//! are inserted as given; the storage foreign keys are the only existence
//! guard.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PaymentPersistenceError, PaymentRepository};
use crate::domain::{NewPayment, Page, Payment};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPaymentRow, PaymentRow};
use super::pool::{DbPool, PoolError};
use super::schema::payments;

/// Diesel-backed implementation of the payment repository port.
#[derive(Clone)]
pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PaymentPersistenceError {
    map_pool_error(error, PaymentPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> PaymentPersistenceError {
    map_diesel_error(
        error,
        PaymentPersistenceError::query,
        PaymentPersistenceError::connection,
    )
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn create(&self, draft: &NewPayment) -> Result<Payment, PaymentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let status = draft.status_or_default();
        let new_row = NewPaymentRow {
            user_id: draft.user_id,
            matatu_id: draft.matatu_id,
            amount: draft.amount,
            route: draft.route.as_deref(),
            timestamp: Utc::now(),
            status: &status,
            start_location: draft.start_location.as_deref(),
            end_location: draft.end_location.as_deref(),
            mpesa_receipt_number: draft.mpesa_receipt_number.as_deref(),
            payment_method: draft.payment_method.as_deref(),
            phone_number: draft.phone_number.as_deref(),
            fleet_id: draft.fleet_id,
        };

        let row: PaymentRow = diesel::insert_into(payments::table)
            .values(&new_row)
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into())
    }

    async fn list(&self, page: Page) -> Result<Vec<Payment>, PaymentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = payments::table
            .order(payments::id.asc())
            .offset(page.skip)
            .limit(page.limit)
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Payment>, PaymentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = payments::table
            .filter(payments::user_id.eq(user_id))
            .order(payments::id.asc())
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }
}
