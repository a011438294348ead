//! PostgreSQL-backed `MatatuRepository` implementation using Diesel.
//!
//! Registration performs its duplicate check and the insert inside one
//! transaction. The unique constraint on `registration_number` remains the
//! race-safety backstop: a violation from a concurrent identical insert
//! maps to the same duplicate outcome as the check.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{MatatuPersistenceError, MatatuRepository};
use crate::domain::{Matatu, NewMatatu, Page};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{MatatuRow, NewMatatuRow};
use super::pool::{DbPool, PoolError};
use super::schema::matatus;

/// Diesel-backed implementation of the matatu repository port.
#[derive(Clone)]
pub struct DieselMatatuRepository {
    pool: DbPool,
}

impl DieselMatatuRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> MatatuPersistenceError {
    map_pool_error(error, MatatuPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> MatatuPersistenceError {
    map_diesel_error(
        error,
        MatatuPersistenceError::query,
        MatatuPersistenceError::connection,
    )
}

/// Transaction outcome for the guarded registration.
enum RegisterFailure {
    Duplicate,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for RegisterFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

#[async_trait]
impl MatatuRepository for DieselMatatuRepository {
    async fn register(&self, draft: &NewMatatu) -> Result<Matatu, MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewMatatuRow {
            registration_number: &draft.registration_number,
            fleet_id: draft.fleet_id,
            pochi_number: draft.pochi_number.as_deref(),
            paybill_number: draft.paybill_number.as_deref(),
            till_number: draft.till_number.as_deref(),
            account_number: draft.account_number.as_deref(),
            send_money_phone: draft.send_money_phone.as_deref(),
            mpesa_option: draft.mpesa_option.as_deref(),
            route_start: draft.route_start.as_deref(),
            route_end: draft.route_end.as_deref(),
            vehicle_tag: draft.vehicle_tag.as_deref(),
            operator_id: &draft.operator_id,
        };

        let registration_number = draft.registration_number.as_str();
        let outcome = conn
            .transaction::<MatatuRow, RegisterFailure, _>(|conn| {
                async move {
                    let existing = matatus::table
                        .filter(matatus::registration_number.eq(registration_number))
                        .select(MatatuRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if existing.is_some() {
                        return Err(RegisterFailure::Duplicate);
                    }

                    let row = diesel::insert_into(matatus::table)
                        .values(&new_row)
                        .returning(MatatuRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(row) => Ok(row.into()),
            Err(RegisterFailure::Duplicate) => Err(
                MatatuPersistenceError::duplicate_registration(draft.registration_number.as_str()),
            ),
            Err(RegisterFailure::Diesel(error)) if is_unique_violation(&error) => Err(
                MatatuPersistenceError::duplicate_registration(draft.registration_number.as_str()),
            ),
            Err(RegisterFailure::Diesel(error)) => Err(map_diesel(error)),
        }
    }

    async fn find_by_id(&self, matatu_id: i32) -> Result<Option<Matatu>, MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = matatus::table
            .find(matatu_id)
            .select(MatatuRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Matatu::from))
    }

    async fn find_by_registration(
        &self,
        registration_number: &str,
    ) -> Result<Option<Matatu>, MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = matatus::table
            .filter(matatus::registration_number.eq(registration_number))
            .select(MatatuRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Matatu::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Matatu>, MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = matatus::table
            .order(matatus::id.asc())
            .offset(page.skip)
            .limit(page.limit)
            .select(MatatuRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Matatu::from).collect())
    }

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Matatu>, MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = matatus::table
            .filter(matatus::operator_id.eq(operator_id))
            .order(matatus::id.asc())
            .select(MatatuRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Matatu::from).collect())
    }

    async fn delete(&self, matatu_id: i32) -> Result<(), MatatuPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(matatus::table.find(matatu_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        if deleted == 0 {
            return Err(MatatuPersistenceError::NotFound { matatu_id });
        }
        Ok(())
    }
}
