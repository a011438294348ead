//! PostgreSQL-backed `FareRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FarePersistenceError, FareRepository};
use crate::domain::{Fare, NewFare, Page};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FareRow, FareWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::fares;

/// Diesel-backed implementation of the fare repository port.
#[derive(Clone)]
pub struct DieselFareRepository {
    pool: DbPool,
}

impl DieselFareRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> FarePersistenceError {
    map_pool_error(error, FarePersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> FarePersistenceError {
    map_diesel_error(
        error,
        FarePersistenceError::query,
        FarePersistenceError::connection,
    )
}

fn write_row(draft: &NewFare) -> FareWriteRow {
    FareWriteRow {
        matatu_id: draft.matatu_id,
        peak_fare: draft.peak_fare,
        non_peak_fare: draft.non_peak_fare,
        rainy_peak_fare: draft.rainy_peak_fare,
        rainy_non_peak_fare: draft.rainy_non_peak_fare,
        disability_discount: draft.disability_discount,
    }
}

#[async_trait]
impl FareRepository for DieselFareRepository {
    async fn create(&self, draft: &NewFare) -> Result<Fare, FarePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: FareRow = diesel::insert_into(fares::table)
            .values(write_row(draft))
            .returning(FareRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into())
    }

    async fn list(&self, page: Page) -> Result<Vec<Fare>, FarePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = fares::table
            .order(fares::id.asc())
            .offset(page.skip)
            .limit(page.limit)
            .select(FareRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Fare::from).collect())
    }

    async fn list_for_matatu(&self, matatu_id: i32) -> Result<Vec<Fare>, FarePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = fares::table
            .filter(fares::matatu_id.eq(matatu_id))
            .order(fares::id.asc())
            .select(FareRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Fare::from).collect())
    }

    async fn update(&self, fare_id: i32, draft: &NewFare) -> Result<Fare, FarePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Full replacement: the changeset carries every stored field.
        let row = diesel::update(fares::table.find(fare_id))
            .set(write_row(draft))
            .returning(FareRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        match row {
            Some(row) => Ok(row.into()),
            None => Err(FarePersistenceError::NotFound { fare_id }),
        }
    }
}
