//! PostgreSQL-backed `FleetRepository` implementation using Diesel.
//!
//! The delete path runs its existence check, the matatu reference count,
//! and the delete inside one transaction so the referential guard cannot
//! race a concurrent matatu insert.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{FleetPersistenceError, FleetRepository};
use crate::domain::{Fleet, NewFleet, Page};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FleetRow, NewFleetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{fleets, matatus};

/// Diesel-backed implementation of the fleet repository port.
#[derive(Clone)]
pub struct DieselFleetRepository {
    pool: DbPool,
}

impl DieselFleetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> FleetPersistenceError {
    map_pool_error(error, FleetPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> FleetPersistenceError {
    map_diesel_error(
        error,
        FleetPersistenceError::query,
        FleetPersistenceError::connection,
    )
}

/// Transaction outcome for the guarded delete.
enum DeleteFailure {
    NotFound,
    MatatusAssigned,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for DeleteFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

#[async_trait]
impl FleetRepository for DieselFleetRepository {
    async fn create(&self, draft: &NewFleet) -> Result<Fleet, FleetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewFleetRow {
            name: &draft.name,
            operator_id: &draft.operator_id,
        };

        let row: FleetRow = diesel::insert_into(fleets::table)
            .values(&new_row)
            .returning(FleetRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, fleet_id: i32) -> Result<Option<Fleet>, FleetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = fleets::table
            .find(fleet_id)
            .select(FleetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Fleet::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Fleet>, FleetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = fleets::table
            .order(fleets::id.asc())
            .offset(page.skip)
            .limit(page.limit)
            .select(FleetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Fleet::from).collect())
    }

    async fn list_by_operator(
        &self,
        operator_id: &str,
    ) -> Result<Vec<Fleet>, FleetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows = fleets::table
            .filter(fleets::operator_id.eq(operator_id))
            .order(fleets::id.asc())
            .select(FleetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Fleet::from).collect())
    }

    async fn delete(&self, fleet_id: i32) -> Result<(), FleetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let outcome = conn
            .transaction::<(), DeleteFailure, _>(|conn| {
                async move {
                    let existing = fleets::table
                        .find(fleet_id)
                        .select(FleetRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if existing.is_none() {
                        return Err(DeleteFailure::NotFound);
                    }

                    let assigned: i64 = matatus::table
                        .filter(matatus::fleet_id.eq(fleet_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if assigned > 0 {
                        return Err(DeleteFailure::MatatusAssigned);
                    }

                    diesel::delete(fleets::table.find(fleet_id))
                        .execute(conn)
                        .await?;
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(()) => Ok(()),
            Err(DeleteFailure::NotFound) => Err(FleetPersistenceError::NotFound { fleet_id }),
            Err(DeleteFailure::MatatusAssigned) => {
                Err(FleetPersistenceError::MatatusAssigned { fleet_id })
            }
            Err(DeleteFailure::Diesel(error)) => Err(map_diesel(error)),
        }
    }
}
