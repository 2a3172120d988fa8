//! # Parking Repository
//!
//! Database operations for parking facilities.
//!
//! `available_places` is only ever changed by the allocator. This
//! repository sets it once, at creation, equal to `count_places`.

use parking_core::{NewParking, Parking};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for parking database operations.
#[derive(Debug, Clone)]
pub struct ParkingRepository {
    pool: SqlitePool,
}

impl ParkingRepository {
    /// Creates a new ParkingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ParkingRepository { pool }
    }

    /// Registers a new facility with every place free.
    ///
    /// ## Returns
    /// The stored facility with its generated id.
    pub async fn create(&self, parking: &NewParking) -> DbResult<Parking> {
        debug!(
            address = %parking.address,
            count_places = parking.count_places,
            opened = parking.opened,
            "Creating parking"
        );

        let created = sqlx::query_as::<_, Parking>(
            r#"
            INSERT INTO parking (address, opened, count_places, available_places)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, address, opened, count_places, available_places
            "#,
        )
        .bind(parking.address.trim())
        .bind(parking.opened)
        .bind(parking.count_places)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets a facility by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Parking>> {
        let parking = sqlx::query_as::<_, Parking>(
            r#"
            SELECT id, address, opened, count_places, available_places
            FROM parking
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parking)
    }

    /// Lists all facilities ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Parking>> {
        let parkings = sqlx::query_as::<_, Parking>(
            r#"
            SELECT id, address, opened, count_places, available_places
            FROM parking
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(parkings)
    }

    /// Deletes a facility.
    ///
    /// ## Returns
    /// * `Ok(())` - Facility deleted
    /// * `Err(DbError::NotFound)` - No such facility
    /// * `Err(DbError::ReferentialConflict)` - A car is parked there
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting parking");

        let result = sqlx::query(
            r#"
            DELETE FROM parking
            WHERE id = ?1
            AND NOT EXISTS (SELECT 1 FROM client_parking WHERE parking_id = ?1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => DbError::referential_conflict("Parking", id),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            if self.get_by_id(id).await?.is_some() {
                return Err(DbError::referential_conflict("Parking", id));
            }
            return Err(DbError::not_found("Parking", id));
        }

        Ok(())
    }

    /// Counts registered facilities.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
