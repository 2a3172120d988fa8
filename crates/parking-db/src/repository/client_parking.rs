//! # Active Occupancy Repository
//!
//! Read access to `client_parking`: which client is parked where right now.
//! Rows are written and removed only by [`crate::Allocator`].

use parking_core::ClientParking;
use sqlx::SqlitePool;

use crate::error::DbResult;

/// Repository for active occupancies.
#[derive(Debug, Clone)]
pub struct ClientParkingRepository {
    pool: SqlitePool,
}

impl ClientParkingRepository {
    /// Creates a new ClientParkingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientParkingRepository { pool }
    }

    /// Lists all active occupancies ordered by id.
    pub async fn list(&self) -> DbResult<Vec<ClientParking>> {
        let rows = sqlx::query_as::<_, ClientParking>(
            r#"
            SELECT id, client_id, parking_id, time_in, time_out
            FROM client_parking
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Gets the active occupancy for a (client, parking) pair, if any.
    pub async fn get(&self, client_id: i64, parking_id: i64) -> DbResult<Option<ClientParking>> {
        let row = sqlx::query_as::<_, ClientParking>(
            r#"
            SELECT id, client_id, parking_id, time_in, time_out
            FROM client_parking
            WHERE client_id = ?1 AND parking_id = ?2
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Counts active occupancies.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM client_parking")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
