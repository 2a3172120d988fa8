//! # Parking History Repository
//!
//! Read access to `parking_log`. One row per admission; `time_out` is
//! rewritten with the real exit time when the client leaves. Rows outlive
//! the client and facility they mention.

use parking_core::ParkingLog;
use sqlx::SqlitePool;

use crate::error::DbResult;

/// Repository for the parking history.
#[derive(Debug, Clone)]
pub struct ParkingLogRepository {
    pool: SqlitePool,
}

impl ParkingLogRepository {
    /// Creates a new ParkingLogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ParkingLogRepository { pool }
    }

    /// Lists the whole history, oldest first.
    pub async fn list(&self) -> DbResult<Vec<ParkingLog>> {
        let rows = sqlx::query_as::<_, ParkingLog>(
            r#"
            SELECT id, client_id, parking_id, time_in, time_out
            FROM parking_log
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists the history of one (client, parking) pair, oldest first.
    pub async fn list_for_pair(&self, client_id: i64, parking_id: i64) -> DbResult<Vec<ParkingLog>> {
        let rows = sqlx::query_as::<_, ParkingLog>(
            r#"
            SELECT id, client_id, parking_id, time_in, time_out
            FROM parking_log
            WHERE client_id = ?1 AND parking_id = ?2
            ORDER BY id
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts history rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_log")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
