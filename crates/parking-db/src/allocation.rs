//! # Occupancy Allocation
//!
//! Atomic enter/exit of a client at a parking.
//!
//! ## Entry Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE parking SET available_places = available_places - 1             │
//! │   WHERE id = ? AND opened = 1 AND available_places > 0                  │
//! │    │      (first statement: takes the write lock, so concurrent         │
//! │    │       entries queue here instead of racing on a stale read)        │
//! │    ▼                                                                    │
//! │  SELECT client, SELECT EXISTS(client_parking for the pair)              │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  admission::check_entry(facts) ── Err ──► ROLLBACK (nothing changed)    │
//! │    │ Ok                                                                 │
//! │    ▼                                                                    │
//! │  INSERT client_parking, INSERT parking_log                              │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit is the mirror image: delete the occupancy first, then close the
//! latest log row for the pair and give the place back, capped at
//! `count_places`.
//!
//! A `sqlx::Transaction` that is dropped without `commit()` rolls back, so
//! every early `?` return below leaves the database untouched.

use chrono::{DateTime, Utc};
use parking_core::admission::{self, EntryFacts};
use parking_core::{Client, ClientParking, CoreError, ParkingLog, StayEstimate};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{AllocationError, AllocationResult, DbError};

/// Rows written by a successful entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    /// The new active occupancy.
    pub occupancy: ClientParking,
    /// The matching history row, with the provisional `time_out`.
    pub log_entry: ParkingLog,
}

/// Performs enter/exit transactions against the pool.
///
/// ## Usage
/// ```rust,ignore
/// let allocator = db.allocator(StayEstimate::default());
///
/// let outcome = allocator.enter(client_id, parking_id).await?;
/// let closed = allocator.exit(client_id, parking_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    pool: SqlitePool,
    stay: StayEstimate,
}

impl Allocator {
    /// Creates a new Allocator.
    pub fn new(pool: SqlitePool, stay: StayEstimate) -> Self {
        Allocator { pool, stay }
    }

    /// Returns the stay estimate used for provisional exit times.
    pub fn stay(&self) -> StayEstimate {
        self.stay
    }

    /// Admits a client to a parking, stamped with the current time.
    pub async fn enter(&self, client_id: i64, parking_id: i64) -> AllocationResult<EntryOutcome> {
        self.enter_at(client_id, parking_id, Utc::now()).await
    }

    /// Admits a client to a parking at the given time.
    ///
    /// ## Arguments
    /// * `client_id` - The entering client
    /// * `parking_id` - The facility
    /// * `now` - Entry time; `time_out` is `now` plus the stay estimate
    ///
    /// ## Returns
    /// * `Ok(EntryOutcome)` - Occupancy and log rows were written
    /// * `Err(AllocationError::Rejected(_))` - An admission rule failed
    /// * `Err(AllocationError::Storage(_))` - The database failed
    pub async fn enter_at(
        &self,
        client_id: i64,
        parking_id: i64,
        now: DateTime<Utc>,
    ) -> AllocationResult<EntryOutcome> {
        debug!(client_id = %client_id, parking_id = %parking_id, "Entering parking");

        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            r#"
            UPDATE parking
            SET available_places = available_places - 1
            WHERE id = ?1 AND opened = 1 AND available_places > 0
            "#,
        )
        .bind(parking_id)
        .execute(&mut *tx)
        .await?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, credit_card, car_number
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&mut *tx)
        .await?;

        let already_occupying: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM client_parking
                WHERE client_id = ?1 AND parking_id = ?2
            )
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .fetch_one(&mut *tx)
        .await?;

        let facts = EntryFacts {
            client_id,
            parking_id,
            client: client.as_ref(),
            place_reserved: reserved.rows_affected() == 1,
            already_occupying,
        };

        if let Err(rejection) = admission::check_entry(&facts) {
            debug!(
                client_id = %client_id,
                parking_id = %parking_id,
                reason = %rejection,
                "Entry rejected"
            );
            return Err(rejection.into());
        }

        let window = self.stay.window_from(now);

        let occupancy = sqlx::query_as::<_, ClientParking>(
            r#"
            INSERT INTO client_parking (client_id, parking_id, time_in, time_out)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, client_id, parking_id, time_in, time_out
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .bind(window.time_in)
        .bind(window.time_out)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => AllocationError::Rejected(CoreError::AlreadyOccupying {
                client_id,
                parking_id,
            }),
            other => AllocationError::Storage(other),
        })?;

        let log_entry = sqlx::query_as::<_, ParkingLog>(
            r#"
            INSERT INTO parking_log (client_id, parking_id, time_in, time_out)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, client_id, parking_id, time_in, time_out
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .bind(window.time_in)
        .bind(window.time_out)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            client_id = %client_id,
            parking_id = %parking_id,
            occupancy_id = %occupancy.id,
            "Client entered parking"
        );

        Ok(EntryOutcome {
            occupancy,
            log_entry,
        })
    }

    /// Releases a client's place, stamped with the current time.
    pub async fn exit(&self, client_id: i64, parking_id: i64) -> AllocationResult<ParkingLog> {
        self.exit_at(client_id, parking_id, Utc::now()).await
    }

    /// Releases a client's place at the given time.
    ///
    /// ## Returns
    /// * `Ok(ParkingLog)` - The history row, now carrying the real `time_out`
    /// * `Err(AllocationError::Rejected(NotOccupying))` - The pair isn't parked
    /// * `Err(AllocationError::Storage(_))` - The database failed
    pub async fn exit_at(
        &self,
        client_id: i64,
        parking_id: i64,
        now: DateTime<Utc>,
    ) -> AllocationResult<ParkingLog> {
        debug!(client_id = %client_id, parking_id = %parking_id, "Leaving parking");

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM client_parking
            WHERE client_id = ?1 AND parking_id = ?2
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .execute(&mut *tx)
        .await?;

        if let Err(rejection) =
            admission::check_exit(client_id, parking_id, removed.rows_affected() > 0)
        {
            debug!(
                client_id = %client_id,
                parking_id = %parking_id,
                "Exit rejected: not parked"
            );
            return Err(rejection.into());
        }

        let closed = sqlx::query_as::<_, ParkingLog>(
            r#"
            UPDATE parking_log
            SET time_out = ?3
            WHERE id = (
                SELECT id FROM parking_log
                WHERE client_id = ?1 AND parking_id = ?2
                ORDER BY id DESC
                LIMIT 1
            )
            RETURNING id, client_id, parking_id, time_in, time_out
            "#,
        )
        .bind(client_id)
        .bind(parking_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            DbError::Internal(format!(
                "active occupancy {client_id}/{parking_id} has no parking_log row"
            ))
        })?;

        sqlx::query(
            r#"
            UPDATE parking
            SET available_places = MIN(available_places + 1, count_places)
            WHERE id = ?1
            "#,
        )
        .bind(parking_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            client_id = %client_id,
            parking_id = %parking_id,
            log_id = %closed.id,
            "Client left parking"
        );

        Ok(closed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{client_with_card, memory_db, parking_with_places};
    use crate::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use parking_core::NewParking;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap()
    }

    async fn available(db: &Database, parking_id: i64) -> i64 {
        db.parkings()
            .get_by_id(parking_id)
            .await
            .unwrap()
            .unwrap()
            .available_places
    }

    fn rejection(result: AllocationResult<impl std::fmt::Debug>) -> CoreError {
        match result {
            Err(AllocationError::Rejected(err)) => err,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enter_then_exit() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        let outcome = allocator.enter_at(client.id, parking.id, t0()).await.unwrap();

        assert_eq!(outcome.occupancy.client_id, client.id);
        assert_eq!(outcome.occupancy.parking_id, parking.id);
        assert_eq!(outcome.occupancy.time_in, t0());
        assert_eq!(outcome.occupancy.time_out, t0() + Duration::hours(5));
        assert_eq!(outcome.log_entry.time_in, outcome.occupancy.time_in);
        assert_eq!(outcome.log_entry.time_out, outcome.occupancy.time_out);
        assert_eq!(available(&db, parking.id).await, 1);

        let exit_time = t0() + Duration::minutes(90);
        let closed = allocator.exit_at(client.id, parking.id, exit_time).await.unwrap();

        assert_eq!(closed.id, outcome.log_entry.id);
        assert_eq!(closed.time_in, t0());
        assert_eq!(closed.time_out, exit_time);
        assert_eq!(available(&db, parking.id).await, 2);
        assert_eq!(db.client_parkings().count().await.unwrap(), 0);
        assert_eq!(db.parking_log().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_double_entry_is_rejected() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, parking.id).await.unwrap();
        let err = rejection(allocator.enter(client.id, parking.id).await);

        assert!(matches!(err, CoreError::AlreadyOccupying { .. }));
        // The second attempt's reservation was rolled back
        assert_eq!(available(&db, parking.id).await, 1);
        assert_eq!(db.parking_log().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_client_without_card_changes_nothing() {
        let db = memory_db().await;
        let client = client_with_card(&db, "").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        let err = rejection(allocator.enter(client.id, parking.id).await);

        assert_eq!(err, CoreError::PaymentMethodMissing { client_id: client.id });
        assert_eq!(available(&db, parking.id).await, 2);
        assert_eq!(db.client_parkings().count().await.unwrap(), 0);
        assert_eq!(db.parking_log().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_client_reads_as_missing_card() {
        let db = memory_db().await;
        let parking = parking_with_places(&db, 2).await;

        let err = rejection(
            db.allocator(StayEstimate::default())
                .enter(999, parking.id)
                .await,
        );

        assert_eq!(err, CoreError::PaymentMethodMissing { client_id: 999 });
        assert_eq!(available(&db, parking.id).await, 2);
    }

    #[tokio::test]
    async fn test_card_check_comes_before_capacity() {
        let db = memory_db().await;
        let client = client_with_card(&db, "   ").await;

        let err = rejection(
            db.allocator(StayEstimate::default())
                .enter(client.id, 999)
                .await,
        );

        assert!(matches!(err, CoreError::PaymentMethodMissing { .. }));
    }

    #[tokio::test]
    async fn test_unavailable_parkings() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let other = client_with_card(&db, "11111").await;
        let allocator = db.allocator(StayEstimate::default());

        // Missing
        let err = rejection(allocator.enter(client.id, 999).await);
        assert_eq!(err, CoreError::FacilityUnavailable { parking_id: 999 });

        // Closed
        let closed = db
            .parkings()
            .create(&NewParking::new("Closed lot", 5).opened(false))
            .await
            .unwrap();
        let err = rejection(allocator.enter(client.id, closed.id).await);
        assert!(matches!(err, CoreError::FacilityUnavailable { .. }));
        assert_eq!(available(&db, closed.id).await, 5);

        // Full
        let tiny = parking_with_places(&db, 1).await;
        allocator.enter(client.id, tiny.id).await.unwrap();
        let err = rejection(allocator.enter(other.id, tiny.id).await);
        assert!(matches!(err, CoreError::FacilityUnavailable { .. }));
        assert_eq!(available(&db, tiny.id).await, 0);
    }

    #[tokio::test]
    async fn test_full_parking_reports_unavailable_before_already_occupying() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let tiny = parking_with_places(&db, 1).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, tiny.id).await.unwrap();
        let err = rejection(allocator.enter(client.id, tiny.id).await);

        assert!(matches!(err, CoreError::FacilityUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_exit_without_occupancy() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        let err = rejection(allocator.exit(client.id, parking.id).await);
        assert_eq!(
            err,
            CoreError::NotOccupying {
                client_id: client.id,
                parking_id: parking.id
            }
        );

        // Second exit after a real one is rejected too
        allocator.enter(client.id, parking.id).await.unwrap();
        allocator.exit(client.id, parking.id).await.unwrap();
        let err = rejection(allocator.exit(client.id, parking.id).await);
        assert!(matches!(err, CoreError::NotOccupying { .. }));
        assert_eq!(available(&db, parking.id).await, 2);
    }

    #[tokio::test]
    async fn test_exit_closes_latest_log_row() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter_at(client.id, parking.id, t0()).await.unwrap();
        allocator
            .exit_at(client.id, parking.id, t0() + Duration::hours(1))
            .await
            .unwrap();
        let second = allocator
            .enter_at(client.id, parking.id, t0() + Duration::hours(2))
            .await
            .unwrap();
        let closed = allocator
            .exit_at(client.id, parking.id, t0() + Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(closed.id, second.log_entry.id);

        let history = db.parking_log().list_for_pair(client.id, parking.id).await.unwrap();
        assert_eq!(history[0].time_out, t0() + Duration::hours(1));
        assert_eq!(history[1].time_out, t0() + Duration::hours(3));
    }

    #[tokio::test]
    async fn test_exit_from_closed_parking_is_allowed() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 1).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, parking.id).await.unwrap();
        sqlx::query("UPDATE parking SET opened = 0 WHERE id = ?1")
            .bind(parking.id)
            .execute(db.pool())
            .await
            .unwrap();

        allocator.exit(client.id, parking.id).await.unwrap();
        assert_eq!(available(&db, parking.id).await, 1);
    }

    #[tokio::test]
    async fn test_exit_never_exceeds_count_places() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, parking.id).await.unwrap();
        sqlx::query("UPDATE parking SET available_places = count_places WHERE id = ?1")
            .bind(parking.id)
            .execute(db.pool())
            .await
            .unwrap();

        allocator.exit(client.id, parking.id).await.unwrap();
        assert_eq!(available(&db, parking.id).await, 2);
    }

    #[tokio::test]
    async fn test_failed_exit_rolls_back() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, parking.id).await.unwrap();
        // History row gone: exit fails after its first write
        sqlx::query("DELETE FROM parking_log WHERE client_id = ?1 AND parking_id = ?2")
            .bind(client.id)
            .bind(parking.id)
            .execute(db.pool())
            .await
            .unwrap();

        let result = allocator.exit(client.id, parking.id).await;
        assert!(
            matches!(result, Err(AllocationError::Storage(DbError::Internal(_)))),
            "got {result:?}"
        );

        let occupancy = db.client_parkings().get(client.id, parking.id).await.unwrap();
        assert!(occupancy.is_some());
        assert_eq!(available(&db, parking.id).await, 1);
    }

    #[tokio::test]
    async fn test_custom_stay_estimate() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 1).await;
        let allocator = db.allocator(StayEstimate::from_hours(2).unwrap());

        let outcome = allocator.enter_at(client.id, parking.id, t0()).await.unwrap();
        assert_eq!(outcome.occupancy.time_out, t0() + Duration::hours(2));
        assert_eq!(allocator.stay().hours(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_entries_never_overbook() {
        const CLIENTS: usize = 8;

        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(
            DbConfig::new(dir.path().join("race.db"))
                .max_connections(CLIENTS as u32)
                .busy_timeout(std::time::Duration::from_secs(30)),
        )
        .await
        .unwrap();

        let parking = parking_with_places(&db, 1).await;
        let mut client_ids = Vec::with_capacity(CLIENTS);
        for _ in 0..CLIENTS {
            client_ids.push(client_with_card(&db, "00000").await.id);
        }

        let allocator = db.allocator(StayEstimate::default());
        let mut handles = Vec::with_capacity(CLIENTS);
        for client_id in client_ids {
            let allocator = allocator.clone();
            let parking_id = parking.id;
            handles.push(tokio::spawn(async move {
                allocator.enter(client_id, parking_id).await
            }));
        }

        let mut admitted = 0;
        let mut turned_away = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(AllocationError::Rejected(CoreError::FacilityUnavailable { .. })) => {
                    turned_away += 1
                }
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(turned_away, CLIENTS - 1);
        assert_eq!(available(&db, parking.id).await, 0);
        assert_eq!(db.client_parkings().count().await.unwrap(), 1);
        assert_eq!(db.parking_log().count().await.unwrap(), 1);

        db.close().await;
    }
}
