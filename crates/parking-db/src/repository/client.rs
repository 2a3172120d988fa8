//! # Client Repository
//!
//! Database operations for clients.
//!
//! Clients are immutable after registration; the only change is deletion,
//! which is refused while the client has a car parked anywhere.

use parking_core::{Client, NewClient};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for client database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.clients();
///
/// let client = repo.create(&new_client).await?;
/// let found = repo.get_by_id(client.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Registers a new client.
    ///
    /// ## Returns
    /// The stored client with its generated id.
    pub async fn create(&self, client: &NewClient) -> DbResult<Client> {
        debug!(name = %client.name, surname = %client.surname, "Creating client");

        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, surname, credit_card, car_number)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, surname, credit_card, car_number
            "#,
        )
        .bind(client.name.trim())
        .bind(client.surname.trim())
        .bind(&client.credit_card)
        .bind(client.car_number.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets a client by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Client))` - Client found
    /// * `Ok(None)` - Client not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, credit_card, car_number
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Lists all clients ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, surname, credit_card, car_number
            FROM clients
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Deletes a client.
    ///
    /// The delete and the "is this client parked?" check are one statement,
    /// so a concurrent entry can't slip in between.
    ///
    /// ## Returns
    /// * `Ok(())` - Client deleted
    /// * `Err(DbError::NotFound)` - No such client
    /// * `Err(DbError::ReferentialConflict)` - Client is currently parked
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting client");

        let result = sqlx::query(
            r#"
            DELETE FROM clients
            WHERE id = ?1
            AND NOT EXISTS (SELECT 1 FROM client_parking WHERE client_id = ?1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => DbError::referential_conflict("Client", id),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            if self.get_by_id(id).await?.is_some() {
                return Err(DbError::referential_conflict("Client", id));
            }
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Counts registered clients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{client_with_card, memory_db, parking_with_places};
    use parking_core::StayEstimate;

    #[tokio::test]
    async fn test_create_and_get() {
        let db = memory_db().await;
        let repo = db.clients();

        let created = repo
            .create(&NewClient {
                name: "name".to_string(),
                surname: "surname".to_string(),
                credit_card: "00000".to_string(),
                car_number: "0000XXX00".to_string(),
            })
            .await
            .unwrap();

        assert!(created.id > 0);
        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.get_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_without_card_stores_empty_string() {
        let db = memory_db().await;

        let created = db
            .clients()
            .create(&NewClient {
                name: "name".to_string(),
                surname: "surname".to_string(),
                ..NewClient::default()
            })
            .await
            .unwrap();

        assert_eq!(created.credit_card, "");
        assert!(!created.has_payment_method());
    }

    #[tokio::test]
    async fn test_card_is_stored_as_sent() {
        let db = memory_db().await;

        let created = client_with_card(&db, " 0000 ").await;

        assert_eq!(created.credit_card, " 0000 ");
        assert!(created.has_payment_method());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let db = memory_db().await;
        let first = client_with_card(&db, "00000").await;
        let second = client_with_card(&db, "22222").await;

        let ids: Vec<i64> = db.clients().list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(db.clients().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;

        db.clients().delete(client.id).await.unwrap();

        assert!(db.clients().get_by_id(client.id).await.unwrap().is_none());
        assert!(matches!(
            db.clients().delete(client.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_parked_client_is_refused() {
        let db = memory_db().await;
        let client = client_with_card(&db, "00000").await;
        let parking = parking_with_places(&db, 2).await;
        let allocator = db.allocator(StayEstimate::default());

        allocator.enter(client.id, parking.id).await.unwrap();

        assert!(matches!(
            db.clients().delete(client.id).await,
            Err(DbError::ReferentialConflict { .. })
        ));
        // Nothing cascaded
        assert!(db.clients().get_by_id(client.id).await.unwrap().is_some());
        assert_eq!(db.client_parkings().count().await.unwrap(), 1);

        // After leaving, the client can go; the history stays
        allocator.exit(client.id, parking.id).await.unwrap();
        db.clients().delete(client.id).await.unwrap();
        assert_eq!(db.parking_log().count().await.unwrap(), 1);
        assert!(db.parkings().get_by_id(parking.id).await.unwrap().is_some());
    }
}
