//! # Reservation Store
//!
//! Connection-per-operation access to the reservations table.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

use super::errors::StoreResult;
use super::reservation::Reservation;

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY,
        created_at TEXT NOT NULL,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL,
        guests INTEGER NOT NULL,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        status TEXT NOT NULL,
        email_status TEXT NOT NULL
    )";

/// Datastore handle. Holds only the file path; every operation opens and
/// closes its own connection.
#[derive(Debug, Clone)]
pub struct ReservationStore {
    path: PathBuf,
}

impl ReservationStore {
    /// Create a handle for the datastore at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn connect(&self) -> StoreResult<SqliteConnection> {
        let conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await?;
        Ok(conn)
    }

    /// Idempotently ensure the reservations table exists
    pub async fn init(&self) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query(CREATE_TABLE_SQL).execute(&mut conn).await?;
        Ok(())
    }

    /// Append one reservation row
    pub async fn insert(&self, r: &Reservation) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query(
            "INSERT INTO reservations \
             (id, created_at, name, phone, email, guests, date, time, status, email_status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&r.id)
        .bind(&r.created_at)
        .bind(&r.name)
        .bind(&r.phone)
        .bind(&r.email)
        .bind(r.guests)
        .bind(&r.date)
        .bind(&r.time)
        .bind(&r.status)
        .bind(&r.email_status)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Set the email status for the row matching `id`.
    ///
    /// A no-op when `id` is absent; no existence check is made.
    pub async fn update_email_status(&self, id: &str, status: &str) -> StoreResult<()> {
        let mut conn = self.connect().await?;
        sqlx::query("UPDATE reservations SET email_status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Fetch a reservation by id
    pub async fn get(&self, id: &str) -> StoreResult<Option<Reservation>> {
        let mut conn = self.connect().await?;
        let row = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut conn)
            .await?;
        Ok(row)
    }

    /// List all reservations, oldest first
    pub async fn list(&self) -> StoreResult<Vec<Reservation>> {
        let mut conn = self.connect().await?;
        let rows =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations ORDER BY created_at")
                .fetch_all(&mut conn)
                .await?;
        Ok(rows)
    }
}
