use async_trait::async_trait;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Buyer, Ticket};
use crate::services::store::PurchaseStore;

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_opts)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jugadores (
            id INTEGER PRIMARY KEY,
            username TEXT,
            first_name TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No uniqueness on charge id: a redelivered webhook adds a second row
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS boletos (
            id TEXT PRIMARY KEY,
            rifa_id TEXT NOT NULL,
            jugador_id INTEGER NOT NULL,
            numero_comprado TEXT NOT NULL,
            telegram_payment_charge_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(jugador_id) REFERENCES jugadores(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Purchase store over a local SQLite database.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseStore for SqliteStore {
    async fn upsert_buyer(&self, buyer: &Buyer) -> Result<(), StoreError> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO jugadores (id, username, first_name, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                updated_at = excluded.updated_at"
        )
        .bind(buyer.id)
        .bind(&buyer.username)
        .bind(&buyer.first_name)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_ticket(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO boletos (id, rifa_id, jugador_id, numero_comprado, telegram_payment_charge_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&ticket.raffle_id)
        .bind(ticket.buyer_id)
        .bind(&ticket.purchased_number)
        .bind(&ticket.payment_charge_id)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
