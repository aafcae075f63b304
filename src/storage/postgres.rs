//! Persistent store implementations using PostgreSQL.

use crate::domain::{Donation, NewDonation, PaymentMode, PaymentStatus, User};
use crate::storage::store::{DonationStore, NewUser, UserStore};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

/// Connects a pool and creates the backing tables if they do not exist.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            api_token TEXT NOT NULL UNIQUE
        )",
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS donations (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL,
            amount DOUBLE PRECISION NOT NULL,
            mode TEXT NOT NULL,
            gateway_order_id TEXT NOT NULL UNIQUE,
            gateway_payment_id TEXT,
            gateway_signature TEXT,
            status TEXT NOT NULL,
            donor_name TEXT NOT NULL,
            donor_email TEXT NOT NULL,
            donor_phone TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

fn donation_from_row(row: &PgRow) -> Result<Donation> {
    let mode_str: String = row.try_get("mode")?;
    let status_str: String = row.try_get("status")?;
    Ok(Donation {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        mode: PaymentMode::parse(&mode_str)
            .ok_or_else(|| anyhow::anyhow!("unknown payment mode in row: {}", mode_str))?,
        gateway_order_id: row.try_get("gateway_order_id")?,
        gateway_payment_id: row.try_get("gateway_payment_id")?,
        gateway_signature: row.try_get("gateway_signature")?,
        status: PaymentStatus::parse(&status_str)
            .ok_or_else(|| anyhow::anyhow!("unknown payment status in row: {}", status_str))?,
        donor_name: row.try_get("donor_name")?,
        donor_email: row.try_get("donor_email")?,
        donor_phone: row.try_get("donor_phone")?,
        created_at: row.try_get("created_at")?,
    })
}

#[derive(Clone)]
pub struct PgDonationStore {
    pool: PgPool,
}

impl PgDonationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for PgDonationStore {
    async fn insert(&self, donation: NewDonation) -> Result<Donation> {
        let row = sqlx::query(
            "INSERT INTO donations
                (user_id, amount, mode, gateway_order_id, status,
                 donor_name, donor_email, donor_phone)
             VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7)
             RETURNING *",
        )
        .bind(donation.user_id)
        .bind(donation.amount)
        .bind(donation.mode.as_str())
        .bind(&donation.gateway_order_id)
        .bind(&donation.donor_name)
        .bind(&donation.donor_email)
        .bind(&donation.donor_phone)
        .fetch_one(&self.pool)
        .await?;
        donation_from_row(&row)
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Donation>> {
        let row = sqlx::query("SELECT * FROM donations WHERE gateway_order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(donation_from_row).transpose()
    }

    async fn mark_completed(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<Donation>> {
        let row = sqlx::query(
            "UPDATE donations
             SET gateway_payment_id = $2, gateway_signature = $3, status = 'completed'
             WHERE gateway_order_id = $1
             RETURNING *",
        )
        .bind(order_id)
        .bind(payment_id)
        .bind(signature)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(donation_from_row).transpose()
    }

    async fn list_by_user(&self, user_id: i64, limit: Option<usize>) -> Result<Vec<Donation>> {
        let rows = match limit {
            Some(limit) => {
                sqlx::query(
                    "SELECT * FROM donations WHERE user_id = $1
                     ORDER BY created_at DESC, id DESC LIMIT $2",
                )
                .bind(user_id)
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT * FROM donations WHERE user_id = $1
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(donation_from_row).collect()
    }

    async fn completed_by_user(&self, user_id: i64) -> Result<Vec<Donation>> {
        let rows = sqlx::query(
            "SELECT * FROM donations WHERE user_id = $1 AND status = 'completed'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(donation_from_row).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        api_token: row.try_get("api_token")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query(
            "INSERT INTO users (full_name, email, phone, api_token)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.api_token)
        .fetch_one(&self.pool)
        .await?;
        user_from_row(&row)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE api_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }
}
