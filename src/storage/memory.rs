//! In-memory store implementations.
//!
//! Backed by `tokio::sync::RwLock`; ids are assigned from a counter held
//! under the same lock so inserts never race on an id.

use crate::domain::{Donation, NewDonation, PaymentStatus, User};
use crate::storage::store::{DonationStore, NewUser, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryDonationStore {
    inner: RwLock<DonationTable>,
}

#[derive(Default)]
struct DonationTable {
    next_id: i64,
    rows: Vec<Donation>,
}

impl MemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationStore for MemoryDonationStore {
    async fn insert(&self, donation: NewDonation) -> anyhow::Result<Donation> {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let row = Donation {
            id: table.next_id,
            user_id: donation.user_id,
            amount: donation.amount,
            mode: donation.mode,
            gateway_order_id: donation.gateway_order_id,
            gateway_payment_id: None,
            gateway_signature: None,
            status: PaymentStatus::Pending,
            donor_name: donation.donor_name,
            donor_email: donation.donor_email,
            donor_phone: donation.donor_phone,
            created_at: Utc::now(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<Donation>> {
        let table = self.inner.read().await;
        Ok(table
            .rows
            .iter()
            .find(|d| d.gateway_order_id == order_id)
            .cloned())
    }

    async fn mark_completed(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> anyhow::Result<Option<Donation>> {
        let mut table = self.inner.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|d| d.gateway_order_id == order_id);
        Ok(row.map(|d| {
            d.gateway_payment_id = Some(payment_id.to_string());
            d.gateway_signature = Some(signature.to_string());
            d.status = PaymentStatus::Completed;
            d.clone()
        }))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<Donation>> {
        let table = self.inner.read().await;
        let mut rows: Vec<Donation> = table
            .rows
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; ids are monotonic so they break created_at ties.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn completed_by_user(&self, user_id: i64) -> anyhow::Result<Vec<Donation>> {
        let table = self.inner.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|d| d.user_id == user_id && d.status == PaymentStatus::Completed)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<UserTable>,
}

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: Vec<User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<User> {
        let mut table = self.inner.write().await;
        if table.rows.iter().any(|u| u.api_token == user.api_token) {
            return Err(anyhow::anyhow!("api token already in use"));
        }
        table.next_id += 1;
        let row = User {
            id: table.next_id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            api_token: user.api_token,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let table = self.inner.read().await;
        Ok(table.rows.iter().find(|u| u.api_token == token).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        let table = self.inner.read().await;
        Ok(table.rows.iter().find(|u| u.id == user_id).cloned())
    }
}
