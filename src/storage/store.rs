//! Record store contracts.
//!
//! The workflow only talks to these traits; `postgres.rs` provides the
//! durable implementation and `memory.rs` the in-process one used by tests
//! and by local runs without a `DATABASE_URL`.

use crate::domain::{Donation, NewDonation, User};
use async_trait::async_trait;

#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Persists a new donation in `pending` status and returns the stored
    /// record with its assigned id.
    async fn insert(&self, donation: NewDonation) -> anyhow::Result<Donation>;

    /// Looks a donation up by its gateway order id.
    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<Donation>>;

    /// Records the gateway payment id and signature and flips the status to
    /// `completed`. Returns the updated record, or `None` when no donation
    /// matches the order id. This is the only status mutation in the system.
    async fn mark_completed(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> anyhow::Result<Option<Donation>>;

    /// All donations for a user, newest first, optionally capped.
    async fn list_by_user(
        &self,
        user_id: i64,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<Donation>>;

    /// Completed donations for a user (order unspecified; used for
    /// aggregation only).
    async fn completed_by_user(&self, user_id: i64) -> anyhow::Result<Vec<Donation>>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> anyhow::Result<()>;
}

/// Insert payload for a user record.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub api_token: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> anyhow::Result<User>;

    /// Resolves a bearer token to its user, if any.
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>>;
}
