//! The donation workflow.
//!
//! Orchestrates the four-step payment path:
//! 1.  Validate donor input.
//! 2.  Create a remote order at the payment gateway.
//! 3.  Persist a `pending` donation record referencing the order.
//! 4.  Later, verify the gateway's payment signature, mark the donation
//!     `completed` and fan the status change out to the donor's channel.
//!
//! There are no retries and no partial rollback: if persisting the pending
//! record fails after the remote order was created, the order id is logged
//! for manual reconciliation and the error is surfaced.

use crate::app::error::ServiceError;
use crate::app::notify::{self, DonorNotifier};
use crate::domain::{
    Donation, DonationSummary, DonorStats, NewDonation, PaymentMode, RecentDonation, User,
};
use crate::infra::gateway::{OrderRequest, PaymentGateway};
use crate::storage::DonationStore;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

/// Minimum accepted donation, in rupees.
const MIN_AMOUNT: f64 = 1.0;
const CURRENCY: &str = "INR";
/// How many entries the recent-donations dashboard view returns.
const RECENT_LIMIT: usize = 5;

/// What the caller needs to hand to the browser checkout widget, plus an
/// echo of the entered details for client-side confirmation.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    /// Amount actually charged, in paise.
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub details: OrderDetails,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub entered_amount: f64,
    pub mode: PaymentMode,
    pub donor_name: String,
    pub donor_email: String,
}

pub struct DonationService {
    donations: Arc<dyn DonationStore>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    notifier: Arc<DonorNotifier>,
}

impl DonationService {
    pub fn new(
        donations: Arc<dyn DonationStore>,
        gateway: Option<Arc<dyn PaymentGateway>>,
        notifier: Arc<DonorNotifier>,
    ) -> Self {
        Self {
            donations,
            gateway,
            notifier,
        }
    }

    fn gateway(&self) -> Result<&Arc<dyn PaymentGateway>, ServiceError> {
        self.gateway.as_ref().ok_or(ServiceError::GatewayUnconfigured)
    }

    /// Creates a gateway order for `amount` rupees and persists the pending
    /// donation. `mode` arrives as the wire string so unknown modes get the
    /// same validation error as out-of-range amounts.
    pub async fn create_order(
        &self,
        user: &User,
        amount: f64,
        mode: &str,
    ) -> Result<OrderConfirmation, ServiceError> {
        let mode = PaymentMode::parse(mode).ok_or_else(|| {
            ServiceError::Validation("Only bankTransfer and upi are supported".to_string())
        })?;
        if !amount.is_finite() || amount < MIN_AMOUNT {
            return Err(ServiceError::Validation(
                "Amount must be at least 1".to_string(),
            ));
        }
        let gateway = self.gateway()?;

        // Razorpay expects the amount in paise.
        let amount_paise = (amount * 100.0).round() as i64;
        let donor_name = user.donor_name().to_string();

        let order = gateway
            .create_order(OrderRequest {
                amount: amount_paise,
                currency: CURRENCY.to_string(),
                receipt: new_receipt_id(),
                notes: json!({
                    "userId": user.id.to_string(),
                    "modeofDonation": mode.as_str(),
                    "donorName": donor_name,
                    "donorEmail": user.email,
                }),
            })
            .await?;

        let pending = NewDonation {
            user_id: user.id,
            amount,
            mode,
            gateway_order_id: order.id.clone(),
            donor_name: donor_name.clone(),
            donor_email: user.email.clone(),
            donor_phone: user.phone.clone(),
        };
        if let Err(e) = self.donations.insert(pending).await {
            // The remote order now has no local record; log it so it can be
            // reconciled by hand.
            eprintln!(
                "> DonationService: orphaned gateway order {} (persist failed: {})",
                order.id, e
            );
            return Err(ServiceError::Store(e));
        }

        Ok(OrderConfirmation {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: gateway.key_id().to_string(),
            details: OrderDetails {
                entered_amount: amount,
                mode,
                donor_name,
                donor_email: user.email.clone(),
            },
        })
    }

    /// Verifies a gateway payment confirmation and completes the donation.
    ///
    /// The signature is checked before any store lookup, so an unknown order
    /// with a forged signature reports `VerificationFailed`, not `NotFound`.
    /// Re-verifying an already-completed donation re-persists the same state.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<Donation, ServiceError> {
        let gateway = self.gateway()?;
        if !gateway.verify_signature(order_id, payment_id, signature) {
            return Err(ServiceError::VerificationFailed);
        }

        let donation = self
            .donations
            .mark_completed(order_id, payment_id, signature)
            .await?
            .ok_or(ServiceError::NotFound)?;

        // Fire-and-forget; delivery failures never fail the workflow.
        self.notifier
            .publish(
                donation.user_id,
                notify::DONATION_COMPLETED,
                json!({
                    "donationId": donation.id,
                    "amount": donation.amount,
                    "status": donation.status.as_str(),
                }),
            )
            .await;

        Ok(donation)
    }

    /// All of the user's donations (newest first) plus the aggregate summary.
    pub async fn user_donations(
        &self,
        user: &User,
    ) -> Result<(Vec<Donation>, DonationSummary), ServiceError> {
        let donations = self.donations.list_by_user(user.id, None).await?;
        let summary = DonationSummary::from_donations(&donations);
        Ok((donations, summary))
    }

    /// Impact statistics over the user's completed donations.
    pub async fn donor_stats(&self, user: &User) -> Result<DonorStats, ServiceError> {
        let completed = self.donations.completed_by_user(user.id).await?;
        let total: f64 = completed.iter().map(|d| d.amount).sum();
        Ok(DonorStats::from_completed(total, completed.len()))
    }

    /// The user's latest donations in the compact dashboard shape.
    pub async fn recent_donations(&self, user: &User) -> Result<Vec<RecentDonation>, ServiceError> {
        let donations = self
            .donations
            .list_by_user(user.id, Some(RECENT_LIMIT))
            .await?;
        Ok(donations.iter().map(RecentDonation::from_donation).collect())
    }
}

/// Random receipt id. Wall-clock receipts collide under concurrent order
/// creation; a 16-char alphanumeric nonce does not.
fn new_receipt_id() -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("donation_{}", nonce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_ids_are_prefixed_and_distinct() {
        let a = new_receipt_id();
        let b = new_receipt_id();
        assert!(a.starts_with("donation_"));
        assert_eq!(a.len(), "donation_".len() + 16);
        assert_ne!(a, b);
    }
}
