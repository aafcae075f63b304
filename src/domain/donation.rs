//! Donation records and the derived summary/statistics types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the donor pays. Only these two modes are accepted by the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMode {
    BankTransfer,
    Upi,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::BankTransfer => "bankTransfer",
            PaymentMode::Upi => "upi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bankTransfer" => Some(PaymentMode::BankTransfer),
            "upi" => Some(PaymentMode::Upi),
            _ => None,
        }
    }
}

/// Payment lifecycle. Records are created `Pending` and flipped to `Completed`
/// exactly once by signature verification; there is no reverse transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            _ => None,
        }
    }
}

/// A stored donation. The donor name/email/phone are a snapshot taken from
/// the authenticated user at order-creation time.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct Donation {
    pub id: i64,
    pub user_id: i64,
    /// Amount in rupees as entered by the donor.
    pub amount: f64,
    pub mode: PaymentMode,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub status: PaymentStatus,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new pending donation.
#[derive(Clone, Debug)]
pub struct NewDonation {
    pub user_id: i64,
    pub amount: f64,
    pub mode: PaymentMode,
    pub gateway_order_id: String,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
}

/// Per-user aggregation over all donations. The total only counts completed
/// payments; pending records contribute to the counts alone.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub total_amount: f64,
    pub total_donations: usize,
    pub completed_donations: usize,
    pub pending_donations: usize,
}

impl DonationSummary {
    pub fn from_donations(donations: &[Donation]) -> Self {
        let completed: Vec<&Donation> = donations
            .iter()
            .filter(|d| d.status == PaymentStatus::Completed)
            .collect();
        Self {
            total_amount: completed.iter().map(|d| d.amount).sum(),
            total_donations: donations.len(),
            completed_donations: completed.len(),
            pending_donations: donations.len() - completed.len(),
        }
    }
}

/// Impact statistics derived from a user's completed donations by fixed
/// arithmetic formulas.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorStats {
    pub total_donated: f64,
    pub donations_count: usize,
    pub impact_score: i64,
    pub beneficiaries_helped: i64,
    pub last_updated: DateTime<Utc>,
}

impl DonorStats {
    /// impact score: one point per 1000 donated plus five per donation, capped
    /// at 100; beneficiaries: one per 500 donated plus two per donation.
    pub fn from_completed(total_donated: f64, donations_count: usize) -> Self {
        let count = donations_count as i64;
        let impact_score = ((total_donated / 1000.0).floor() as i64 + count * 5).min(100);
        let beneficiaries_helped = (total_donated / 500.0).floor() as i64 + count * 2;
        Self {
            total_donated,
            donations_count,
            impact_score,
            beneficiaries_helped,
            last_updated: Utc::now(),
        }
    }
}

/// Compact recent-donation view pushed to dashboards.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RecentDonation {
    pub id: i64,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[schema(value_type = String)]
    pub cause: &'static str,
    pub status: PaymentStatus,
}

impl RecentDonation {
    pub fn from_donation(d: &Donation) -> Self {
        Self {
            id: d.id,
            amount: d.amount,
            date: d.created_at,
            // Display-only mapping used by the donor dashboard.
            cause: match d.mode {
                PaymentMode::Upi => "Education",
                PaymentMode::BankTransfer => "Healthcare",
            },
            status: d.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(amount: f64, status: PaymentStatus) -> Donation {
        Donation {
            id: 1,
            user_id: 7,
            amount,
            mode: PaymentMode::Upi,
            gateway_order_id: "order_1".to_string(),
            gateway_payment_id: None,
            gateway_signature: None,
            status,
            donor_name: "A".to_string(),
            donor_email: "a@example.com".to_string(),
            donor_phone: "0000000000".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_counts_pending_but_excludes_from_total() {
        let donations = vec![
            donation(500.0, PaymentStatus::Completed),
            donation(250.0, PaymentStatus::Pending),
            donation(100.0, PaymentStatus::Completed),
        ];
        let summary = DonationSummary::from_donations(&donations);
        assert_eq!(summary.total_amount, 600.0);
        assert_eq!(summary.total_donations, 3);
        assert_eq!(summary.completed_donations, 2);
        assert_eq!(summary.pending_donations, 1);
    }

    #[test]
    fn impact_score_is_capped_at_100() {
        let stats = DonorStats::from_completed(1_000_000.0, 3);
        assert_eq!(stats.impact_score, 100);
        assert_eq!(stats.beneficiaries_helped, 2006);
    }

    #[test]
    fn impact_score_uses_floor_arithmetic() {
        // 2500 / 1000 -> 2 points, plus 2 donations * 5 = 12
        let stats = DonorStats::from_completed(2500.0, 2);
        assert_eq!(stats.impact_score, 12);
        // 2500 / 500 -> 5, plus 2 * 2 = 9
        assert_eq!(stats.beneficiaries_helped, 9);
    }

    #[test]
    fn payment_mode_round_trips_wire_names() {
        assert_eq!(PaymentMode::parse("upi"), Some(PaymentMode::Upi));
        assert_eq!(PaymentMode::parse("bankTransfer"), Some(PaymentMode::BankTransfer));
        assert_eq!(PaymentMode::parse("cash"), None);
        assert_eq!(PaymentMode::Upi.as_str(), "upi");
    }
}
