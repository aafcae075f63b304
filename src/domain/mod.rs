pub mod donation;
pub mod user;

pub use donation::{
    Donation, DonationSummary, DonorStats, NewDonation, PaymentMode, PaymentStatus,
    RecentDonation,
};
pub use user::User;
