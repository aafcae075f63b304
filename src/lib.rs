pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{donor_channel, DonationService, DonorEvent, DonorNotifier, ServiceError};
pub use crypto::{compute_signature, verify_signature};
pub use domain::{Donation, DonationSummary, DonorStats, PaymentMode, PaymentStatus, User};
pub use infra::gateway::{Order, OrderRequest, PaymentGateway, RazorpayClient};
pub use storage::{
    DonationStore, MemoryDonationStore, MemoryUserStore, NewUser, PgDonationStore, PgUserStore,
    UserStore,
};
