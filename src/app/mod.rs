pub mod donation_service;
pub mod error;
pub mod notify;

pub use donation_service::{DonationService, OrderConfirmation};
pub use error::ServiceError;
pub use notify::{donor_channel, DonorEvent, DonorNotifier};
