pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{MemoryDonationStore, MemoryUserStore};
pub use postgres::{PgDonationStore, PgUserStore};
pub use store::{DonationStore, NewUser, UserStore};
