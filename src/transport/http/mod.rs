pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod donation;
    pub mod health;
    pub mod ws;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
