//! Centralized configuration (environment variables + defaults).
//!
//! Everything is read once at startup in `main`; nothing in the workflow
//! touches the environment directly.

/// Gateway credentials. Absent credentials are not an error: the service
/// starts without a gateway and order creation reports it as unconfigured.
#[derive(Clone, Debug)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
}

pub fn razorpay_config() -> Option<RazorpayConfig> {
    let key_id = std::env::var("RAZORPAY_KEY_ID").ok()?;
    let key_secret = std::env::var("RAZORPAY_KEY_SECRET").ok()?;
    Some(RazorpayConfig { key_id, key_secret })
}

/// Database URL. When unset the service runs on the in-memory store.
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// HTTP listen port (default 3000).
pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000)
}
