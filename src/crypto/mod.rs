pub mod signature;

pub use signature::{compute_signature, signature_payload, verify_signature};
