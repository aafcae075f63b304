//! Workflow error taxonomy. Each variant maps to one HTTP status in the
//! transport layer; none of them trigger retries.

use crate::infra::gateway::GatewayError;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// User-correctable input problem (bad amount or payment mode).
    #[error("{0}")]
    Validation(String),

    /// No gateway credentials were provisioned for this deployment.
    #[error("payment gateway not configured")]
    GatewayUnconfigured,

    /// The remote gateway call failed; surfaced as-is, never retried.
    #[error("payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Supplied payment signature did not match the shared-secret HMAC.
    #[error("payment verification failed")]
    VerificationFailed,

    /// No donation matches the supplied gateway order id.
    #[error("donation record not found")]
    NotFound,

    /// Record store failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
