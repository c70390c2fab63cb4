//! Transport seam for the verification backend

use async_trait::async_trait;

use crate::errors::RawError;

use super::types::ContinuationToken;

/// Verification and resend calls supplied by the caller
#[async_trait]
pub trait VerificationTransport: Send + Sync {
    /// Check a complete code, returning the token that continues recovery
    async fn verify(&self, code: &str) -> Result<ContinuationToken, RawError>;
    /// Ask the backend to deliver a fresh code
    async fn resend(&self) -> Result<(), RawError>;
}
