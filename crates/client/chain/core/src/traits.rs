//! Transport abstraction trait.
//!
//! A transport is pure submission infrastructure: it encodes one command,
//! sends it, and reports the outcome. Everything game-shaped (planning,
//! queueing, gating) stays above this layer.

use async_trait::async_trait;

use crate::types::{CommandPayload, CommandReceipt};

/// Transport layer errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Insufficient gas: required {required}, available {available}")]
    InsufficientGas { required: u64, available: u64 },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// World command submission interface.
///
/// Implementations must be safe to share behind an `Arc` across the queue
/// worker and any diagnostic tasks.
#[async_trait]
pub trait WorldTransport: Send + Sync {
    /// Submit one command and wait for its receipt.
    async fn submit(&self, payload: CommandPayload) -> Result<CommandReceipt, TransportError>;

    /// Health check: verify connection to the chain.
    async fn health_check(&self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Get the transport name (e.g. "Sui", "Ethereum", "MockWorld").
    fn name(&self) -> &str;
}
