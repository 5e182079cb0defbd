//! Common types for world command submission.

use serde::{Deserialize, Serialize};

/// Generic transaction identifier.
///
/// Each chain uses its own format, so the identifier is kept as opaque
/// bytes the way session and object IDs are elsewhere in the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// One world-mutating command ready for wire encoding.
///
/// The navigation core renders compound movement commands into the
/// `program` text (e.g. `"move east east up east"`); the transport is
/// responsible for encoding it for its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Acting entity identifier as the chain knows it.
    pub actor: String,

    /// Compound command text.
    pub program: String,
}

impl CommandPayload {
    pub fn new(actor: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            program: program.into(),
        }
    }
}

/// Submission status reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    /// Command is pending inclusion.
    Pending,

    /// Command executed on-chain.
    Confirmed { block_height: u64 },

    /// Command was rejected on-chain.
    Failed { error: String },
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReceipt {
    /// Transaction ID on the chain
    pub transaction_id: TransactionId,

    /// Gas cost in native currency
    pub gas_used: u64,

    /// Submission status
    pub status: CommandStatus,
}
