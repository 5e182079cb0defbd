//! Chain-agnostic abstraction for submitting world-mutating commands.
//!
//! Wire encoding and the concrete chain client live behind
//! [`WorldTransport`]; this crate only defines the contract plus an
//! in-memory mock for tests and dry runs.

pub mod mock;
pub mod traits;
pub mod types;

pub use mock::MockWorldClient;
pub use traits::{TransportError, WorldTransport};
pub use types::{CommandPayload, CommandReceipt, CommandStatus, TransactionId};
