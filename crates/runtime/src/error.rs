//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the command
//! transport so clients can bubble them up with consistent context.
use thiserror::Error;

pub use crate::progress::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("command queue channel closed")]
    QueueChannelClosed,

    #[error("queue worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transport(#[from] client_chain_core::TransportError),

    #[error("navigator requires a transport before building")]
    MissingTransport,

    #[error("navigator requires a scan source before building")]
    MissingScanSource,
}
