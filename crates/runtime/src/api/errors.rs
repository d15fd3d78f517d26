//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected gameplay requests
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{CastError, ErrorSeverity, GameError, PurchaseError, UnlockError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a spell catalog before building")]
    MissingCatalog,

    #[error("simulation worker stopped before the match ended")]
    OutcomeUnavailable,

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Unlock(#[from] UnlockError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

impl RuntimeError {
    /// Severity of the underlying gameplay error, `None` for plumbing
    /// failures.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Cast(err) => Some(err.severity()),
            Self::Unlock(err) => Some(err.severity()),
            Self::Purchase(err) => Some(err.severity()),
            Self::MissingCatalog => Some(ErrorSeverity::Configuration),
            _ => None,
        }
    }
}
