//! Action errors.
//!
//! Errors raised while validating casts and shop purchases. All of them are
//! detected before any state is mutated.

use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Cast Errors
// ============================================================================

/// Errors that can occur when beginning a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    /// The side may not act right now (not its turn, or the match is over).
    #[error("casting is disabled")]
    CastingDisabled,

    /// A previous cast is still waiting for engagement range.
    #[error("an action is already pending")]
    ActionPending,

    /// Spell is neither the default action nor unlocked.
    #[error("unknown action")]
    UnknownAction,

    /// No target selected, or the selected NPC is respawning.
    #[error("no valid target")]
    NoTarget,

    /// Not enough resource to pay the spell's cost.
    #[error("insufficient resource: need {required}, have {available}")]
    InsufficientResource { required: u32, available: u32 },
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CastingDisabled | Self::ActionPending | Self::InsufficientResource { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownAction | Self::NoTarget => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CastingDisabled => "CAST_CASTING_DISABLED",
            Self::ActionPending => "CAST_ACTION_PENDING",
            Self::UnknownAction => "CAST_UNKNOWN_ACTION",
            Self::NoTarget => "CAST_NO_TARGET",
            Self::InsufficientResource { .. } => "CAST_INSUFFICIENT_RESOURCE",
        }
    }
}

// ============================================================================
// Purchase Errors
// ============================================================================

/// Errors that can occur when buying an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PurchaseError {
    #[error("casting is disabled")]
    CastingDisabled,

    #[error("insufficient gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },
}

impl GameError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CastingDisabled => "PURCHASE_CASTING_DISABLED",
            Self::InsufficientGold { .. } => "PURCHASE_INSUFFICIENT_GOLD",
        }
    }
}
