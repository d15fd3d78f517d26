use crate::error::{ErrorSeverity, GameError};

/// Reasons a skill unlock or upgrade is rejected.
///
/// Every variant is raised before the ledger is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockError {
    /// Default actions are always unlocked and cannot be upgraded.
    #[error("default action cannot be unlocked or upgraded")]
    DefaultSkillProtected,

    /// The spell has no catalog entry.
    #[error("unknown action")]
    UnknownAction,

    /// The spell is locked and none of its prerequisites is unlocked.
    #[error("no prerequisite is unlocked")]
    PrerequisiteNotMet,

    /// Fewer skill points than the unlock costs.
    #[error("insufficient skill points: need {required}, have {available}")]
    InsufficientSkillPoints { required: u32, available: u32 },
}

impl GameError for UnlockError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientSkillPoints { .. } | Self::PrerequisiteNotMet => {
                ErrorSeverity::Recoverable
            }
            Self::DefaultSkillProtected | Self::UnknownAction => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DefaultSkillProtected => "UNLOCK_DEFAULT_SKILL_PROTECTED",
            Self::UnknownAction => "UNLOCK_UNKNOWN_ACTION",
            Self::PrerequisiteNotMet => "UNLOCK_PREREQUISITE_NOT_MET",
            Self::InsufficientSkillPoints { .. } => "UNLOCK_INSUFFICIENT_SKILL_POINTS",
        }
    }
}
