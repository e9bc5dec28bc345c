//! Error types for the intent execution pipeline.

use crate::error::{RejectionKind, RuleError};
use crate::intent::{
    AttributeError, LevelUpError, PerkError, RequestError, SkillError, TagError, TraitError,
};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Reasons an intent was rejected. The state is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("attribute intent rejected: {0}")]
    Attribute(TransitionPhaseError<AttributeError>),

    #[error("trait intent rejected: {0}")]
    Trait(TransitionPhaseError<TraitError>),

    #[error("tag intent rejected: {0}")]
    Tag(TransitionPhaseError<TagError>),

    #[error("skill intent rejected: {0}")]
    Skill(TransitionPhaseError<SkillError>),

    #[error("perk intent rejected: {0}")]
    Perk(TransitionPhaseError<PerkError>),

    #[error("level up rejected: {0}")]
    LevelUp(TransitionPhaseError<LevelUpError>),

    #[error("unknown reference: {0}")]
    UnknownReference(#[from] RequestError),
}

impl ExecuteError {
    /// Phase that failed, if the intent reached the pipeline at all.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Attribute(e) => Some(e.phase),
            Self::Trait(e) => Some(e.phase),
            Self::Tag(e) => Some(e.phase),
            Self::Skill(e) => Some(e.phase),
            Self::Perk(e) => Some(e.phase),
            Self::LevelUp(e) => Some(e.phase),
            Self::UnknownReference(_) => None,
        }
    }

    fn rule_error(&self) -> &dyn RuleError {
        match self {
            Self::Attribute(e) => &e.error,
            Self::Trait(e) => &e.error,
            Self::Tag(e) => &e.error,
            Self::Skill(e) => &e.error,
            Self::Perk(e) => &e.error,
            Self::LevelUp(e) => &e.error,
            Self::UnknownReference(e) => e,
        }
    }
}

impl RuleError for ExecuteError {
    fn kind(&self) -> RejectionKind {
        self.rule_error().kind()
    }

    fn error_code(&self) -> &'static str {
        self.rule_error().error_code()
    }
}
