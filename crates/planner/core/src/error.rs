//! Common error infrastructure for planner-core.
//!
//! Every engine-level failure is a *rejected intent*: the character state is
//! left exactly as it was. Domain errors (`AttributeError`, `PerkError`, ...)
//! live next to the intents they validate; this module provides the shared
//! classification used by callers that want to reason about rejections
//! without matching on every variant.

/// Category of a rejected intent.
///
/// - **BudgetExhausted**: no attribute, skill, perk or tag points left
/// - **BoundViolation**: attribute at cap/floor, nothing to lower, slots full
/// - **PrerequisiteNotMet**: perk eligibility, level locks, irreversible picks
/// - **UnknownReference**: the request names an unknown skill/perk/trait
/// - **Internal**: a state invariant failed after mutation (a bug)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectionKind {
    BudgetExhausted,
    BoundViolation,
    PrerequisiteNotMet,
    UnknownReference,
    Internal,
}

impl RejectionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetExhausted => "budget_exhausted",
            Self::BoundViolation => "bound_violation",
            Self::PrerequisiteNotMet => "prerequisite_not_met",
            Self::UnknownReference => "unknown_reference",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the rejection points at a bug rather than a user choice.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl core::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all planner-core rule errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify by *why* the intent was refused, not by which intent it was
pub trait RuleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the rejection category of this error.
    fn kind(&self) -> RejectionKind;

    /// Returns a static identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
