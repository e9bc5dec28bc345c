use crate::engine::StateReducer;
use crate::error::{RejectionKind, RuleError};
use crate::intent::IntentTransition;
use crate::state::CharacterState;
use crate::stats::Attribute;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelUpError {
    #[error("{0} attribute points are still unspent")]
    UnspentAttributePoints(u32),

    #[error("{0} tag points are still unspent")]
    UnspentTagPoints(u32),

    #[error("{attribute} is {value}, outside the allowed range")]
    AttributeOutOfRange { attribute: Attribute, value: i32 },
}

impl RuleError for LevelUpError {
    fn kind(&self) -> RejectionKind {
        RejectionKind::PrerequisiteNotMet
    }
}

/// Checks whether the character may advance a level right now.
pub fn check_level_up(state: &CharacterState) -> Result<(), LevelUpError> {
    let unspent = state.primary().unspent_points;
    if unspent != 0 {
        return Err(LevelUpError::UnspentAttributePoints(unspent));
    }
    if state.tag_points() != 0 {
        return Err(LevelUpError::UnspentTagPoints(state.tag_points()));
    }
    if let Some((attribute, value)) = state.primary().out_of_range() {
        return Err(LevelUpError::AttributeOutOfRange { attribute, value });
    }
    Ok(())
}

/// Advances one level, crediting the current skill rate and, every
/// `perk_rate` levels, a perk point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp;

impl IntentTransition for LevelUp {
    type Error = LevelUpError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        check_level_up(state)
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        reducer.progress().level_up();
        Ok(())
    }
}
