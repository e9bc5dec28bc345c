//! Perk selection and removal.

use crate::catalog::Perk;
use crate::engine::StateReducer;
use crate::error::{RejectionKind, RuleError};
use crate::intent::IntentTransition;
use crate::intent::progress::{LevelUpError, check_level_up};
use crate::state::CharacterState;
use crate::stats::{Attribute, EffectDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PerkError {
    #[error("no perk points left")]
    NoPerkPoints,

    #[error("{0} has no ranks left")]
    NoRanksRemaining(Perk),

    #[error("requirements for {0} are not met")]
    RequirementsNotMet(Perk),

    #[error("{perk} levels up immediately, but: {source}")]
    LevelUpBlocked { perk: Perk, source: LevelUpError },

    #[error("{0} cannot be removed once chosen")]
    Irreversible(Perk),

    #[error("{0} has not been chosen")]
    NotAcquired(Perk),

    #[error("removing {perk} would take {attribute} below {floor}")]
    BelowFloor {
        perk: Perk,
        attribute: Attribute,
        floor: i32,
    },

    #[error("rank ledger for {0} is inconsistent")]
    LedgerInconsistent(Perk),
}

impl RuleError for PerkError {
    fn kind(&self) -> RejectionKind {
        match self {
            Self::NoPerkPoints => RejectionKind::BudgetExhausted,
            Self::NoRanksRemaining(_) | Self::NotAcquired(_) | Self::BelowFloor { .. } => {
                RejectionKind::BoundViolation
            }
            Self::RequirementsNotMet(_) | Self::Irreversible(_) => {
                RejectionKind::PrerequisiteNotMet
            }
            Self::LevelUpBlocked { source, .. } => source.kind(),
            Self::LedgerInconsistent(_) => RejectionKind::Internal,
        }
    }
}

fn check_ledger(state: &CharacterState) -> Result<(), PerkError> {
    match state.perks().rank_violation() {
        Some(perk) => Err(PerkError::LedgerInconsistent(perk)),
        None => Ok(()),
    }
}

/// Spends a perk point on one rank of a perk.
///
/// Side effects: Here and now levels up on the spot, Tag! grants a tag point
/// and the Gain perks raise their attribute by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoosePerk(pub Perk);

impl IntentTransition for ChoosePerk {
    type Error = PerkError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        let perk = self.0;
        if state.perk_points() == 0 {
            return Err(PerkError::NoPerkPoints);
        }
        if state.perks().remaining(perk) == 0 {
            return Err(PerkError::NoRanksRemaining(perk));
        }
        if !state.requirements_met(perk) {
            return Err(PerkError::RequirementsNotMet(perk));
        }
        if perk == Perk::HereAndNow {
            check_level_up(state).map_err(|source| PerkError::LevelUpBlocked { perk, source })?;
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let perk = self.0;
        let level = reducer.state().level();
        if !reducer.perks().take(perk, level) {
            return Err(PerkError::NoRanksRemaining(perk));
        }

        match perk {
            Perk::HereAndNow => {
                // Level-up credits the skill rate of the build as it stands.
                reducer.recompute();
                reducer.progress().level_up();
            }
            Perk::Tag => reducer.progress().grant_tag_point(),
            _ => reducer
                .attributes()
                .apply_perk_effect(perk, EffectDirection::Add),
        }
        Ok(())
    }

    fn post_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        check_ledger(state)
    }
}

/// Gives back the most recent rank of a perk and refunds its point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovePerk(pub Perk);

impl IntentTransition for RemovePerk {
    type Error = PerkError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        let perk = self.0;
        if perk.is_irreversible() {
            return Err(PerkError::Irreversible(perk));
        }
        if state.perk_ranks(perk) == 0 {
            return Err(PerkError::NotAcquired(perk));
        }
        if let Some(attribute) = perk.gained_attribute() {
            let floor = attribute.minimum_floor(state.traits());
            if state.primary().get(attribute) - 1 < floor {
                return Err(PerkError::BelowFloor {
                    perk,
                    attribute,
                    floor,
                });
            }
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        let perk = self.0;
        if !reducer.perks().give_back(perk) {
            return Err(PerkError::NotAcquired(perk));
        }
        reducer
            .attributes()
            .apply_perk_effect(perk, EffectDirection::Remove);
        Ok(())
    }

    fn post_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        check_ledger(state)
    }
}
