use crate::config::RulesConfig;
use crate::engine::StateReducer;
use crate::error::{RejectionKind, RuleError};
use crate::intent::IntentTransition;
use crate::state::CharacterState;
use crate::stats::Attribute;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("no unspent attribute points")]
    NoUnspentPoints,

    #[error("{attribute} is already at {max}")]
    AtMaximum { attribute: Attribute, max: i32 },

    #[error("{attribute} cannot go below {floor}")]
    AtFloor { attribute: Attribute, floor: i32 },
}

impl RuleError for AttributeError {
    fn kind(&self) -> RejectionKind {
        match self {
            Self::NoUnspentPoints => RejectionKind::BudgetExhausted,
            Self::AtMaximum { .. } | Self::AtFloor { .. } => RejectionKind::BoundViolation,
        }
    }
}

/// Spends one unspent point on an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncreaseAttribute(pub Attribute);

impl IntentTransition for IncreaseAttribute {
    type Error = AttributeError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        if state.primary().unspent_points == 0 {
            return Err(AttributeError::NoUnspentPoints);
        }
        if state.primary().get(self.0) >= RulesConfig::ATTRIBUTE_MAX {
            return Err(AttributeError::AtMaximum {
                attribute: self.0,
                max: RulesConfig::ATTRIBUTE_MAX,
            });
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        reducer.attributes().increase(self.0);
        Ok(())
    }
}

/// Returns one point from an attribute to the unspent pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecreaseAttribute(pub Attribute);

impl IntentTransition for DecreaseAttribute {
    type Error = AttributeError;

    fn pre_validate(&self, state: &CharacterState) -> Result<(), Self::Error> {
        let floor = self.0.minimum_floor(state.traits());
        if state.primary().get(self.0) <= floor {
            return Err(AttributeError::AtFloor {
                attribute: self.0,
                floor,
            });
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error> {
        reducer.attributes().decrease(self.0);
        Ok(())
    }
}
