//! Player intents and their transitions.
//!
//! Each intent is a small value type implementing [`IntentTransition`]; the
//! engine drives it through `pre_validate → apply → post_validate` and rolls
//! the state back if any phase fails.

pub mod attributes;
pub mod perks;
pub mod progress;
pub mod request;
pub mod skills;
pub mod traits;

pub use attributes::{AttributeError, DecreaseAttribute, IncreaseAttribute};
pub use perks::{ChoosePerk, PerkError, RemovePerk};
pub use progress::{LevelUp, LevelUpError, check_level_up};
pub use request::{IntentKind, IntentRequest, RequestError};
pub use skills::{LowerSkill, RaiseSkill, SkillError, TagError, TagSkill, raise_step};
pub use traits::{ToggleTrait, TraitError};

use crate::engine::StateReducer;
use crate::error::RuleError;
use crate::state::CharacterState;

/// Defines how a concrete intent mutates the character state.
///
/// Validation hooks receive read-only state and must stay side-effect free.
/// `apply` may assume `pre_validate` succeeded, but still reports an error
/// rather than panicking if the reducer refuses the change.
pub trait IntentTransition {
    type Error: RuleError;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &CharacterState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the intent through the state reducer.
    fn apply(&self, reducer: &mut StateReducer<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &CharacterState) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A single player request against the character.
///
/// With the `serde` feature this is encoded as `{ "kind": "...", "target": "..." }`
/// using camelCase kinds, e.g. `{ "kind": "raiseSkill", "target": "small_guns" }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "target", rename_all = "camelCase")
)]
#[strum(serialize_all = "camelCase")]
pub enum Intent {
    IncreaseAttribute(IncreaseAttribute),
    DecreaseAttribute(DecreaseAttribute),
    ToggleTrait(ToggleTrait),
    TagSkill(TagSkill),
    RaiseSkill(RaiseSkill),
    LowerSkill(LowerSkill),
    ChoosePerk(ChoosePerk),
    RemovePerk(RemovePerk),
    LevelUp,
}

impl Intent {
    /// camelCase kind name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::IncreaseAttribute(_) => IntentKind::IncreaseAttribute,
            Intent::DecreaseAttribute(_) => IntentKind::DecreaseAttribute,
            Intent::ToggleTrait(_) => IntentKind::ToggleTrait,
            Intent::TagSkill(_) => IntentKind::TagSkill,
            Intent::RaiseSkill(_) => IntentKind::RaiseSkill,
            Intent::LowerSkill(_) => IntentKind::LowerSkill,
            Intent::ChoosePerk(_) => IntentKind::ChoosePerk,
            Intent::RemovePerk(_) => IntentKind::RemovePerk,
            Intent::LevelUp => IntentKind::LevelUp,
        }
    }
}

impl core::fmt::Display for Intent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Intent::IncreaseAttribute(IncreaseAttribute(a))
            | Intent::DecreaseAttribute(DecreaseAttribute(a)) => {
                write!(f, "{} {}", self.as_str(), a)
            }
            Intent::ToggleTrait(ToggleTrait(t)) => write!(f, "{} {}", self.as_str(), t),
            Intent::TagSkill(TagSkill(s))
            | Intent::RaiseSkill(RaiseSkill(s))
            | Intent::LowerSkill(LowerSkill(s)) => write!(f, "{} {}", self.as_str(), s),
            Intent::ChoosePerk(ChoosePerk(p)) | Intent::RemovePerk(RemovePerk(p)) => {
                write!(f, "{} {}", self.as_str(), p)
            }
            Intent::LevelUp => f.write_str(self.as_str()),
        }
    }
}
