//! Untyped intent requests.
//!
//! Collaborators that speak strings (a UI, a config file, a test script) send
//! `{ kind, target }` pairs. Parsing them is where unknown skill, perk, trait
//! or attribute names are caught.

use crate::catalog::{Perk, Skill, Trait};
use crate::error::{RejectionKind, RuleError};
use crate::intent::{
    ChoosePerk, DecreaseAttribute, IncreaseAttribute, Intent, LowerSkill, RaiseSkill, RemovePerk,
    TagSkill, ToggleTrait,
};
use crate::stats::Attribute;

/// Intent discriminant, parsed case-insensitively from its camelCase name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum IntentKind {
    IncreaseAttribute,
    DecreaseAttribute,
    ToggleTrait,
    TagSkill,
    RaiseSkill,
    LowerSkill,
    ChoosePerk,
    RemovePerk,
    LevelUp,
}

impl IntentKind {
    pub const fn needs_target(&self) -> bool {
        !matches!(self, IntentKind::LevelUp)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestError {
    #[error("unknown intent kind `{0}`")]
    UnknownKind(String),

    #[error("{0} needs a target")]
    MissingTarget(IntentKind),

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("unknown trait `{0}`")]
    UnknownTrait(String),

    #[error("unknown skill `{0}`")]
    UnknownSkill(String),

    #[error("unknown perk `{0}`")]
    UnknownPerk(String),
}

impl RuleError for RequestError {
    fn kind(&self) -> RejectionKind {
        RejectionKind::UnknownReference
    }
}

/// A loosely typed intent as received from a collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentRequest {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<String>,
}

impl IntentRequest {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: Some(target.into()),
        }
    }

    pub fn level_up() -> Self {
        Self {
            kind: IntentKind::LevelUp.to_string(),
            target: None,
        }
    }

    pub fn parse(&self) -> Result<Intent, RequestError> {
        let kind: IntentKind = self
            .kind
            .trim()
            .parse()
            .map_err(|_| RequestError::UnknownKind(self.kind.clone()))?;

        let target = match (&self.target, kind.needs_target()) {
            (_, false) => return Ok(Intent::LevelUp),
            (Some(target), true) => target.as_str(),
            (None, true) => return Err(RequestError::MissingTarget(kind)),
        };

        let attribute = || {
            target
                .trim()
                .parse::<Attribute>()
                .map_err(|_| RequestError::UnknownAttribute(target.to_owned()))
        };
        let trait_ = || {
            Trait::lookup(target).ok_or_else(|| RequestError::UnknownTrait(target.to_owned()))
        };
        let skill = || {
            Skill::lookup(target).ok_or_else(|| RequestError::UnknownSkill(target.to_owned()))
        };
        let perk = || {
            Perk::lookup(target).ok_or_else(|| RequestError::UnknownPerk(target.to_owned()))
        };

        Ok(match kind {
            IntentKind::IncreaseAttribute => {
                Intent::IncreaseAttribute(IncreaseAttribute(attribute()?))
            }
            IntentKind::DecreaseAttribute => {
                Intent::DecreaseAttribute(DecreaseAttribute(attribute()?))
            }
            IntentKind::ToggleTrait => Intent::ToggleTrait(ToggleTrait(trait_()?)),
            IntentKind::TagSkill => Intent::TagSkill(TagSkill(skill()?)),
            IntentKind::RaiseSkill => Intent::RaiseSkill(RaiseSkill(skill()?)),
            IntentKind::LowerSkill => Intent::LowerSkill(LowerSkill(skill()?)),
            IntentKind::ChoosePerk => Intent::ChoosePerk(ChoosePerk(perk()?)),
            IntentKind::RemovePerk => Intent::RemovePerk(RemovePerk(perk()?)),
            IntentKind::LevelUp => Intent::LevelUp,
        })
    }
}

impl TryFrom<&IntentRequest> for Intent {
    type Error = RequestError;

    fn try_from(request: &IntentRequest) -> Result<Self, Self::Error> {
        request.parse()
    }
}
