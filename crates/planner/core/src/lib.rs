//! Deterministic character-build rules.
//!
//! `planner-core` defines the canonical ruleset (attributes, traits, skills,
//! perks), the character state, and the intents that mutate it. All state
//! mutation flows through [`engine::PlannerEngine`]; base skills and derived
//! stats are recomputed after every accepted intent and never patched.
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod intent;
pub mod state;
pub mod stats;

pub use catalog::{Perk, PerkDef, Skill, Threshold, Trait};
pub use config::RulesConfig;
pub use engine::{
    ExecuteError, ExecutionOutcome, PlannerEngine, StateReducer, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{RejectionKind, RuleError};
pub use intent::{
    AttributeError, ChoosePerk, DecreaseAttribute, IncreaseAttribute, Intent, IntentKind,
    IntentRequest, IntentTransition, LevelUp, LevelUpError, LowerSkill, PerkError, RaiseSkill,
    RemovePerk, RequestError, SkillError, TagError, TagSkill, ToggleTrait, TraitError,
};
pub use state::{
    CharacterState, OfferedPerk, PerkLedger, PerkRow, SnapshotError, TagEntry, TaggedSkills,
};
pub use stats::{
    Attribute, DerivedStats, EffectDirection, PrimaryStats, SkillValues, derive_base_skills,
    skill_cost,
};
