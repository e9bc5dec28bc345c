//! Static rule content: traits, skills and perks.
//!
//! Everything here is data; no catalog type holds character state.

pub mod perks;
pub mod skills;
pub mod traits;

pub use perks::{Perk, PerkDef, Threshold};
pub use skills::{Skill, SkillFormula};
pub use traits::Trait;
