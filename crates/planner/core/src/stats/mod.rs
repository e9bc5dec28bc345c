//! Stat system.
//!
//! ```text
//! [ PrimaryStats ]  player-allocated, the only stored attribute data
//!      ↓
//! [ Base skills ]   formula table + trait/tag/perk bonuses
//!      ↓ (+ raised points = final skills)
//! [ Derived stats ] formula table + trait/perk bonuses
//! ```
//!
//! Both computed layers are pure functions of the stored inputs and are
//! recomputed in full after every accepted intent.
//!
//! ## Bonus Stack
//!
//! All layers use the same calculation order:
//! `Flat → More → Less → Clamp`

pub mod attributes;
pub mod bonus;
pub mod derived;
pub mod skills;

pub use attributes::{Attribute, EffectDirection, PrimaryStats};
pub use bonus::{Bonus, BonusStack, StatBounds, StatLayer};
pub use derived::{DerivedBonuses, DerivedInputs, DerivedStats};
pub use skills::{BaseSkills, SkillBonuses, SkillValues, derive_base_skills, skill_cost};
