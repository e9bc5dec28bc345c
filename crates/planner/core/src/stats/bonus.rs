//! Bonus application shared by the skill and derived-stat layers.
//!
//! Traits and perks never patch a computed number in place. They contribute
//! bonuses to a stack, and the stack is applied to a freshly computed base:
//! Flat → More → Less → Clamp.

/// A single modifier contributed by a trait or perk.
///
/// - **Flat**: additive, summed first (e.g. Gifted −10 on every skill)
/// - **More**: sequential multiplier, stored as percent (100 = ×2)
/// - **Less**: sequential reduction, stored as percent (50 = ×0.5)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    More(i32),
    Less(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: i32) -> Self {
        Bonus::Less(percent)
    }
}

/// Bonuses gathered for one stat, applied in a fixed order.
///
/// # Example
/// ```
/// # use planner_core::stats::bonus::{Bonus, BonusStack, StatBounds};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(-10));   // Gifted
/// stack.add(Bonus::flat(20));    // tagged at creation
///
/// assert_eq!(stack.apply(25, StatBounds::SKILL), 35);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Fluent form of [`add`](Self::add).
    pub fn with(mut self, bonus: Bonus) -> Self {
        self.add(bonus);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// ```text
    /// result = clamp((base + Σflat) × Π(1 + more) × Π(1 − less), bounds)
    /// ```
    ///
    /// Multipliers truncate toward zero after each step.
    pub fn apply(&self, base: i32, bounds: StatBounds) -> i32 {
        let flat: i32 = self
            .bonuses
            .iter()
            .map(|bonus| match bonus {
                Bonus::Flat(value) => *value,
                _ => 0,
            })
            .sum();

        let mut value = base + flat;
        for bonus in &self.bonuses {
            if let Bonus::More(percent) = bonus {
                value = value * (100 + percent) / 100;
            }
        }
        for bonus in &self.bonuses {
            if let Bonus::Less(percent) = bonus {
                value = value * (100 - percent) / 100;
            }
        }

        value.clamp(bounds.min, bounds.max)
    }
}

/// Trait for stat layers that follow the Base -> Bonuses -> Final pattern.
///
/// ```text
/// Skills:  PrimaryStats + SkillBonuses   -> SkillValues (base skills)
/// Derived: PrimaryStats + DerivedBonuses -> DerivedStats
/// ```
///
/// Both layers are recomputed in full on every state change; neither keeps
/// state of its own.
pub trait StatLayer {
    type Base;
    type Bonuses;
    type Final;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final;

    fn empty_bonuses() -> Self::Bonuses;

    /// Compute with no trait or perk contributions.
    fn from_base(base: &Self::Base) -> Self::Final {
        Self::compute(base, &Self::empty_bonuses())
    }
}

/// Clamp bounds for a stat calculation.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Skill percentages never go negative.
    pub const SKILL: Self = Self {
        min: 0,
        max: i32::MAX,
    };

    /// Non-negative derived values (hit points, resistances, rates).
    pub const DERIVED: Self = Self { min: 0, max: 9999 };

    /// Signed percentage modifiers (critical damage, enemy DR).
    pub const MODIFIER: Self = Self {
        min: -100,
        max: 100,
    };

    /// Quantities with a floor of one (melee damage, healing rate).
    pub const AT_LEAST_ONE: Self = Self { min: 1, max: 9999 };
}
