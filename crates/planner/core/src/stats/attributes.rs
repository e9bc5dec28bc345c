//! Primary attributes - the player-allocated foundation of every other number.
//!
//! `PrimaryStats` is the only attribute storage. Skills and derived stats are
//! recomputed from it and never written back.

use crate::catalog::Trait;
use crate::config::RulesConfig;

/// The seven primary attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Attribute {
    Strength = 0,
    Perception = 1,
    Endurance = 2,
    Charisma = 3,
    Intelligence = 4,
    Agility = 5,
    Luck = 6,
}

impl Attribute {
    pub const COUNT: usize = 7;

    /// All attributes in display order.
    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Strength,
        Attribute::Perception,
        Attribute::Endurance,
        Attribute::Charisma,
        Attribute::Intelligence,
        Attribute::Agility,
        Attribute::Luck,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Perception => "Perception",
            Attribute::Endurance => "Endurance",
            Attribute::Charisma => "Charisma",
            Attribute::Intelligence => "Intelligence",
            Attribute::Agility => "Agility",
            Attribute::Luck => "Luck",
        }
    }

    /// Flavor description for an attribute value.
    pub const fn describe(value: i32) -> &'static str {
        match value {
            1 => "Very bad",
            2 => "Bad",
            3 => "Poor",
            4 => "Fair",
            5 => "Average",
            6 => "Good",
            7 => "Very good",
            8 => "Great",
            9 => "Excellent",
            10..=13 => "Heroic",
            _ => "Undefined",
        }
    }

    /// Lowest value this attribute may be lowered to with the given traits.
    ///
    /// The floor is 1, raised to 2 by Gifted; Bruiser adds 2 on strength and
    /// Small frame adds 1 on agility, mirroring the boosts those traits grant.
    pub fn minimum_floor(&self, traits: &[Trait]) -> i32 {
        let mut floor = RulesConfig::ATTRIBUTE_MIN;
        if traits.contains(&Trait::Gifted) {
            floor += 1;
        }
        match self {
            Attribute::Strength if traits.contains(&Trait::Bruiser) => floor + 2,
            Attribute::Agility if traits.contains(&Trait::SmallFrame) => floor + 1,
            _ => floor,
        }
    }
}

/// Direction of a reversible effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectDirection {
    Add,
    Remove,
}

impl EffectDirection {
    pub const fn sign(&self) -> i32 {
        match self {
            EffectDirection::Add => 1,
            EffectDirection::Remove => -1,
        }
    }
}

/// Primary attribute values plus the unspent allocation budget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimaryStats {
    values: [i32; Attribute::COUNT],
    pub unspent_points: u32,
}

impl PrimaryStats {
    pub fn new(values: [i32; Attribute::COUNT], unspent_points: u32) -> Self {
        Self {
            values,
            unspent_points,
        }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(
            [config.starting_attribute; Attribute::COUNT],
            config.starting_unspent_points,
        )
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        self.values[attribute as usize]
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        self.values[attribute.index()] = value;
    }

    /// Shifts an attribute by `delta` without bounds checks.
    ///
    /// Callers own validation; trait and perk effects rely on this being an
    /// exact inverse of itself.
    pub fn shift(&mut self, attribute: Attribute, delta: i32) {
        self.values[attribute.index()] += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::ALL.iter().map(move |&a| (a, self.get(a)))
    }

    /// Returns the first attribute outside the nominal [1, 10] range.
    pub fn out_of_range(&self) -> Option<(Attribute, i32)> {
        self.iter().find(|(_, value)| {
            !(RulesConfig::ATTRIBUTE_MIN..=RulesConfig::ATTRIBUTE_MAX).contains(value)
        })
    }

    /// Attribute deltas a trait applies while selected.
    pub fn trait_effect(trait_: Trait) -> &'static [(Attribute, i32)] {
        const ALL_PLUS_ONE: [(Attribute, i32); Attribute::COUNT] = [
            (Attribute::Strength, 1),
            (Attribute::Perception, 1),
            (Attribute::Endurance, 1),
            (Attribute::Charisma, 1),
            (Attribute::Intelligence, 1),
            (Attribute::Agility, 1),
            (Attribute::Luck, 1),
        ];

        match trait_ {
            Trait::SmallFrame => &[(Attribute::Agility, 1)],
            Trait::Gifted => &ALL_PLUS_ONE,
            Trait::Bruiser => &[(Attribute::Strength, 2)],
            _ => &[],
        }
    }

    pub fn apply_trait_effect(&mut self, trait_: Trait, direction: EffectDirection) {
        for &(attribute, delta) in Self::trait_effect(trait_) {
            self.shift(attribute, delta * direction.sign());
        }
    }
}

impl Default for PrimaryStats {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default())
    }
}
