//! Derived stats - secondary numbers computed from primary stats, traits and
//! acquired perks.
//!
//! These are NOT stored as truth - the state keeps a cache that is rebuilt
//! after every accepted intent.

use arrayvec::ArrayVec;

use super::attributes::{Attribute, PrimaryStats};
use super::bonus::{Bonus, BonusStack, StatBounds, StatLayer};
use crate::catalog::{Perk, Trait};
use crate::config::RulesConfig;

/// Secondary statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub hit_points: i32,
    pub hit_points_per_level: i32,
    pub armor_class: i32,
    pub action_points: i32,
    pub carry_weight: i32,
    pub melee_damage: i32,
    pub damage_resistance: i32,
    pub poison_resistance: i32,
    pub radiation_resistance: i32,
    pub sequence: i32,
    pub healing_rate: i32,
    pub critical_chance: i32,
    pub party_limit: i32,
    /// Levels between perk points.
    pub perk_rate: i32,
    /// Skill points credited per level-up.
    pub skill_rate: i32,
    pub critical_damage_modifier: i32,
    pub enemy_damage_resistance_modifier: i32,
    /// Percent of the normal chance.
    pub chem_addiction_chance: i32,
    /// Percent of the normal duration.
    pub chem_duration: i32,
    /// Percent of the normal recovery speed.
    pub chem_addiction_recovery: i32,
}

/// Inputs to the base formulas.
///
/// Some traits replace a base formula outright (Small frame carry weight,
/// Fast metabolism resistances, Kamikaze armor class) rather than modifying
/// its result, so the trait set is part of the base.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedInputs {
    pub primary: PrimaryStats,
    pub traits: ArrayVec<Trait, { RulesConfig::MAX_TRAITS }>,
}

impl DerivedInputs {
    pub fn new(primary: PrimaryStats, traits: &[Trait]) -> Self {
        Self {
            primary,
            traits: traits.iter().copied().take(RulesConfig::MAX_TRAITS).collect(),
        }
    }

    fn has(&self, trait_: Trait) -> bool {
        self.traits.contains(&trait_)
    }
}

impl DerivedStats {
    /// Base formulas (before bonuses):
    /// - HP: 15 + ST + 2·EN, per level 2 + EN/2
    /// - AC: AG (Kamikaze 0), AP: 5 + AG/2
    /// - Carry: 25 + 25·ST (Small frame 25 + 15·ST)
    /// - Melee: max(1, ST − 5), Healing: max(1, EN/3)
    /// - Poison 5·EN, Radiation 2·EN (Fast metabolism 0)
    /// - Sequence 2·PE, Crit LK, Party CH/2
    /// - Perk rate 3 (Skilled 4), Skill rate 5 + 2·IN
    fn compute_base(inputs: &DerivedInputs) -> Self {
        let stat = |a: Attribute| inputs.primary.get(a);
        let (st, pe, en, ch, int, ag, lk) = (
            stat(Attribute::Strength),
            stat(Attribute::Perception),
            stat(Attribute::Endurance),
            stat(Attribute::Charisma),
            stat(Attribute::Intelligence),
            stat(Attribute::Agility),
            stat(Attribute::Luck),
        );
        let fast_metabolism = inputs.has(Trait::FastMetabolism);

        Self {
            hit_points: 15 + st + 2 * en,
            hit_points_per_level: 2 + en / 2,
            armor_class: if inputs.has(Trait::Kamikaze) { 0 } else { ag },
            action_points: 5 + ag / 2,
            carry_weight: if inputs.has(Trait::SmallFrame) {
                25 + 15 * st
            } else {
                25 + 25 * st
            },
            melee_damage: (st - 5).max(1),
            damage_resistance: 0,
            poison_resistance: if fast_metabolism { 0 } else { 5 * en },
            radiation_resistance: if fast_metabolism { 0 } else { 2 * en },
            sequence: 2 * pe,
            healing_rate: (en / 3).max(1),
            critical_chance: lk,
            party_limit: ch / 2,
            perk_rate: if inputs.has(Trait::Skilled) { 4 } else { 3 },
            skill_rate: 5 + 2 * int,
            critical_damage_modifier: 0,
            enemy_damage_resistance_modifier: 0,
            chem_addiction_chance: 100,
            chem_duration: 100,
            chem_addiction_recovery: 100,
        }
    }
}

/// Bonuses that apply to derived stats, one stack per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedBonuses {
    pub hit_points: BonusStack,
    pub hit_points_per_level: BonusStack,
    pub armor_class: BonusStack,
    pub action_points: BonusStack,
    pub carry_weight: BonusStack,
    pub melee_damage: BonusStack,
    pub damage_resistance: BonusStack,
    pub poison_resistance: BonusStack,
    pub radiation_resistance: BonusStack,
    pub sequence: BonusStack,
    pub healing_rate: BonusStack,
    pub critical_chance: BonusStack,
    pub party_limit: BonusStack,
    pub perk_rate: BonusStack,
    pub skill_rate: BonusStack,
    pub critical_damage_modifier: BonusStack,
    pub enemy_damage_resistance_modifier: BonusStack,
    pub chem_addiction_chance: BonusStack,
    pub chem_duration: BonusStack,
    pub chem_addiction_recovery: BonusStack,
}

impl DerivedBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gathers trait modifiers and per-rank perk modifiers.
    pub fn collect(traits: &[Trait], perks: impl IntoIterator<Item = (Perk, u32)>) -> Self {
        let mut b = Self::new();

        for trait_ in traits {
            match trait_ {
                Trait::Bruiser => b.action_points.add(Bonus::flat(-2)),
                Trait::Kamikaze => b.sequence.add(Bonus::flat(5)),
                Trait::HeavyHanded => {
                    b.melee_damage.add(Bonus::flat(4));
                    b.critical_damage_modifier.add(Bonus::flat(-30));
                }
                Trait::FastMetabolism => b.healing_rate.add(Bonus::flat(2)),
                Trait::Finesse => {
                    b.critical_chance.add(Bonus::flat(10));
                    b.enemy_damage_resistance_modifier.add(Bonus::flat(30));
                }
                Trait::Skilled => b.skill_rate.add(Bonus::flat(5)),
                Trait::Gifted => b.skill_rate.add(Bonus::flat(-5)),
                Trait::ChemReliant => {
                    b.chem_addiction_chance.add(Bonus::more(100));
                    b.chem_addiction_recovery.add(Bonus::more(100));
                }
                Trait::ChemResistant => {
                    b.chem_addiction_chance.add(Bonus::less(50));
                    b.chem_duration.add(Bonus::less(50));
                }
                _ => {}
            }
        }

        for (perk, ranks) in perks {
            let ranks = ranks as i32;
            match perk {
                Perk::Lifegiver => b.hit_points_per_level.add(Bonus::flat(4 * ranks)),
                Perk::Dodger => b.armor_class.add(Bonus::flat(5)),
                Perk::ActionBoy => b.action_points.add(Bonus::flat(ranks)),
                Perk::StrongBack => b.carry_weight.add(Bonus::flat(50 * ranks)),
                Perk::BonusHthDamage => b.melee_damage.add(Bonus::flat(2 * ranks)),
                Perk::Toughness => b.damage_resistance.add(Bonus::flat(10 * ranks)),
                Perk::Snakeater => b.poison_resistance.add(Bonus::flat(25 * ranks)),
                Perk::RadResistance => b.radiation_resistance.add(Bonus::flat(15 * ranks)),
                Perk::EarlierSequence => b.sequence.add(Bonus::flat(2 * ranks)),
                Perk::FasterHealing => b.healing_rate.add(Bonus::flat(2 * ranks)),
                Perk::MoreCriticals => b.critical_chance.add(Bonus::flat(5 * ranks)),
                Perk::MagneticPersonality => b.party_limit.add(Bonus::flat(1)),
                Perk::Educated => b.skill_rate.add(Bonus::flat(2 * ranks)),
                Perk::BetterCriticals => b.critical_damage_modifier.add(Bonus::flat(20)),
                _ => {}
            }
        }

        b
    }
}

/// Derived stat layer.
///
/// Base: DerivedInputs (primary stats + traits)
/// Bonuses: DerivedBonuses (traits, perks)
/// Final: DerivedStats
impl StatLayer for DerivedStats {
    type Base = DerivedInputs;
    type Bonuses = DerivedBonuses;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        const BOUNDS: StatBounds = StatBounds::DERIVED;
        const FLOOR_ONE: StatBounds = StatBounds::AT_LEAST_ONE;
        const MODIFIER: StatBounds = StatBounds::MODIFIER;

        let s = Self::compute_base(base);

        Self {
            hit_points: bonuses.hit_points.apply(s.hit_points, BOUNDS),
            hit_points_per_level: bonuses
                .hit_points_per_level
                .apply(s.hit_points_per_level, BOUNDS),
            armor_class: bonuses.armor_class.apply(s.armor_class, BOUNDS),
            action_points: bonuses.action_points.apply(s.action_points, BOUNDS),
            carry_weight: bonuses.carry_weight.apply(s.carry_weight, BOUNDS),
            melee_damage: bonuses.melee_damage.apply(s.melee_damage, FLOOR_ONE),
            damage_resistance: bonuses.damage_resistance.apply(s.damage_resistance, BOUNDS),
            poison_resistance: bonuses.poison_resistance.apply(s.poison_resistance, BOUNDS),
            radiation_resistance: bonuses
                .radiation_resistance
                .apply(s.radiation_resistance, BOUNDS),
            sequence: bonuses.sequence.apply(s.sequence, BOUNDS),
            healing_rate: bonuses.healing_rate.apply(s.healing_rate, FLOOR_ONE),
            critical_chance: bonuses.critical_chance.apply(s.critical_chance, BOUNDS),
            party_limit: bonuses.party_limit.apply(s.party_limit, BOUNDS),
            perk_rate: bonuses.perk_rate.apply(s.perk_rate, FLOOR_ONE),
            skill_rate: bonuses.skill_rate.apply(s.skill_rate, BOUNDS),
            critical_damage_modifier: bonuses
                .critical_damage_modifier
                .apply(s.critical_damage_modifier, MODIFIER),
            enemy_damage_resistance_modifier: bonuses
                .enemy_damage_resistance_modifier
                .apply(s.enemy_damage_resistance_modifier, MODIFIER),
            chem_addiction_chance: bonuses
                .chem_addiction_chance
                .apply(s.chem_addiction_chance, BOUNDS),
            chem_duration: bonuses.chem_duration.apply(s.chem_duration, BOUNDS),
            chem_addiction_recovery: bonuses
                .chem_addiction_recovery
                .apply(s.chem_addiction_recovery, BOUNDS),
        }
    }

    fn empty_bonuses() -> Self::Bonuses {
        DerivedBonuses::new()
    }
}
