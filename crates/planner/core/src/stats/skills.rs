//! Skill layer: base skill derivation and the raise cost table.
//!
//! Base skills are a derived cache. They are rebuilt from primary stats,
//! traits, creation tags and acquired perks on every change and never patched
//! in place; player investment lives separately in the raised values.

use super::attributes::PrimaryStats;
use super::bonus::{Bonus, BonusStack, StatBounds, StatLayer};
use crate::catalog::{Perk, Skill, Trait};
use crate::config::RulesConfig;
use crate::state::{PerkLedger, TaggedSkills};

/// One integer per skill, indexed by [`Skill`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillValues([i32; Skill::COUNT]);

impl SkillValues {
    pub const fn new(values: [i32; Skill::COUNT]) -> Self {
        Self(values)
    }

    pub const fn get(&self, skill: Skill) -> i32 {
        self.0[skill as usize]
    }

    pub fn set(&mut self, skill: Skill, value: i32) {
        self.0[skill.index()] = value;
    }

    pub fn add(&mut self, skill: Skill, delta: i32) {
        self.0[skill.index()] += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        Skill::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Element-wise sum, used for `final = base + raised`.
    pub fn combined(&self, other: &SkillValues) -> SkillValues {
        let mut out = *self;
        for (skill, value) in other.iter() {
            out.add(skill, value);
        }
        out
    }
}

/// Skill points needed to raise a skill currently at `value` by one step.
///
/// | final value | cost |
/// |-------------|------|
/// | ≤ 100       | 1    |
/// | 101–125     | 2    |
/// | 126–150     | 3    |
/// | 151–175     | 4    |
/// | 176–200     | 5    |
/// | > 200       | 6    |
pub const fn skill_cost(value: i32) -> u32 {
    match value {
        i32::MIN..=100 => 1,
        101..=125 => 2,
        126..=150 => 3,
        151..=175 => 4,
        176..=200 => 5,
        _ => 6,
    }
}

/// Per-skill bonus stacks contributed by traits, creation tags and perks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBonuses {
    stacks: [BonusStack; Skill::COUNT],
}

impl SkillBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skill: Skill, bonus: Bonus) {
        self.stacks[skill.index()].add(bonus);
    }

    pub fn stack(&self, skill: Skill) -> &BonusStack {
        &self.stacks[skill.index()]
    }

    /// Gathers every modifier that applies to base skills.
    pub fn collect(
        traits: &[Trait],
        creation_tags: impl IntoIterator<Item = Skill>,
        perks: impl IntoIterator<Item = Perk>,
        tag_bonus: i32,
    ) -> Self {
        let mut bonuses = Self::new();

        for trait_ in traits {
            match trait_ {
                Trait::Gifted => {
                    for skill in Skill::ALL {
                        bonuses.add(skill, Bonus::flat(-10));
                    }
                }
                Trait::GoodNatured => {
                    for skill in Skill::COMBAT {
                        bonuses.add(skill, Bonus::flat(-10));
                    }
                    for skill in [Skill::FirstAid, Skill::Doctor, Skill::Speech, Skill::Barter] {
                        bonuses.add(skill, Bonus::flat(15));
                    }
                }
                _ => {}
            }
        }

        for skill in creation_tags {
            bonuses.add(skill, Bonus::flat(tag_bonus));
        }

        for perk in perks {
            for &(skill, value) in perk.skill_bonuses() {
                bonuses.add(skill, Bonus::flat(value));
            }
        }

        bonuses
    }
}

/// Base skill layer.
///
/// Base: PrimaryStats
/// Bonuses: SkillBonuses (traits, creation tags, perks)
/// Final: SkillValues (base skills, clamped at zero)
pub struct BaseSkills;

impl StatLayer for BaseSkills {
    type Base = PrimaryStats;
    type Bonuses = SkillBonuses;
    type Final = SkillValues;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        const BOUNDS: StatBounds = StatBounds::SKILL;

        let mut values = SkillValues::default();
        for skill in Skill::ALL {
            let formula = skill.formula();
            let raw = formula
                .weights
                .iter()
                .fold(formula.offset, |acc, &(attribute, weight)| {
                    acc + weight * base.get(attribute)
                });
            values.set(skill, bonuses.stack(skill).apply(raw, BOUNDS));
        }
        values
    }

    fn empty_bonuses() -> Self::Bonuses {
        SkillBonuses::new()
    }
}

/// Recomputes base skills from scratch. Pure and idempotent.
pub fn derive_base_skills(
    primary: &PrimaryStats,
    traits: &[Trait],
    tags: &TaggedSkills,
    perks: &PerkLedger,
    rules: &RulesConfig,
) -> SkillValues {
    let bonuses = SkillBonuses::collect(
        traits,
        tags.creation_tags(),
        perks.acquired_perks(),
        rules.tag_bonus,
    );
    BaseSkills::compute(primary, &bonuses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_with(traits: &[Trait]) -> SkillValues {
        let bonuses = SkillBonuses::collect(traits, [], [], RulesConfig::DEFAULT_TAG_BONUS);
        BaseSkills::compute(&PrimaryStats::default(), &bonuses)
    }

    #[test]
    fn formulas_at_all_fives() {
        let skills = BaseSkills::from_base(&PrimaryStats::default());
        assert_eq!(skills.get(Skill::SmallGuns), 25);
        assert_eq!(skills.get(Skill::Unarmed), 50);
        assert_eq!(skills.get(Skill::MeleeWeapons), 40);
        assert_eq!(skills.get(Skill::FirstAid), 20);
        assert_eq!(skills.get(Skill::Doctor), 15);
        assert_eq!(skills.get(Skill::Lockpick), 20);
        assert_eq!(skills.get(Skill::Speech), 25);
        assert_eq!(skills.get(Skill::Outdoorsman), 20);
    }

    #[test]
    fn gifted_and_good_natured_adjust_flat() {
        let plain = base_with(&[]);
        let gifted = base_with(&[Trait::Gifted]);
        for skill in Skill::ALL {
            assert_eq!(gifted.get(skill), (plain.get(skill) - 10).max(0));
        }

        let natured = base_with(&[Trait::GoodNatured]);
        assert_eq!(natured.get(Skill::Throwing), plain.get(Skill::Throwing) - 10);
        assert_eq!(natured.get(Skill::Barter), plain.get(Skill::Barter) + 15);
        assert_eq!(natured.get(Skill::Science), plain.get(Skill::Science));
    }

    #[test]
    fn creation_tags_and_perks_add_flat_bonuses() {
        let bonuses = SkillBonuses::collect(&[], [Skill::Speech], [Perk::Speaker], 20);
        let skills = BaseSkills::compute(&PrimaryStats::default(), &bonuses);
        assert_eq!(skills.get(Skill::Speech), 25 + 20 + 20);
    }

    #[test]
    fn base_skills_never_negative() {
        let primary = PrimaryStats::new([1; 7], 0);
        let bonuses = SkillBonuses::collect(&[Trait::Gifted, Trait::GoodNatured], [], [], 20);
        let skills = BaseSkills::compute(&primary, &bonuses);
        assert!(skills.iter().all(|(_, value)| value >= 0));
        assert_eq!(skills.get(Skill::BigGuns), 0);
    }

    #[test]
    fn cost_tiers_switch_at_boundaries() {
        let cases = [
            (100, 1),
            (101, 2),
            (125, 2),
            (126, 3),
            (150, 3),
            (151, 4),
            (175, 4),
            (176, 5),
            (200, 5),
            (201, 6),
            (0, 1),
        ];
        for (value, cost) in cases {
            assert_eq!(skill_cost(value), cost, "value {value}");
        }
    }
}
