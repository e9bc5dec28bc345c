//! Perk catalog: eligibility requirements, rank caps and static effects.
//!
//! Requirements are checked against the *final* skill values (base plus
//! raised), the current level and the current primary attributes.

use crate::catalog::Skill;
use crate::stats::Attribute::{Agility as AG, Charisma as CH, Endurance as EN};
use crate::stats::Attribute::{Intelligence as IN, Luck as LK, Perception as PE, Strength as ST};
use crate::stats::{Attribute, PrimaryStats, SkillValues};

use Threshold::{AtLeast, AtMost};

/// Every perk in the catalog.
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
pub enum Perk {
    ActionBoy,
    AdrenalineRush,
    Awareness,
    BetterCriticals,
    BonusHthAttacks,
    BonusHthDamage,
    BonusMove,
    BonusRangedDamage,
    BonusRateOfFire,
    CautiousNature,
    Comprehension,
    CultOfPersonality,
    DemolitionExpert,
    Dodger,
    EarlierSequence,
    Educated,
    Empathy,
    Explorer,
    FasterHealing,
    FortuneFinder,
    Gambler,
    Ghost,
    Harmless,
    Healer,
    HeaveHo,
    HereAndNow,
    HthEvade,
    KamaSutraMaster,
    KarmaBeacon,
    Lifegiver,
    LightStep,
    LivingAnatomy,
    MagneticPersonality,
    MasterThief,
    MasterTrader,
    Medic,
    MoreCriticals,
    MrFixit,
    Mutate,
    MysteriousStranger,
    Negotiator,
    NightVision,
    PackRat,
    Pathfinder,
    Pickpocket,
    Presence,
    Pyromaniac,
    QuickPockets,
    QuickRecovery,
    RadResistance,
    Ranger,
    Salesman,
    Scout,
    Scrounger,
    Sharpshooter,
    SilentDeath,
    SilentRunning,
    Slayer,
    SmoothTalker,
    Snakeater,
    Sniper,
    Speaker,
    Stonewall,
    StrongBack,
    Survivalist,
    SwiftLearner,
    Tag,
    Thief,
    Toughness,
    WeaponHandling,
    GainStrength,
    GainPerception,
    GainEndurance,
    GainCharisma,
    GainIntelligence,
    GainAgility,
    GainLuck,
}

/// Attribute requirement of a perk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    AtLeast(i32),
    /// Used by the Gain perks: the attribute must still have room to grow.
    AtMost(i32),
}

impl Threshold {
    pub const fn admits(&self, value: i32) -> bool {
        match *self {
            AtLeast(min) => value >= min,
            AtMost(max) => value <= max,
        }
    }
}

/// Static definition of a perk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerkDef {
    pub level: u32,
    pub attributes: &'static [(Attribute, Threshold)],
    pub skills: &'static [(Skill, i32)],
    pub max_ranks: u32,
}

impl PerkDef {
    const fn new(
        level: u32,
        attributes: &'static [(Attribute, Threshold)],
        skills: &'static [(Skill, i32)],
        max_ranks: u32,
    ) -> Self {
        Self {
            level,
            attributes,
            skills,
            max_ranks,
        }
    }
}

impl Perk {
    pub const COUNT: usize = 77;

    pub const ALL: [Perk; Self::COUNT] = [
        Perk::ActionBoy,
        Perk::AdrenalineRush,
        Perk::Awareness,
        Perk::BetterCriticals,
        Perk::BonusHthAttacks,
        Perk::BonusHthDamage,
        Perk::BonusMove,
        Perk::BonusRangedDamage,
        Perk::BonusRateOfFire,
        Perk::CautiousNature,
        Perk::Comprehension,
        Perk::CultOfPersonality,
        Perk::DemolitionExpert,
        Perk::Dodger,
        Perk::EarlierSequence,
        Perk::Educated,
        Perk::Empathy,
        Perk::Explorer,
        Perk::FasterHealing,
        Perk::FortuneFinder,
        Perk::Gambler,
        Perk::Ghost,
        Perk::Harmless,
        Perk::Healer,
        Perk::HeaveHo,
        Perk::HereAndNow,
        Perk::HthEvade,
        Perk::KamaSutraMaster,
        Perk::KarmaBeacon,
        Perk::Lifegiver,
        Perk::LightStep,
        Perk::LivingAnatomy,
        Perk::MagneticPersonality,
        Perk::MasterThief,
        Perk::MasterTrader,
        Perk::Medic,
        Perk::MoreCriticals,
        Perk::MrFixit,
        Perk::Mutate,
        Perk::MysteriousStranger,
        Perk::Negotiator,
        Perk::NightVision,
        Perk::PackRat,
        Perk::Pathfinder,
        Perk::Pickpocket,
        Perk::Presence,
        Perk::Pyromaniac,
        Perk::QuickPockets,
        Perk::QuickRecovery,
        Perk::RadResistance,
        Perk::Ranger,
        Perk::Salesman,
        Perk::Scout,
        Perk::Scrounger,
        Perk::Sharpshooter,
        Perk::SilentDeath,
        Perk::SilentRunning,
        Perk::Slayer,
        Perk::SmoothTalker,
        Perk::Snakeater,
        Perk::Sniper,
        Perk::Speaker,
        Perk::Stonewall,
        Perk::StrongBack,
        Perk::Survivalist,
        Perk::SwiftLearner,
        Perk::Tag,
        Perk::Thief,
        Perk::Toughness,
        Perk::WeaponHandling,
        Perk::GainStrength,
        Perk::GainPerception,
        Perk::GainEndurance,
        Perk::GainCharisma,
        Perk::GainIntelligence,
        Perk::GainAgility,
        Perk::GainLuck,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn definition(&self) -> PerkDef {
        match self {
            Perk::ActionBoy => PerkDef::new(12, &[(AG, AtLeast(5))], &[], 2),
            Perk::AdrenalineRush => PerkDef::new(6, &[(ST, AtLeast(10))], &[], 1),
            Perk::Awareness => PerkDef::new(3, &[(PE, AtLeast(5))], &[], 1),
            Perk::BetterCriticals => PerkDef::new(
                9,
                &[(PE, AtLeast(6)), (AG, AtLeast(4)), (LK, AtLeast(6))],
                &[],
                1,
            ),
            Perk::BonusHthAttacks => PerkDef::new(15, &[(AG, AtLeast(6))], &[], 1),
            Perk::BonusHthDamage => {
                PerkDef::new(3, &[(ST, AtLeast(6)), (AG, AtLeast(6))], &[], 3)
            }
            Perk::BonusMove => PerkDef::new(6, &[(AG, AtLeast(5))], &[], 2),
            Perk::BonusRangedDamage => {
                PerkDef::new(6, &[(AG, AtLeast(6)), (LK, AtLeast(6))], &[], 2)
            }
            Perk::BonusRateOfFire => PerkDef::new(
                15,
                &[(PE, AtLeast(6)), (IN, AtLeast(6)), (AG, AtLeast(7))],
                &[],
                1,
            ),
            Perk::CautiousNature => PerkDef::new(3, &[(PE, AtLeast(6))], &[], 1),
            Perk::Comprehension => PerkDef::new(3, &[(IN, AtLeast(6))], &[], 1),
            Perk::CultOfPersonality => PerkDef::new(12, &[(CH, AtLeast(10))], &[], 1),
            Perk::DemolitionExpert => {
                PerkDef::new(9, &[(AG, AtLeast(4))], &[(Skill::Traps, 75)], 1)
            }
            Perk::Dodger => PerkDef::new(9, &[(AG, AtLeast(6))], &[], 1),
            Perk::EarlierSequence => PerkDef::new(3, &[], &[], 3),
            Perk::Educated => PerkDef::new(3, &[(IN, AtLeast(6))], &[], 3),
            Perk::Empathy => PerkDef::new(6, &[(PE, AtLeast(7)), (IN, AtLeast(5))], &[], 1),
            Perk::Explorer => PerkDef::new(9, &[], &[], 1),
            Perk::FasterHealing => PerkDef::new(3, &[(EN, AtLeast(6))], &[], 3),
            Perk::FortuneFinder => PerkDef::new(6, &[(LK, AtLeast(8))], &[], 1),
            Perk::Gambler => PerkDef::new(6, &[], &[(Skill::Gambling, 50)], 1),
            Perk::Ghost => PerkDef::new(6, &[], &[(Skill::Sneak, 60)], 1),
            Perk::Harmless => PerkDef::new(6, &[], &[(Skill::Steal, 50)], 1),
            Perk::Healer => PerkDef::new(
                3,
                &[(PE, AtLeast(7)), (IN, AtLeast(5)), (AG, AtLeast(6))],
                &[(Skill::FirstAid, 40)],
                2,
            ),
            Perk::HeaveHo => PerkDef::new(6, &[(ST, AtLeast(9))], &[], 3),
            Perk::HereAndNow => PerkDef::new(3, &[], &[], 1),
            Perk::HthEvade => PerkDef::new(12, &[], &[(Skill::Unarmed, 75)], 1),
            Perk::KamaSutraMaster => {
                PerkDef::new(3, &[(EN, AtLeast(5)), (AG, AtLeast(5))], &[], 1)
            }
            Perk::KarmaBeacon => PerkDef::new(9, &[(CH, AtLeast(6))], &[], 1),
            Perk::Lifegiver => PerkDef::new(12, &[(EN, AtLeast(4))], &[], 2),
            Perk::LightStep => PerkDef::new(9, &[(AG, AtLeast(5)), (LK, AtLeast(5))], &[], 1),
            Perk::LivingAnatomy => PerkDef::new(12, &[], &[(Skill::Doctor, 60)], 1),
            Perk::MagneticPersonality => PerkDef::new(6, &[(CH, AtLeast(10))], &[], 1),
            Perk::MasterThief => {
                PerkDef::new(12, &[], &[(Skill::Lockpick, 50), (Skill::Steal, 50)], 1)
            }
            Perk::MasterTrader => {
                PerkDef::new(12, &[(CH, AtLeast(7))], &[(Skill::Barter, 75)], 1)
            }
            Perk::Medic => {
                PerkDef::new(12, &[], &[(Skill::FirstAid, 40), (Skill::Doctor, 40)], 1)
            }
            Perk::MoreCriticals => PerkDef::new(6, &[(LK, AtLeast(6))], &[], 3),
            Perk::MrFixit => {
                PerkDef::new(12, &[], &[(Skill::Science, 40), (Skill::Repair, 40)], 1)
            }
            Perk::Mutate => PerkDef::new(9, &[], &[], 1),
            Perk::MysteriousStranger => PerkDef::new(9, &[(LK, AtLeast(4))], &[], 1),
            Perk::Negotiator => {
                PerkDef::new(6, &[], &[(Skill::Barter, 50), (Skill::Speech, 50)], 1)
            }
            Perk::NightVision => PerkDef::new(6, &[(PE, AtLeast(6))], &[], 1),
            Perk::PackRat => PerkDef::new(6, &[], &[], 1),
            Perk::Pathfinder => {
                PerkDef::new(6, &[(EN, AtLeast(6))], &[(Skill::Outdoorsman, 40)], 2)
            }
            Perk::Pickpocket => PerkDef::new(15, &[(AG, AtLeast(8))], &[(Skill::Steal, 80)], 1),
            Perk::Presence => PerkDef::new(3, &[(CH, AtLeast(6))], &[], 3),
            Perk::Pyromaniac => PerkDef::new(9, &[], &[(Skill::BigGuns, 75)], 1),
            Perk::QuickPockets => PerkDef::new(3, &[(AG, AtLeast(5))], &[], 1),
            Perk::QuickRecovery => PerkDef::new(6, &[(AG, AtLeast(5))], &[], 1),
            Perk::RadResistance => {
                PerkDef::new(6, &[(EN, AtLeast(6)), (IN, AtLeast(4))], &[], 2)
            }
            Perk::Ranger => PerkDef::new(6, &[(PE, AtLeast(6))], &[], 1),
            Perk::Salesman => PerkDef::new(6, &[], &[(Skill::Barter, 50)], 1),
            Perk::Scout => PerkDef::new(3, &[(PE, AtLeast(7))], &[], 1),
            Perk::Scrounger => PerkDef::new(9, &[(LK, AtLeast(8))], &[], 1),
            Perk::Sharpshooter => {
                PerkDef::new(9, &[(PE, AtLeast(7)), (IN, AtLeast(6))], &[], 1)
            }
            Perk::SilentDeath => PerkDef::new(
                18,
                &[(AG, AtLeast(10))],
                &[(Skill::Sneak, 80), (Skill::Unarmed, 80)],
                1,
            ),
            Perk::SilentRunning => PerkDef::new(6, &[(AG, AtLeast(6))], &[(Skill::Sneak, 50)], 1),
            Perk::Slayer => PerkDef::new(
                24,
                &[(ST, AtLeast(8)), (AG, AtLeast(8))],
                &[(Skill::Unarmed, 80)],
                1,
            ),
            Perk::SmoothTalker => PerkDef::new(3, &[(IN, AtLeast(4))], &[], 3),
            Perk::Snakeater => PerkDef::new(6, &[(EN, AtLeast(3))], &[], 2),
            Perk::Sniper => PerkDef::new(
                24,
                &[(PE, AtLeast(8)), (AG, AtLeast(8))],
                &[(Skill::SmallGuns, 80)],
                1,
            ),
            Perk::Speaker => PerkDef::new(9, &[], &[(Skill::Speech, 50)], 1),
            Perk::Stonewall => PerkDef::new(3, &[(ST, AtLeast(6))], &[], 1),
            Perk::StrongBack => PerkDef::new(3, &[(ST, AtLeast(6)), (EN, AtLeast(6))], &[], 3),
            Perk::Survivalist => PerkDef::new(
                3,
                &[(EN, AtLeast(6)), (IN, AtLeast(6))],
                &[(Skill::Outdoorsman, 40)],
                1,
            ),
            Perk::SwiftLearner => PerkDef::new(3, &[(IN, AtLeast(4))], &[], 3),
            Perk::Tag => PerkDef::new(12, &[], &[], 1),
            Perk::Thief => PerkDef::new(3, &[], &[], 1),
            Perk::Toughness => PerkDef::new(3, &[(EN, AtLeast(6)), (LK, AtLeast(6))], &[], 3),
            Perk::WeaponHandling => {
                PerkDef::new(12, &[(ST, AtLeast(7)), (AG, AtLeast(5))], &[], 1)
            }
            Perk::GainStrength => PerkDef::new(12, &[(ST, AtMost(9))], &[], 1),
            Perk::GainPerception => PerkDef::new(12, &[(PE, AtMost(9))], &[], 1),
            Perk::GainEndurance => PerkDef::new(12, &[(EN, AtMost(9))], &[], 1),
            Perk::GainCharisma => PerkDef::new(12, &[(CH, AtMost(9))], &[], 1),
            Perk::GainIntelligence => PerkDef::new(12, &[(IN, AtMost(9))], &[], 1),
            Perk::GainAgility => PerkDef::new(12, &[(AG, AtMost(9))], &[], 1),
            Perk::GainLuck => PerkDef::new(12, &[(LK, AtMost(9))], &[], 1),
        }
    }

    pub const fn max_ranks(&self) -> u32 {
        self.definition().max_ranks
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Perk::ActionBoy => "Action boy",
            Perk::AdrenalineRush => "Adrenaline rush",
            Perk::Awareness => "Awareness",
            Perk::BetterCriticals => "Better criticals",
            Perk::BonusHthAttacks => "Bonus hth attacks",
            Perk::BonusHthDamage => "Bonus hth damage",
            Perk::BonusMove => "Bonus move",
            Perk::BonusRangedDamage => "Bonus ranged damage",
            Perk::BonusRateOfFire => "Bonus rate of fire",
            Perk::CautiousNature => "Cautious nature",
            Perk::Comprehension => "Comprehension",
            Perk::CultOfPersonality => "Cult of personality",
            Perk::DemolitionExpert => "Demolition expert",
            Perk::Dodger => "Dodger",
            Perk::EarlierSequence => "Earlier sequence",
            Perk::Educated => "Educated",
            Perk::Empathy => "Empathy",
            Perk::Explorer => "Explorer",
            Perk::FasterHealing => "Faster healing",
            Perk::FortuneFinder => "Fortune finder",
            Perk::Gambler => "Gambler",
            Perk::Ghost => "Ghost",
            Perk::Harmless => "Harmless",
            Perk::Healer => "Healer",
            Perk::HeaveHo => "Heave Ho!",
            Perk::HereAndNow => "Here and now",
            Perk::HthEvade => "Hth evade",
            Perk::KamaSutraMaster => "Kama sutra master",
            Perk::KarmaBeacon => "Karma beacon",
            Perk::Lifegiver => "Lifegiver",
            Perk::LightStep => "Light step",
            Perk::LivingAnatomy => "Living anatomy",
            Perk::MagneticPersonality => "Magnetic personality",
            Perk::MasterThief => "Master thief",
            Perk::MasterTrader => "Master trader",
            Perk::Medic => "Medic",
            Perk::MoreCriticals => "More criticals",
            Perk::MrFixit => "Mr. Fixit",
            Perk::Mutate => "Mutate!",
            Perk::MysteriousStranger => "Mysterious stranger",
            Perk::Negotiator => "Negotiator",
            Perk::NightVision => "Night vision",
            Perk::PackRat => "Pack rat",
            Perk::Pathfinder => "Pathfinder",
            Perk::Pickpocket => "Pickpocket",
            Perk::Presence => "Presence",
            Perk::Pyromaniac => "Pyromaniac",
            Perk::QuickPockets => "Quick pockets",
            Perk::QuickRecovery => "Quick recovery",
            Perk::RadResistance => "Rad resistance",
            Perk::Ranger => "Ranger",
            Perk::Salesman => "Salesman",
            Perk::Scout => "Scout",
            Perk::Scrounger => "Scrounger",
            Perk::Sharpshooter => "Sharpshooter",
            Perk::SilentDeath => "Silent death",
            Perk::SilentRunning => "Silent running",
            Perk::Slayer => "Slayer",
            Perk::SmoothTalker => "Smooth talker",
            Perk::Snakeater => "Snakeater",
            Perk::Sniper => "Sniper",
            Perk::Speaker => "Speaker",
            Perk::Stonewall => "Stonewall",
            Perk::StrongBack => "Strong back",
            Perk::Survivalist => "Survivalist",
            Perk::SwiftLearner => "Swift learner",
            Perk::Tag => "Tag!",
            Perk::Thief => "Thief",
            Perk::Toughness => "Toughness",
            Perk::WeaponHandling => "Weapon handling",
            Perk::GainStrength => "Gain strength",
            Perk::GainPerception => "Gain perception",
            Perk::GainEndurance => "Gain endurance",
            Perk::GainCharisma => "Gain charisma",
            Perk::GainIntelligence => "Gain intelligence",
            Perk::GainAgility => "Gain agility",
            Perk::GainLuck => "Gain luck",
        }
    }

    /// Resolves the snake_case identifier or the display label
    /// (`"heave_ho"`, `"Heave Ho!"`).
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok().or_else(|| {
            Self::ALL
                .into_iter()
                .find(|p| p.label().eq_ignore_ascii_case(name.trim()))
        })
    }

    /// Attribute raised by one of the Gain perks.
    pub const fn gained_attribute(&self) -> Option<Attribute> {
        match self {
            Perk::GainStrength => Some(Attribute::Strength),
            Perk::GainPerception => Some(Attribute::Perception),
            Perk::GainEndurance => Some(Attribute::Endurance),
            Perk::GainCharisma => Some(Attribute::Charisma),
            Perk::GainIntelligence => Some(Attribute::Intelligence),
            Perk::GainAgility => Some(Attribute::Agility),
            Perk::GainLuck => Some(Attribute::Luck),
            _ => None,
        }
    }

    /// Perks whose effect cannot be taken back once chosen.
    pub const fn is_irreversible(&self) -> bool {
        matches!(self, Perk::HereAndNow | Perk::Tag | Perk::Mutate)
    }

    /// Flat skill bonuses granted while the perk holds at least one rank.
    pub const fn skill_bonuses(&self) -> &'static [(Skill, i32)] {
        match self {
            Perk::Thief => &[
                (Skill::Sneak, 10),
                (Skill::Lockpick, 10),
                (Skill::Steal, 10),
                (Skill::Traps, 10),
            ],
            Perk::Medic => &[(Skill::FirstAid, 10), (Skill::Doctor, 10)],
            Perk::MrFixit => &[(Skill::Science, 10), (Skill::Repair, 10)],
            Perk::Gambler => &[(Skill::Gambling, 20)],
            Perk::Harmless => &[(Skill::Steal, 20)],
            Perk::MasterThief => &[(Skill::Lockpick, 15), (Skill::Steal, 15)],
            Perk::Negotiator => &[(Skill::Barter, 10), (Skill::Speech, 10)],
            Perk::Salesman => &[(Skill::Barter, 20)],
            Perk::Speaker => &[(Skill::Speech, 20)],
            Perk::Ranger => &[(Skill::Outdoorsman, 15)],
            Perk::Survivalist => &[(Skill::Outdoorsman, 25)],
            Perk::LivingAnatomy => &[(Skill::Doctor, 10)],
            _ => &[],
        }
    }

    /// Descriptive line for perks that change no computed number.
    pub const fn note(&self, ranks: u32) -> Option<&'static str> {
        match (self, ranks) {
            (_, 0) => None,
            (Perk::BonusMove, 1) => Some("+2 free action points for movement per turn"),
            (Perk::BonusMove, _) => Some("+4 free action points for movement per turn"),
            (Perk::AdrenalineRush, _) => Some("+1 to strength when at half hit points"),
            (Perk::Awareness, _) => {
                Some("Able to see enemy hit points, weapon and available ammunition")
            }
            (Perk::BonusHthAttacks, _) => {
                Some("All action point costs with unarmed and melee weapons are reduced by 1")
            }
            (Perk::BonusRateOfFire, _) => {
                Some("All action point costs with ranged weapons are reduced by 1")
            }
            (Perk::BonusRangedDamage, 1) => Some("+2 damage with ranged weapons per round"),
            (Perk::BonusRangedDamage, _) => Some("+4 damage with ranged weapons per round"),
            _ => None,
        }
    }

    /// Checks level, attribute and skill thresholds.
    pub fn requirements_met(
        &self,
        level: u32,
        primary: &PrimaryStats,
        skills: &SkillValues,
    ) -> bool {
        let def = self.definition();
        level >= def.level
            && def
                .attributes
                .iter()
                .all(|(attribute, threshold)| threshold.admits(primary.get(*attribute)))
            && def
                .skills
                .iter()
                .all(|&(skill, min)| skills.get(skill) >= min)
    }
}
