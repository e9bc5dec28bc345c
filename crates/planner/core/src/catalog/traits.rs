//! Trait catalog.
//!
//! Traits are permanent trade-offs picked at creation. Three of them
//! (Bruiser, Gifted, Small frame) shift primary attributes while selected;
//! the rest only feed the skill and derived-stat layers.

/// The sixteen selectable traits.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Trait {
    BloodyMess,
    Bruiser,
    ChemReliant,
    ChemResistant,
    FastMetabolism,
    FastShot,
    Finesse,
    Gifted,
    GoodNatured,
    HeavyHanded,
    Jinxed,
    Kamikaze,
    OneHander,
    SexAppeal,
    Skilled,
    SmallFrame,
}

impl Trait {
    pub const COUNT: usize = 16;

    pub const ALL: [Trait; Self::COUNT] = [
        Trait::BloodyMess,
        Trait::Bruiser,
        Trait::ChemReliant,
        Trait::ChemResistant,
        Trait::FastMetabolism,
        Trait::FastShot,
        Trait::Finesse,
        Trait::Gifted,
        Trait::GoodNatured,
        Trait::HeavyHanded,
        Trait::Jinxed,
        Trait::Kamikaze,
        Trait::OneHander,
        Trait::SexAppeal,
        Trait::Skilled,
        Trait::SmallFrame,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Trait::BloodyMess => "Bloody mess",
            Trait::Bruiser => "Bruiser",
            Trait::ChemReliant => "Chem reliant",
            Trait::ChemResistant => "Chem resistant",
            Trait::FastMetabolism => "Fast metabolism",
            Trait::FastShot => "Fast shot",
            Trait::Finesse => "Finesse",
            Trait::Gifted => "Gifted",
            Trait::GoodNatured => "Good natured",
            Trait::HeavyHanded => "Heavy handed",
            Trait::Jinxed => "Jinxed",
            Trait::Kamikaze => "Kamikaze",
            Trait::OneHander => "One hander",
            Trait::SexAppeal => "Sex appeal",
            Trait::Skilled => "Skilled",
            Trait::SmallFrame => "Small frame",
        }
    }

    /// Resolves either the snake_case identifier or the display label.
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok().or_else(|| {
            Self::ALL
                .into_iter()
                .find(|t| t.label().eq_ignore_ascii_case(name.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_identifiers_and_labels() {
        assert_eq!(Trait::lookup("small_frame"), Some(Trait::SmallFrame));
        assert_eq!(Trait::lookup("Small frame"), Some(Trait::SmallFrame));
        assert_eq!(Trait::lookup("good natured"), Some(Trait::GoodNatured));
        assert_eq!(Trait::lookup("Night person"), None);
    }

    #[test]
    fn labels_are_unique() {
        for (i, a) in Trait::ALL.iter().enumerate() {
            for b in &Trait::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
