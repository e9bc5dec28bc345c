/// Ruleset constants and tunable starting values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Value every primary attribute starts at.
    pub starting_attribute: i32,
    /// Attribute points available to distribute at creation.
    pub starting_unspent_points: u32,
    /// Tag points available at creation.
    pub starting_tag_points: u32,
    /// Flat skill bonus granted by a tag chosen at character creation.
    pub tag_bonus: i32,
}

impl RulesConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously selected traits.
    pub const MAX_TRAITS: usize = 2;
    /// Tag slots available at character creation.
    pub const CREATION_TAGS: usize = 3;
    /// Creation tags plus the single slot granted by the Tag! perk.
    pub const MAX_TAGGED: usize = 4;
    pub const ATTRIBUTE_MIN: i32 = 1;
    pub const ATTRIBUTE_MAX: i32 = 10;
    /// Level at which a character is created; tags and traits lock after it.
    pub const CREATION_LEVEL: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_ATTRIBUTE: i32 = 5;
    pub const DEFAULT_UNSPENT_POINTS: u32 = 5;
    pub const DEFAULT_TAG_POINTS: u32 = 3;
    pub const DEFAULT_TAG_BONUS: i32 = 20;

    pub fn new() -> Self {
        Self {
            starting_attribute: Self::DEFAULT_STARTING_ATTRIBUTE,
            starting_unspent_points: Self::DEFAULT_UNSPENT_POINTS,
            starting_tag_points: Self::DEFAULT_TAG_POINTS,
            tag_bonus: Self::DEFAULT_TAG_BONUS,
        }
    }

    pub fn with_tag_bonus(mut self, tag_bonus: i32) -> Self {
        self.tag_bonus = tag_bonus;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
