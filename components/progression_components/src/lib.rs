//! Plain data shared by every progression crate: the user stat snapshot, requirement
//! records and the closed vocabularies (rarities, categories, token sources).
//!
//! No Bevy dependency.

mod requirement;
mod stats;
mod tokens;

pub use requirement::*;
pub use stats::*;
pub use tokens::*;

use serde::{Deserialize, Serialize};

/// Badge tier. Also the precedence used when picking a display title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Highest tier first.
    pub const PRECEDENCE: [Rarity; 5] = [
        Rarity::Legendary,
        Rarity::Epic,
        Rarity::Rare,
        Rarity::Uncommon,
        Rarity::Common,
    ];
}

/// RTO plates only come in four tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeCategory {
    #[default]
    Rides,
    Distance,
    Streak,
    Eco,
    Rto,
    Social,
    Special,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestType {
    #[default]
    Individual,
    Community,
    Trail,
    Event,
}

impl QuestType {
    pub const ALL: [QuestType; 4] = [
        QuestType::Individual,
        QuestType::Community,
        QuestType::Trail,
        QuestType::Event,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCategory {
    Food,
    Travel,
    Clothing,
    Gear,
    #[default]
    Voucher,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrailCategory {
    #[default]
    Scenic,
    Heritage,
    Adventure,
    Cultural,
    Nature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrailDifficulty {
    #[default]
    Easy,
    Moderate,
    Challenging,
}
