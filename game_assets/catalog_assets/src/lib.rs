use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    chrono::{DateTime, Utc},
    progression_components::{
        BadgeCategory, PlateRarity, QuestRequirement, QuestType, Rarity, Requirement,
        RewardCategory, TrailCategory, TrailDifficulty, UserStats,
    },
    serde::Deserialize,
};

pub struct CatalogAssetsPlugin;

impl Plugin for CatalogAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RonAssetPlugin::<BadgeDefinition>::new(&["badge.ron"]),
            RonAssetPlugin::<QuestDefinition>::new(&["quest.ron"]),
            RonAssetPlugin::<RewardDefinition>::new(&["reward.ron"]),
            RonAssetPlugin::<RtoPlateDefinition>::new(&["plate.ron"]),
            RonAssetPlugin::<TrailDefinition>::new(&["trail.ron"]),
            RonAssetPlugin::<UserSnapshot>::new(&["user.ron"]),
        ));
    }
}

/// A badge record from the catalog.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct BadgeDefinition {
    /// Unique key (e.g., "century_rider").
    pub id: String,
    pub name: String,
    /// Rank name shown on the profile when this is the best badge held.
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: BadgeCategory,
    #[serde(default)]
    pub rarity: Rarity,
    /// `None` means the record carries no requirements at all, which is never earnable.
    /// `Some` with every key absent is always earned.
    #[serde(default)]
    pub requirements: Option<Requirement>,
    #[serde(default)]
    pub reward_tokens: u32,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// A time-boxed challenge.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quest_type: QuestType,
    #[serde(default)]
    pub requirements: QuestRequirement,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub rewards: QuestRewards,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestRewards {
    pub tokens: Option<u32>,
    /// Badge id granted on completion.
    pub badge: Option<String>,
}

/// An item in the rewards store.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct RewardDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: RewardCategory,
    pub token_cost: u32,
    #[serde(default)]
    pub stock_available: u32,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// A collectible regional registration plate.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct RtoPlateDefinition {
    pub id: String,
    /// Registration code, e.g. "KA-01". This is what ends up in `rto_collection`.
    pub code: String,
    pub state: String,
    pub region: String,
    #[serde(default)]
    pub rarity: PlateRarity,
    #[serde(default)]
    pub bonus_tokens: u32,
}

#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct TrailDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: TrailCategory,
    #[serde(default)]
    pub difficulty: TrailDifficulty,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub reward_tokens: u32,
}

/// A user record: the signed-in hitcher or any leaderboard entry.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct UserSnapshot {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub stats: UserStats,
}

fn active() -> bool {
    true
}
