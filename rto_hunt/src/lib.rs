//! RTO plate hunt: spotting registration codes from the regional catalog.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    catalog_assets::RtoPlateDefinition,
    chrono::{DateTime, Utc},
    hitch_events::TokensEarned,
    profile_resources::CurrentUser,
    progression_components::{PlateRarity, TokenSource, UserStats},
};

pub fn is_collected(stats: &UserStats, code: &str) -> bool {
    stats.has_plate(code)
}

/// `None` keeps every rarity. The search is a case-insensitive substring match over
/// code, state and region; an empty search matches everything.
pub fn filter_plates<'a>(
    plates: impl IntoIterator<Item = &'a RtoPlateDefinition>,
    rarity: Option<PlateRarity>,
    search: &str,
) -> Vec<&'a RtoPlateDefinition> {
    let needle = search.trim().to_lowercase();
    plates
        .into_iter()
        .filter(|plate| rarity.is_none_or(|r| plate.rarity == r))
        .filter(|plate| {
            needle.is_empty()
                || [&plate.code, &plate.state, &plate.region]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Most discovered first; ties by code.
pub fn plates_by_discoveries<'a>(
    plates: impl IntoIterator<Item = &'a RtoPlateDefinition>,
    discoveries: &PlateDiscoveries,
) -> Vec<&'a RtoPlateDefinition> {
    let mut sorted: Vec<_> = plates.into_iter().collect();
    sorted.sort_by(|a, b| {
        discoveries
            .count(&b.id)
            .cmp(&discoveries.count(&a.id))
            .then_with(|| a.code.cmp(&b.code))
    });
    sorted
}

/// Share of the catalog the user has collected, 0-100.
pub fn collection_percent(stats: &UserStats, catalog_size: usize) -> u8 {
    if catalog_size == 0 {
        return 0;
    }
    let collected = stats.rto_collection.len().min(catalog_size);
    (collected as f64 * 100.0 / catalog_size as f64).round() as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlateDiscovery {
    pub discovered_by: Vec<String>,
    pub discovery_count: u32,
    pub first_discovered_at: DateTime<Utc>,
}

/// Discovery records keyed by plate id.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlateDiscoveries {
    pub plates: HashMap<String, PlateDiscovery>,
}

impl PlateDiscoveries {
    pub fn record(&mut self, plate_id: &str, user_id: &str, at: DateTime<Utc>) {
        let entry = self
            .plates
            .entry(plate_id.to_string())
            .or_insert_with(|| PlateDiscovery {
                discovered_by: Vec::new(),
                discovery_count: 0,
                first_discovered_at: at,
            });
        entry.discovery_count = entry.discovery_count.saturating_add(1);
        if !entry.discovered_by.iter().any(|id| id == user_id) {
            entry.discovered_by.push(user_id.to_string());
        }
    }

    pub fn count(&self, plate_id: &str) -> u32 {
        self.plates.get(plate_id).map_or(0, |d| d.discovery_count)
    }
}

/// The current user spotted a plate.
///
/// # Observers
/// - `discover_plate`: adds the code to the collection, pays `bonus_tokens` and
///   triggers `PlateDiscovered`. Unknown or already collected plates are ignored.
#[derive(Event, Debug, Clone)]
pub struct DiscoverPlate {
    pub plate_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PlateDiscovered {
    pub plate_id: String,
    pub code: String,
    pub rarity: PlateRarity,
    pub bonus_tokens: u32,
}

pub struct RtoHuntPlugin;

impl Plugin for RtoHuntPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlateDiscoveries>()
            .add_observer(discover_plate);
    }
}

pub fn discover_plate(
    trigger: On<DiscoverPlate>,
    plates: Res<Assets<RtoPlateDefinition>>,
    mut user: ResMut<CurrentUser>,
    mut discoveries: ResMut<PlateDiscoveries>,
    mut commands: Commands,
) {
    let plate_id = &trigger.event().plate_id;
    if !user.is_signed_in() {
        warn!(%plate_id, "plate discovery without a signed-in user");
        return;
    }
    let Some(plate) = plates.iter().map(|(_, p)| p).find(|p| &p.id == plate_id) else {
        warn!(%plate_id, "unknown plate");
        return;
    };
    if is_collected(&user.stats, &plate.code) {
        debug!(code = %plate.code, "plate already collected");
        return;
    }

    user.stats.rto_collection.insert(plate.code.clone());
    let user_id = user.id.clone();
    discoveries.record(&plate.id, &user_id, Utc::now());

    info!(
        code = %plate.code,
        rarity = ?plate.rarity,
        bonus_tokens = plate.bonus_tokens,
        collected = user.stats.rto_collection.len(),
        "plate discovered"
    );
    commands.trigger(TokensEarned {
        amount: plate.bonus_tokens,
        source: TokenSource::RtoDiscovery,
        reference: Some(plate.code.clone()),
    });
    commands.trigger(PlateDiscovered {
        plate_id: plate.id.clone(),
        code: plate.code.clone(),
        rarity: plate.rarity,
        bonus_tokens: plate.bonus_tokens,
    });
}
