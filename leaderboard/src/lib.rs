//! Community rankings and the accolades shown next to each hitcher.

use {
    bevy::prelude::*,
    catalog_assets::UserSnapshot,
    profile_resources::CurrentUser,
    progression_components::UserStats,
    settings::ClientSettings,
    std::collections::BTreeMap,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeaderboardCategory {
    #[default]
    Tokens,
    Rides,
    Trust,
    Streak,
}

impl LeaderboardCategory {
    pub const ALL: [Self; 4] = [Self::Tokens, Self::Rides, Self::Trust, Self::Streak];

    pub fn score(self, stats: &UserStats) -> f64 {
        match self {
            Self::Tokens => f64::from(stats.tokens),
            Self::Rides => f64::from(stats.total_rides),
            Self::Trust => stats.trust_score,
            Self::Streak => f64::from(stats.current_streak),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tokens => "Top Earners",
            Self::Rides => "Most Rides",
            Self::Trust => "Highest Rated",
            Self::Streak => "Best Streaks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accolade {
    ReigningChamp,
    PodiumFinisher,
    TopTen,
    Trailblazer,
    Voyager,
    StreakMaster,
    OnFire,
    EcoWarrior,
    PlateCollector,
}

impl Accolade {
    pub fn label(self) -> &'static str {
        match self {
            Self::ReigningChamp => "Reigning Champ",
            Self::PodiumFinisher => "Podium Finisher",
            Self::TopTen => "Top 10",
            Self::Trailblazer => "Trailblazer",
            Self::Voyager => "Voyager",
            Self::StreakMaster => "Streak Master",
            Self::OnFire => "On Fire",
            Self::EcoWarrior => "Eco-Warrior",
            Self::PlateCollector => "Plate Collector",
        }
    }
}

/// Stable: equal scores keep their input order.
pub fn rank<T>(
    entries: impl IntoIterator<Item = T>,
    category: LeaderboardCategory,
    stats_of: impl Fn(&T) -> &UserStats,
) -> Vec<T> {
    let mut ranked: Vec<T> = entries.into_iter().collect();
    ranked.sort_by(|a, b| {
        category
            .score(stats_of(b))
            .total_cmp(&category.score(stats_of(a)))
    });
    ranked
}

/// Accolades for a hitcher at 0-based `rank`, in display order, at most `max`.
pub fn accolades(stats: &UserStats, rank: usize, max: usize) -> Vec<Accolade> {
    let mut earned = Vec::new();

    if rank == 0 {
        earned.push(Accolade::ReigningChamp);
    }
    if (1..3).contains(&rank) {
        earned.push(Accolade::PodiumFinisher);
    }
    if rank < 10 {
        earned.push(Accolade::TopTen);
    }

    if stats.total_rides >= 50 {
        earned.push(Accolade::Trailblazer);
    } else if stats.total_rides >= 10 {
        earned.push(Accolade::Voyager);
    }

    if stats.current_streak >= 7 {
        earned.push(Accolade::StreakMaster);
    } else if stats.current_streak >= 3 {
        earned.push(Accolade::OnFire);
    }

    if stats.co2_saved >= 10.0 {
        earned.push(Accolade::EcoWarrior);
    }
    if stats.rto_collection.len() >= 10 {
        earned.push(Accolade::PlateCollector);
    }

    earned.truncate(max);
    earned
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    /// 1-based.
    pub position: usize,
    pub user_id: String,
    pub display_name: String,
    pub score: f64,
    pub accolades: Vec<Accolade>,
    pub is_current_user: bool,
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Leaderboard {
    pub category: LeaderboardCategory,
    pub standings: Vec<Standing>,
}

impl Leaderboard {
    pub fn current_user(&self) -> Option<&Standing> {
        self.standings.iter().find(|s| s.is_current_user)
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectedCategory(pub LeaderboardCategory);

/// # Observers
/// - `select_category`: switches the ranking field; the board is rebuilt next update.
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectLeaderboardCategory(pub LeaderboardCategory);

pub struct LeaderboardPlugin;

impl Plugin for LeaderboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Leaderboard>()
            .init_resource::<SelectedCategory>()
            .init_resource::<ClientSettings>()
            .add_observer(select_category)
            .add_systems(
                Update,
                refresh_leaderboard.run_if(
                    resource_changed::<Assets<UserSnapshot>>
                        .or(resource_changed::<CurrentUser>)
                        .or(resource_changed::<SelectedCategory>)
                        .or(resource_changed::<ClientSettings>),
                ),
            );
    }
}

pub fn select_category(
    trigger: On<SelectLeaderboardCategory>,
    mut selected: ResMut<SelectedCategory>,
) {
    let category = trigger.event().0;
    debug!(?category, "leaderboard category selected");
    selected.set_if_neq(SelectedCategory(category));
}

pub fn refresh_leaderboard(
    snapshots: Res<Assets<UserSnapshot>>,
    user: Res<CurrentUser>,
    selected: Res<SelectedCategory>,
    settings: Res<ClientSettings>,
    mut leaderboard: ResMut<Leaderboard>,
) {
    // Keyed by id: deduplicates and gives ties a fixed order.
    let mut hitchers: BTreeMap<&str, (&str, &UserStats)> = snapshots
        .iter()
        .map(|(_, s)| (s.id.as_str(), (s.display_name.as_str(), &s.stats)))
        .collect();
    if user.is_signed_in() {
        hitchers.insert(user.id.as_str(), (user.display_name.as_str(), &user.stats));
    }

    let category = selected.0;
    let ranked = rank(hitchers, category, |(_, (_, stats))| *stats);
    let standings: Vec<Standing> = ranked
        .into_iter()
        .take(settings.leaderboard_size)
        .enumerate()
        .map(|(index, (id, (name, stats)))| Standing {
            position: index + 1,
            user_id: id.to_string(),
            display_name: name.to_string(),
            score: category.score(stats),
            accolades: accolades(stats, index, settings.max_accolades),
            is_current_user: user.is_signed_in() && id == user.id,
        })
        .collect();

    if leaderboard.set_if_neq(Leaderboard {
        category,
        standings,
    }) {
        info!(
            ?category,
            entries = leaderboard.standings.len(),
            position = ?leaderboard.current_user().map(|s| s.position),
            "leaderboard refreshed"
        );
    }
}
