use {
    crate::{badge_completion, current_title, is_badge_earned, is_quest_active, progress_percent},
    bevy::{platform::collections::HashMap, prelude::*},
    catalog_assets::{BadgeDefinition, QuestDefinition},
    chrono::{DateTime, Utc},
    hitch_events::{BadgeEarned, QuestCompleted, TokensEarned},
    profile_resources::CurrentUser,
    progression_components::{BadgeCategory, QuestType, Rarity, TokenSource},
    settings::ClientSettings,
};

// ============================================================================
// Resources
// ============================================================================

/// One badge as the collection screen shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeEntry {
    pub id: String,
    pub name: String,
    pub title: String,
    pub category: BadgeCategory,
    pub rarity: Rarity,
    pub earned: bool,
}

/// Every catalog badge evaluated against the current user, sorted by id.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct BadgeBoard {
    /// Id of the user the entries were computed for.
    pub owner: String,
    pub entries: Vec<BadgeEntry>,
    pub earned_count: usize,
    pub completion_percent: u8,
}

impl BadgeBoard {
    pub fn is_earned(&self, badge_id: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.id == badge_id && entry.earned)
    }

    /// `(earned, total, percent)` for one category, or for all of them with `None`.
    pub fn category_completion(&self, category: Option<BadgeCategory>) -> (usize, usize, u8) {
        let (earned, total) = self
            .entries
            .iter()
            .filter(|entry| category.is_none_or(|c| entry.category == c))
            .fold((0, 0), |(earned, total), entry| {
                (earned + usize::from(entry.earned), total + 1)
            });
        (earned, total, badge_completion(earned, total))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestEntry {
    pub id: String,
    pub title: String,
    pub quest_type: QuestType,
    pub active: bool,
    /// The user opted into this quest.
    pub joined: bool,
    pub progress: u8,
    pub reward_tokens: Option<u32>,
}

impl QuestEntry {
    /// Joined, running and every target met.
    pub fn is_complete(&self) -> bool {
        self.joined && self.active && self.progress == 100
    }
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct QuestBoard {
    /// Id of the user the entries were computed for.
    pub owner: String,
    pub entries: Vec<QuestEntry>,
    pub active_by_type: HashMap<QuestType, usize>,
    /// Sum of token rewards over every listed quest.
    pub total_reward_tokens: u32,
}

impl QuestBoard {
    pub fn active_count(&self, quest_type: QuestType) -> usize {
        self.active_by_type.get(&quest_type).copied().unwrap_or_default()
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub display_name: String,
    pub title: String,
    pub earned_badges: usize,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            title: crate::NEW_HITCHER_TITLE.to_string(),
            earned_badges: 0,
        }
    }
}

/// Time source for quest windows. `fixed` pins it, otherwise the wall clock is used.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct QuestClock {
    pub fixed: Option<DateTime<Utc>>,
}

impl QuestClock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self { fixed: Some(at) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.fixed.unwrap_or_else(Utc::now)
    }
}

/// Quest windows open and close with time alone, so the board is also refreshed periodically.
#[derive(Resource)]
pub struct QuestRefreshTimer(pub Timer);

impl Default for QuestRefreshTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(60.0, TimerMode::Repeating))
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Rebuilds the badge board and profile title when the user or the badge catalog changes.
///
/// Badges that flip to earned for the same user trigger `BadgeEarned`. The first
/// board built for a user only establishes the baseline.
pub fn refresh_badge_board(
    user: Res<CurrentUser>,
    badges: Res<Assets<BadgeDefinition>>,
    mut board: ResMut<BadgeBoard>,
    mut profile: ResMut<ProfileView>,
    mut commands: Commands,
) {
    if !user.is_changed() && !badges.is_changed() {
        return;
    }
    if !user.is_signed_in() {
        return;
    }

    let mut definitions: Vec<&BadgeDefinition> = badges.iter().map(|(_, badge)| badge).collect();
    definitions.sort_by(|a, b| a.id.cmp(&b.id));

    let entries: Vec<BadgeEntry> = definitions
        .iter()
        .map(|badge| BadgeEntry {
            id: badge.id.clone(),
            name: badge.name.clone(),
            title: badge.title.clone(),
            category: badge.category,
            rarity: badge.rarity,
            earned: is_badge_earned(&user.stats, badge),
        })
        .collect();

    if board.owner == user.id {
        for entry in entries.iter().filter(|e| e.earned) {
            if !board.is_earned(&entry.id) {
                info!(badge_id = %entry.id, title = %entry.title, "badge earned");
                commands.trigger(BadgeEarned {
                    badge_id: entry.id.clone(),
                    title: entry.title.clone(),
                });
            }
        }
    }

    let earned: Vec<&BadgeDefinition> = definitions
        .iter()
        .zip(&entries)
        .filter(|(_, entry)| entry.earned)
        .map(|(badge, _)| *badge)
        .collect();
    let earned_count = earned.len();

    profile.set_if_neq(ProfileView {
        display_name: user.display_name.clone(),
        title: current_title(earned).to_string(),
        earned_badges: earned_count,
    });

    board.set_if_neq(BadgeBoard {
        owner: user.id.clone(),
        completion_percent: badge_completion(earned_count, entries.len()),
        earned_count,
        entries,
    });
}

/// Rebuilds the quest board on user/catalog changes and on every refresh tick.
///
/// A joined quest that becomes complete triggers `QuestCompleted` and pays its reward
/// (or the configured default). Each quest id is paid at most once per user, tracked
/// in `UserStats::completed_quests`. Quests already complete on the first board for a
/// user are recorded without paying.
pub fn refresh_quest_board(
    time: Res<Time>,
    mut timer: ResMut<QuestRefreshTimer>,
    clock: Res<QuestClock>,
    settings: Res<ClientSettings>,
    mut user: ResMut<CurrentUser>,
    quests: Res<Assets<QuestDefinition>>,
    mut board: ResMut<QuestBoard>,
    mut commands: Commands,
) {
    let tick = timer.0.tick(time.delta()).just_finished();
    if !tick && !user.is_changed() && !quests.is_changed() && !clock.is_changed() {
        return;
    }
    if !user.is_signed_in() {
        return;
    }

    let now = clock.now();
    let mut definitions: Vec<&QuestDefinition> = quests.iter().map(|(_, quest)| quest).collect();
    definitions.sort_by(|a, b| a.id.cmp(&b.id));

    let mut next = QuestBoard {
        owner: user.id.clone(),
        ..Default::default()
    };
    for quest in definitions {
        let active = is_quest_active(quest, now);
        if active {
            *next.active_by_type.entry(quest.quest_type).or_default() += 1;
        }
        next.total_reward_tokens = next
            .total_reward_tokens
            .saturating_add(quest.rewards.tokens.unwrap_or_default());
        next.entries.push(QuestEntry {
            id: quest.id.clone(),
            title: quest.title.clone(),
            quest_type: quest.quest_type,
            active,
            joined: user.stats.active_quests.contains(&quest.id),
            progress: progress_percent(&user.stats, &quest.requirements),
            reward_tokens: quest.rewards.tokens,
        });
    }

    let baseline = board.owner != user.id;
    for entry in next.entries.iter().filter(|e| e.is_complete()) {
        if user.stats.completed_quests.contains(&entry.id) {
            continue;
        }
        user.stats.complete_quest(&entry.id);
        if baseline {
            debug!(quest_id = %entry.id, "quest already complete when loaded");
            continue;
        }

        let amount = entry
            .reward_tokens
            .unwrap_or(settings.token_rewards.quest_complete);
        info!(quest_id = %entry.id, amount, "quest completed");
        commands.trigger(QuestCompleted {
            quest_id: entry.id.clone(),
            title: entry.title.clone(),
        });
        commands.trigger(TokensEarned {
            amount,
            source: TokenSource::Quest,
            reference: Some(entry.id.clone()),
        });
    }

    if board.set_if_neq(next) {
        debug!(quests = board.entries.len(), "quest board refreshed");
    }
}
