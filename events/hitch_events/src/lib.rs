use {bevy::prelude::*, progression_components::TokenSource};

/// Tokens were earned by some activity.
///
/// This **Observer** event is the only way balances grow.
///
/// # Observers
/// - `wallet::credit_tokens`: adds `amount` to `CurrentUser.stats.tokens`, appends a
///   ledger entry and bumps the per-activity breakdown.
///
/// # Triggered by
/// - `rides`: ride completion (travel, plus eco for eco rides).
/// - `rto_hunt`: first discovery of a plate (plate bonus).
/// - `social`: sharing a story.
/// - `progression`: completing a joined quest.
#[derive(Event, Debug, Clone)]
pub struct TokensEarned {
    pub amount: u32,
    pub source: TokenSource,
    /// Ride id, plate id, story id... whatever the tokens were paid for.
    pub reference: Option<String>,
}

/// A badge flipped from locked to earned during a board refresh.
///
/// # Observers
/// - `wallet::record_badge`: remembers the badge id once.
#[derive(Event, Debug, Clone)]
pub struct BadgeEarned {
    pub badge_id: String,
    pub title: String,
}

/// The backend reported a new streak length.
///
/// # Observers
/// - `wallet::update_streak`: sets the current streak and raises the longest one.
#[derive(Event, Debug, Clone, Copy)]
pub struct StreakUpdated {
    pub days: u32,
}

/// A joined quest reached 100% while its window was open.
#[derive(Event, Debug, Clone)]
pub struct QuestCompleted {
    pub quest_id: String,
    pub title: String,
}
