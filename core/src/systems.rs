use {
    bevy::prelude::*,
    leaderboard::Leaderboard,
    profile_resources::CurrentUser,
    progression::{BadgeBoard, ProfileView, QuestBoard},
    wallet::TokenLedger,
};

pub fn announce_running(user: Res<CurrentUser>) {
    info!(
        user = %user.id,
        tokens = user.stats.tokens,
        rides = user.stats.total_rides,
        "hitch is running"
    );
}

pub fn report_profile(profile: Res<ProfileView>, ledger: Res<TokenLedger>) {
    info!(
        name = %profile.display_name,
        title = %profile.title,
        badges = profile.earned_badges,
        achievements = ledger.achievements.len(),
        "profile"
    );
}

pub fn report_badges(board: Res<BadgeBoard>) {
    info!(
        earned = board.earned_count,
        total = board.entries.len(),
        completion = board.completion_percent,
        "badge collection"
    );
}

pub fn report_quests(board: Res<QuestBoard>) {
    for quest in board.entries.iter().filter(|q| q.joined && q.active) {
        debug!(quest_id = %quest.id, progress = quest.progress, "quest progress");
    }
    info!(
        quests = board.entries.len(),
        tokens_on_offer = board.total_reward_tokens,
        "quest board"
    );
}

pub fn report_leaderboard(board: Res<Leaderboard>) {
    let leader = board.standings.first().map(|s| s.display_name.as_str());
    info!(
        category = board.category.label(),
        leader = ?leader,
        position = ?board.current_user().map(|s| s.position),
        "leaderboard"
    );
}
