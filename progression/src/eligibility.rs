use {
    catalog_assets::BadgeDefinition,
    progression_components::{BadgeCategory, Requirement, UserStats},
};

/// Decides whether `stats` satisfy every threshold of `requirement`.
///
/// A missing requirement record is never satisfied, an empty one always is.
/// Zero thresholds are skipped, so `total_rides: 0` imposes nothing.
pub fn is_eligible(stats: &UserStats, requirement: Option<&Requirement>) -> bool {
    let Some(requirement) = requirement else {
        return false;
    };

    requirement
        .constraints()
        .all(|(key, threshold)| stats.stat(key) >= threshold)
}

pub fn is_badge_earned(stats: &UserStats, badge: &BadgeDefinition) -> bool {
    is_eligible(stats, badge.requirements.as_ref())
}

/// Share of earned badges as a whole percentage. An empty collection is 0%.
pub fn badge_completion(earned: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((earned as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

/// `None` selects every category.
pub fn filter_by_category<'a>(
    badges: impl IntoIterator<Item = &'a BadgeDefinition>,
    category: Option<BadgeCategory>,
) -> impl Iterator<Item = &'a BadgeDefinition> {
    badges
        .into_iter()
        .filter(move |badge| category.is_none_or(|c| badge.category == c))
}

pub fn is_trail_completed(stats: &UserStats, trail_id: &str) -> bool {
    stats.completed_trails.contains(trail_id)
}
