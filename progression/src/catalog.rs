use {
    crate::is_trail_completed,
    catalog_assets::{RewardDefinition, TrailDefinition},
    progression_components::{RewardCategory, TrailCategory, UserStats},
};

/// Store listing for one category. `None` selects every category.
pub fn filter_rewards<'a>(
    rewards: impl IntoIterator<Item = &'a RewardDefinition>,
    category: Option<RewardCategory>,
) -> impl Iterator<Item = &'a RewardDefinition> {
    rewards
        .into_iter()
        .filter(move |reward| category.is_none_or(|c| reward.category == c))
}

/// `None` selects every category.
pub fn filter_trails<'a>(
    trails: impl IntoIterator<Item = &'a TrailDefinition>,
    category: Option<TrailCategory>,
) -> impl Iterator<Item = &'a TrailDefinition> {
    trails
        .into_iter()
        .filter(move |trail| category.is_none_or(|c| trail.category == c))
}

/// `(completed, total)` over the given trails.
pub fn trail_completion<'a>(
    stats: &UserStats,
    trails: impl IntoIterator<Item = &'a TrailDefinition>,
) -> (usize, usize) {
    trails.into_iter().fold((0, 0), |(completed, total), trail| {
        (
            completed + usize::from(is_trail_completed(stats, &trail.id)),
            total + 1,
        )
    })
}
