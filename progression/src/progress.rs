use {
    catalog_assets::QuestDefinition,
    chrono::{DateTime, Utc},
    progression_components::{QuestRequirement, UserStats},
};

/// Completion of a quest as a whole percentage.
///
/// Contributions are capped at their target and summed, then divided by the sum of
/// the targets. Large targets therefore weigh more than small ones: 5/5 rides next
/// to 0/1000 km is 0%, not 50%. No tracked target, or a non-positive total, gives 0.
pub fn progress_percent(stats: &UserStats, requirement: &QuestRequirement) -> u8 {
    let (progress, total) = requirement
        .targets()
        .fold((0.0, 0.0), |(progress, total), (key, target)| {
            (progress + stats.tracked(key).min(target), total + target)
        });

    if total <= 0.0 {
        return 0;
    }

    (100.0 * progress / total).round().clamp(0.0, 100.0) as u8
}

/// A quest runs between its dates, bounds included, and only while flagged active.
pub fn is_quest_active(quest: &QuestDefinition, now: DateTime<Utc>) -> bool {
    quest.is_active && quest.start_date <= now && now <= quest.end_date
}
