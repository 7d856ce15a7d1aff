//! Badge eligibility, quest progress and title resolution.
//!
//! The rule functions are pure: they take a stat snapshot and catalog records and
//! never touch the ECS. [`ProgressionPlugin`] keeps the derived view resources
//! ([`BadgeBoard`], [`QuestBoard`], [`ProfileView`]) in sync with `CurrentUser`.

mod boards;
mod catalog;
mod eligibility;
mod progress;
mod redeem;
mod title;

pub use boards::*;
pub use catalog::*;
pub use eligibility::*;
pub use progress::*;
pub use redeem::*;
pub use title::*;

use bevy::prelude::*;

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BadgeBoard>()
            .init_resource::<settings::ClientSettings>()
            .init_resource::<QuestBoard>()
            .init_resource::<ProfileView>()
            .init_resource::<QuestClock>()
            .init_resource::<QuestRefreshTimer>()
            .add_systems(Update, (refresh_badge_board, refresh_quest_board));
    }
}
