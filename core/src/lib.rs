use {
    bevy::prelude::*,
    catalog_assets::CatalogAssetsPlugin,
    leaderboard::{Leaderboard, LeaderboardPlugin},
    loading::LoadingManagerPlugin,
    profile_resources::ProfileResourcesPlugin,
    progression::{BadgeBoard, ProfileView, ProgressionPlugin, QuestBoard},
    rides::RidesPlugin,
    rto_hunt::RtoHuntPlugin,
    social::SocialPlugin,
    states::AppState,
    wallet::WalletPlugin,
};

mod systems;

/// Every feature plugin plus the log lines standing in for the screens.
/// Expects `StatesPlugin` and `AssetPlugin` to be present.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CatalogAssetsPlugin,
            ProfileResourcesPlugin,
            LoadingManagerPlugin::default(),
            ProgressionPlugin,
            WalletPlugin,
            RidesPlugin,
            SocialPlugin,
            RtoHuntPlugin,
            LeaderboardPlugin,
        ))
        .add_systems(OnEnter(AppState::Running), systems::announce_running)
        .add_systems(
            Update,
            (
                systems::report_profile.run_if(resource_changed::<ProfileView>),
                systems::report_badges.run_if(resource_changed::<BadgeBoard>),
                systems::report_quests.run_if(resource_changed::<QuestBoard>),
                systems::report_leaderboard.run_if(resource_changed::<Leaderboard>),
            )
                .after(progression::refresh_badge_board)
                .after(progression::refresh_quest_board)
                .run_if(in_state(AppState::Running)),
        );
    }
}
