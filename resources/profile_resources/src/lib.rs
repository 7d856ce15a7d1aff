use {bevy::prelude::*, catalog_assets::UserSnapshot, progression_components::UserStats};

/// The signed-in hitcher. Every derived view is recomputed from this.
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
    pub bio: String,
    pub stats: UserStats,
}

impl CurrentUser {
    pub fn from_snapshot(snapshot: &UserSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            display_name: snapshot.display_name.clone(),
            bio: snapshot.bio.clone(),
            stats: snapshot.stats.clone(),
        }
    }

    /// An empty id means no snapshot has been hydrated yet.
    pub fn is_signed_in(&self) -> bool {
        !self.id.is_empty()
    }
}

pub struct ProfileResourcesPlugin;

impl Plugin for ProfileResourcesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentUser>();
    }
}
