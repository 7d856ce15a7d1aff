//! Handles for the load currently in flight.

use {
    bevy::{asset::LoadedFolder, prelude::*},
    catalog_assets::UserSnapshot,
};

/// One request for the profile snapshot and the catalog folders.
/// Dropping it drops the handles, which cancels loads nobody else holds.
#[derive(Debug)]
pub struct PendingLoad {
    pub generation: u64,
    pub profile: Handle<UserSnapshot>,
    pub folders: Vec<(String, Handle<LoadedFolder>)>,
}

#[derive(Resource, Debug, Default)]
pub struct LoadingManager {
    /// Bumped for every load request.
    pub generation: u64,
    pub pending: Option<PendingLoad>,
    /// Generation whose snapshot is in `CurrentUser`.
    pub hydrated_generation: Option<u64>,
    /// Folders of the last hydrated load, kept so the catalog stays in memory.
    pub catalog: Vec<Handle<LoadedFolder>>,
}
