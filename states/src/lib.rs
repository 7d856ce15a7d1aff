use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    /// Nothing in flight (before the first load, after a cancel or a failure).
    #[default]
    Idle,
    Assets,  // Profile snapshot and catalog folders requested from the AssetServer
    Hydrate, // Copy the loaded snapshot into CurrentUser
    Ready,
}
