mod resources;

pub use resources::{LoadingManager, PendingLoad};

use {
    bevy::{
        asset::{LoadState, RecursiveDependencyLoadState, UntypedAssetId},
        prelude::*,
    },
    catalog_assets::UserSnapshot,
    profile_resources::CurrentUser,
    settings::ClientSettings,
    states::{AppState, LoadingPhase},
};

pub struct LoadingManagerPlugin {
    /// Request the profile and catalog on `Startup`.
    pub load_on_startup: bool,
}

impl Default for LoadingManagerPlugin {
    fn default() -> Self {
        Self {
            load_on_startup: true,
        }
    }
}

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingManager>()
            .init_resource::<ClientSettings>()
            .init_state::<AppState>()
            .init_state::<LoadingPhase>()
            .add_observer(reload_catalog)
            .add_observer(cancel_loading)
            // Phase: Assets - wait for the AssetServer
            .add_systems(
                Update,
                check_assets_loaded.run_if(in_state(LoadingPhase::Assets)),
            )
            // Phase: Hydrate - snapshot into CurrentUser
            .add_systems(OnEnter(LoadingPhase::Hydrate), hydrate_current_user)
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading);

        if self.load_on_startup {
            app.add_systems(Startup, start_loading);
        }
    }
}

// --- Events ---

/// Starts a fresh load of the profile and catalog; anything in flight is dropped.
///
/// # Observers
/// - `reload_catalog`: bumps the generation, requests every path again and enters
///   `LoadingPhase::Assets`.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReloadCatalog;

/// # Observers
/// - `cancel_loading`: drops the pending handles and returns to `LoadingPhase::Idle`.
///   `CurrentUser` keeps whatever the last completed load put there.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CancelLoading;

// --- Phase: Assets ---

fn start_loading(mut commands: Commands) {
    info!("started loading profile and catalog");
    commands.trigger(ReloadCatalog);
}

fn reload_catalog(
    _trigger: On<ReloadCatalog>,
    mut manager: ResMut<LoadingManager>,
    settings: Res<ClientSettings>,
    asset_server: Res<AssetServer>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    manager.generation += 1;
    let generation = manager.generation;

    let catalog = &settings.catalog;
    let folder_paths = [
        &catalog.badges,
        &catalog.quests,
        &catalog.rewards,
        &catalog.plates,
        &catalog.trails,
        &catalog.hitchers,
    ];

    // Re-read from disk: the server hands back the cached asset while a handle lives.
    if generation > 1 {
        asset_server.reload(settings.profile_path.clone());
        for path in folder_paths {
            asset_server.reload(path.clone());
        }
    }

    let profile = asset_server.load::<UserSnapshot>(settings.profile_path.clone());
    let folders = folder_paths
        .into_iter()
        .map(|path| (path.clone(), asset_server.load_folder(path.clone())))
        .collect();

    if let Some(stale) = manager.pending.replace(PendingLoad {
        generation,
        profile,
        folders,
    }) {
        debug!(generation = stale.generation, "superseded pending load");
    }

    debug!(generation, profile = %settings.profile_path, "load requested");
    next_phase.set(LoadingPhase::Assets);
}

fn cancel_loading(
    _trigger: On<CancelLoading>,
    mut manager: ResMut<LoadingManager>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    match manager.pending.take() {
        Some(pending) => info!(generation = pending.generation, "loading cancelled"),
        None => debug!("nothing to cancel"),
    }
    next_phase.set(LoadingPhase::Idle);
}

fn failed(asset_server: &AssetServer, id: UntypedAssetId) -> bool {
    matches!(asset_server.get_load_state(id), Some(LoadState::Failed(_)))
        || matches!(
            asset_server.get_recursive_dependency_load_state(id),
            Some(RecursiveDependencyLoadState::Failed(_))
        )
}

fn check_assets_loaded(
    mut manager: ResMut<LoadingManager>,
    asset_server: Res<AssetServer>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    let Some(pending) = manager.pending.as_ref() else {
        return;
    };

    let ids: Vec<(&str, UntypedAssetId)> = std::iter::once((
        "profile",
        pending.profile.id().untyped(),
    ))
    .chain(
        pending
            .folders
            .iter()
            .map(|(path, handle)| (path.as_str(), handle.id().untyped())),
    )
    .collect();

    if let Some((path, _)) = ids.iter().find(|(_, id)| failed(&asset_server, *id)) {
        error!(
            generation = pending.generation,
            %path,
            "failed to load, returning to idle"
        );
        manager.pending = None;
        next_phase.set(LoadingPhase::Idle);
        return;
    }

    let loaded = ids
        .iter()
        .filter(|(_, id)| asset_server.is_loaded_with_dependencies(*id))
        .count();
    if loaded < ids.len() {
        trace!(loaded, total = ids.len(), "waiting for assets");
        return;
    }

    info!(generation = pending.generation, "assets loaded");
    next_phase.set(LoadingPhase::Hydrate);
}

// --- Phase: Hydrate ---

fn hydrate_current_user(
    mut manager: ResMut<LoadingManager>,
    snapshots: Res<Assets<UserSnapshot>>,
    mut user: ResMut<CurrentUser>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    let Some(pending) = manager.pending.take() else {
        warn!("hydrate entered without a pending load");
        next_phase.set(LoadingPhase::Idle);
        return;
    };

    if manager
        .hydrated_generation
        .is_some_and(|hydrated| hydrated >= pending.generation)
    {
        debug!(
            generation = pending.generation,
            "discarding snapshot from an older load"
        );
        next_phase.set(LoadingPhase::Idle);
        return;
    }

    let Some(snapshot) = snapshots.get(&pending.profile) else {
        error!(generation = pending.generation, "profile snapshot missing after load");
        next_phase.set(LoadingPhase::Idle);
        return;
    };

    *user = CurrentUser::from_snapshot(snapshot);
    manager.hydrated_generation = Some(pending.generation);
    manager.catalog = pending.folders.into_iter().map(|(_, handle)| handle).collect();

    info!(
        generation = pending.generation,
        user = %user.id,
        tokens = user.stats.tokens,
        "current user hydrated"
    );
    next_phase.set(LoadingPhase::Ready);
}

// --- Phase: Ready ---

fn finish_loading(state: Res<State<AppState>>, mut next_state: ResMut<NextState<AppState>>) {
    if *state.get() != AppState::Running {
        info!("loading complete, transitioning to Running");
        next_state.set(AppState::Running);
    }
}
