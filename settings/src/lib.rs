//! Client configuration read from a RON file before the app is built.

use {
    bevy::prelude::*,
    serde::Deserialize,
    std::{
        fs, io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// Overrides the settings file location.
pub const SETTINGS_ENV: &str = "HITCH_SETTINGS";
pub const DEFAULT_SETTINGS_PATH: &str = "assets/settings.ron";

pub const DEFAULT_LOG_FILTER: &str = "warn,hitch=info,hitch_core=info,loading=debug,\
    progression=info,wallet=debug,rto_hunt=debug,rides=debug,social=info,\
    leaderboard=info,settings=info";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Root folder the `AssetServer` reads from.
    pub asset_root: String,
    pub log_filter: String,
    /// Signed-in user's snapshot, relative to `asset_root`.
    pub profile_path: String,
    pub catalog: CatalogFolders,
    pub token_rewards: TokenRewardTable,
    pub leaderboard_size: usize,
    pub max_accolades: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            asset_root: "assets".into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            profile_path: "me.user.ron".into(),
            catalog: CatalogFolders::default(),
            token_rewards: TokenRewardTable::default(),
            leaderboard_size: 50,
            max_accolades: 3,
        }
    }
}

/// Catalog folders, relative to `asset_root`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogFolders {
    pub badges: String,
    pub quests: String,
    pub rewards: String,
    pub plates: String,
    pub trails: String,
    pub hitchers: String,
}

impl Default for CatalogFolders {
    fn default() -> Self {
        Self {
            badges: "badges".into(),
            quests: "quests".into(),
            rewards: "rewards".into(),
            plates: "plates".into(),
            trails: "trails".into(),
            hitchers: "hitchers".into(),
        }
    }
}

/// Tokens paid per activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenRewardTable {
    pub ride: u32,
    /// Paid on top of `ride` for eco rides.
    pub eco_ride: u32,
    pub social_share: u32,
    pub quest_complete: u32,
}

impl Default for TokenRewardTable {
    fn default() -> Self {
        Self {
            ride: 50,
            eco_ride: 25,
            social_share: 15,
            quest_complete: 100,
        }
    }
}

impl ClientSettings {
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `$HITCH_SETTINGS` or the default path. Any failure falls back to defaults;
    /// the returned [`SettingsSource`] says which happened.
    pub fn load() -> (Self, SettingsSource) {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        match Self::from_file(&path) {
            Ok(settings) => (settings, SettingsSource::File(path)),
            Err(error) => (
                Self::default(),
                SettingsSource::Defaults {
                    reason: error_chain(&error),
                },
            ),
        }
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Where the active settings came from.
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum SettingsSource {
    File(PathBuf),
    Defaults { reason: String },
}

pub struct SettingsPlugin {
    pub settings: ClientSettings,
    pub source: SettingsSource,
}

impl Default for SettingsPlugin {
    fn default() -> Self {
        Self {
            settings: ClientSettings::default(),
            source: SettingsSource::Defaults {
                reason: "not loaded".into(),
            },
        }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .insert_resource(self.source.clone())
            .add_systems(Startup, report_settings_source);
    }
}

fn report_settings_source(source: Res<SettingsSource>) {
    match source.as_ref() {
        SettingsSource::File(path) => info!(path = %path.display(), "settings loaded"),
        SettingsSource::Defaults { reason } => warn!(%reason, "using default settings"),
    }
}
