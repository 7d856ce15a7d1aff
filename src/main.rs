use {
    bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin},
    hitch_core::CorePlugin,
    settings::{ClientSettings, SettingsPlugin},
    std::time::Duration,
};

fn main() {
    let (settings, source) = ClientSettings::load();

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 30.0,
            ))),
        )
        .add_plugins(LogPlugin {
            filter: settings.log_filter.clone(),
            level: bevy::log::Level::TRACE,
            ..Default::default()
        })
        .add_plugins(AssetPlugin {
            file_path: settings.asset_root.clone(),
            ..Default::default()
        })
        .add_plugins(StatesPlugin)
        .add_plugins(SettingsPlugin { settings, source })
        .add_plugins(CorePlugin)
        .run();
}
