use bevy::prelude::*;
use config::{ConfigError, GameConfig};
use game::CorePlugin;
use grid::GridPlugin;
use ui::UIPlugin;

mod app;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod grid;
mod input;
pub mod messages;
pub mod session;
mod surface;
pub mod ui;

/// Validates the startup config, then opens the game window.
pub fn run() -> Result<(), ConfigError> {
    let config = GameConfig::load()?;

    app::get_default_app("Water Grab")
        .add_plugins(CorePlugin::new(config))
        .add_plugins((GridPlugin, UIPlugin))
        .add_systems(Startup, setup_camera)
        .run();

    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
