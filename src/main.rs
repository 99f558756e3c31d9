use bevy::prelude::*;

use pegfall::{GameConfig, GamePlugin};

fn main() {
    // Load configuration (fall back to defaults if missing); warnings are
    // logged once the app's logger is up.
    let cfg = GameConfig::load_or_default("assets/config/game.ron");

    App::new()
        .insert_resource(cfg.clone())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .run();
}
