//! Moksha - Entry Point
//!
//! Controls:
//! - Mouse: Menus and power-up cards
//! - 1-9: Pick a power-up
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Moksha".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(moksha::MokshaPlugin)

        .run();
}
