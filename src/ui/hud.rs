//! In-game HUD - health, experience, level and acquired power-ups.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::player::Player;
use crate::powerups::{AcquisitionLedger, PowerUpCatalog, PowerUpProgression};
use crate::progression::{Experience, ExperienceCurve};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for experience bar fill.
#[derive(Component)]
pub struct ExperienceBar;

/// Marker for the level label.
#[derive(Component)]
pub struct LevelText;

/// Marker for the acquired power-up list.
#[derive(Component)]
pub struct PowerUpListText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (
                update_health_bar,
                update_experience_display.run_if(resource_exists::<ExperienceCurve>),
                update_power_up_list.run_if(resource_exists::<PowerUpProgression>),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Bottom-left: bars
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Level 1"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                LevelText,
            ));

            spawn_bar(parent, "XP", Color::srgb(0.4, 0.5, 0.9), ExperienceBar);
            spawn_bar(parent, "Health", Color::srgb(0.8, 0.2, 0.2), HealthBar);
        });

    // Top-right: acquired power-ups
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                PowerUpListText,
            ));
        });
}

/// Helper to spawn a status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            // Label
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(150.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    // Bar fill
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

/// Update experience bar and level label.
fn update_experience_display(
    curve: Res<ExperienceCurve>,
    player_query: Query<&Experience, With<Player>>,
    mut bar_query: Query<&mut Node, With<ExperienceBar>>,
    mut text_query: Query<&mut Text, With<LevelText>>,
) {
    let Ok(experience) = player_query.get_single() else {
        return;
    };

    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(experience.progress(&curve) * 100.0);
    }
    if let Ok(mut text) = text_query.get_single_mut() {
        text.0 = format!("Level {}", experience.level);
    }
}

/// List acquired power-ups with their stacks, in catalog order.
fn update_power_up_list(
    progression: Res<PowerUpProgression>,
    mut text_query: Query<&mut Text, With<PowerUpListText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let listing = acquired_lines(progression.catalog(), progression.ledger()).join("\n");
    if text.0 != listing {
        text.0 = listing;
    }
}

/// One "name xN" line per acquired power-up, in catalog order.
pub(super) fn acquired_lines(catalog: &PowerUpCatalog, ledger: &AcquisitionLedger) -> Vec<String> {
    catalog
        .all()
        .iter()
        .filter_map(|definition| {
            let stacks = ledger.stacks_of(&definition.id);
            (stacks > 0).then(|| format!("{} x{}", definition.name, stacks))
        })
        .collect()
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
