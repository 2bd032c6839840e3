//! UI plugin - menus, HUD, and interface elements.

use bevy::prelude::*;

use super::hud::{self, acquired_lines};
use super::level_up;
use crate::core::GameState;
use crate::player::Player;
use crate::powerups::PowerUpProgression;
use crate::progression::Experience;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        level_up::setup_level_up_systems(app);
        setup_menu_systems(app);

        app.add_systems(Startup, spawn_ui_camera);
    }
}

/// Menus for every non-play state, plus the run tracking they display.
fn setup_menu_systems(app: &mut App) {
    app.init_resource::<RunSummary>()
        .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
        .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
        .add_systems(OnEnter(GameState::GameOver), setup_game_over)
        .add_systems(OnExit(GameState::MainMenu), cleanup_menu)
        .add_systems(OnExit(GameState::Paused), cleanup_menu)
        .add_systems(OnExit(GameState::GameOver), cleanup_menu)
        .add_systems(
            Update,
            menu_input.run_if(
                in_state(GameState::MainMenu)
                    .or(in_state(GameState::Paused))
                    .or(in_state(GameState::GameOver)),
            ),
        )
        .add_systems(Update, track_run.run_if(in_state(GameState::InGame)));
}

pub(super) const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
pub(super) const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
pub(super) const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Button background for an interaction state.
pub(super) fn paint_button(interaction: &Interaction, bg_color: &mut BackgroundColor) {
    bg_color.0 = match interaction {
        Interaction::Pressed => BUTTON_PRESSED,
        Interaction::Hovered => BUTTON_HOVERED,
        Interaction::None => BUTTON_IDLE,
    };
}

/// Root of whichever menu is on screen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuScreen {
    Main,
    Pause,
    GameOver,
}

impl MenuScreen {
    fn title(self) -> (&'static str, f32, Color) {
        match self {
            MenuScreen::Main => ("MOKSHA", 80.0, Color::srgb(0.95, 0.85, 0.5)),
            MenuScreen::Pause => ("PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85)),
            MenuScreen::GameOver => ("YOU FELL", 72.0, Color::srgb(0.8, 0.2, 0.2)),
        }
    }

    fn background(self) -> Color {
        match self {
            MenuScreen::Main => Color::srgb(0.04, 0.03, 0.08),
            MenuScreen::Pause => Color::srgba(0.0, 0.0, 0.05, 0.75),
            MenuScreen::GameOver => Color::srgba(0.1, 0.0, 0.0, 0.9),
        }
    }

    fn buttons(self) -> &'static [MenuButton] {
        match self {
            MenuScreen::Main => &[MenuButton::NewGame, MenuButton::Quit],
            MenuScreen::Pause => &[MenuButton::Resume, MenuButton::MainMenu],
            MenuScreen::GameOver => &[MenuButton::Retry, MenuButton::MainMenu],
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum MenuButton {
    NewGame,
    Quit,
    Resume,
    MainMenu,
    Retry,
}

impl MenuButton {
    fn label(self) -> &'static str {
        match self {
            MenuButton::NewGame => "New Run",
            MenuButton::Quit => "Quit",
            MenuButton::Resume => "Resume",
            MenuButton::MainMenu => "Main Menu",
            MenuButton::Retry => "Try Again",
        }
    }
}

/// The latest run as of its last played frame. The game over screen reads
/// this because the run itself is reset on entering `GameOver`.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
struct RunSummary {
    level: u32,
    power_ups: Vec<String>,
}

/// Spawn the camera all UI renders through.
fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn track_run(
    player_query: Query<&Experience, With<Player>>,
    progression: Option<Res<PowerUpProgression>>,
    mut summary: ResMut<RunSummary>,
) {
    let level = player_query.get_single().map_or(1, |experience| experience.level);
    let power_ups = progression
        .map(|progression| acquired_lines(progression.catalog(), progression.ledger()))
        .unwrap_or_default();

    summary.set_if_neq(RunSummary { level, power_ups });
}

fn pause_details(progression: &PowerUpProgression) -> Vec<String> {
    let mut details = Vec::new();

    match progression.pending_level_ups() {
        0 => {}
        1 => details.push("1 level-up waiting".to_string()),
        n => details.push(format!("{} level-ups waiting", n)),
    }

    let owned = acquired_lines(progression.catalog(), progression.ledger());
    if owned.is_empty() {
        details.push("No power-ups yet".to_string());
    } else {
        details.extend(owned);
    }
    details
}

fn game_over_details(summary: &RunSummary) -> Vec<String> {
    let mut details = vec![format!("Reached level {}", summary.level)];
    if summary.power_ups.is_empty() {
        details.push("Fell without a single power-up".to_string());
    } else {
        details.extend(summary.power_ups.iter().cloned());
    }
    details
}

fn setup_main_menu(mut commands: Commands) {
    spawn_menu(
        &mut commands,
        MenuScreen::Main,
        &["Rise, choose, ascend".to_string()],
    );
}

fn setup_pause_menu(mut commands: Commands, progression: Option<Res<PowerUpProgression>>) {
    let details = progression
        .map(|progression| pause_details(&progression))
        .unwrap_or_default();
    spawn_menu(&mut commands, MenuScreen::Pause, &details);
}

fn setup_game_over(mut commands: Commands, summary: Res<RunSummary>) {
    spawn_menu(&mut commands, MenuScreen::GameOver, &game_over_details(&summary));
}

/// Centered column: title, detail lines, then the screen's buttons.
fn spawn_menu(commands: &mut Commands, screen: MenuScreen, details: &[String]) {
    let (title, title_size, title_color) = screen.title();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(screen.background()),
            screen,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: title_size,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            for line in details {
                parent.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.6, 0.65)),
                ));
            }

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                })
                .with_children(|buttons| {
                    for button in screen.buttons() {
                        spawn_menu_button(buttons, *button);
                    }
                });
        });
}

fn spawn_menu_button(parent: &mut ChildBuilder, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|label| {
            label.spawn((
                Text::new(button.label()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Buttons of every menu. Only the current screen's buttons exist.
fn menu_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        paint_button(interaction, &mut bg_color);
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button {
            MenuButton::NewGame | MenuButton::Resume | MenuButton::Retry => {
                next_state.set(GameState::InGame);
            }
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MenuScreen>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
