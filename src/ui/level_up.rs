//! Power-up choice screen - one card per offered power-up.

use bevy::prelude::*;

use super::plugin::{paint_button, BUTTON_IDLE};
use crate::core::{PlayState, PowerUpChosenEvent};
use crate::powerups::{PowerUpId, PowerUpProgression, Rarity};

/// Marker for choice screen entities.
#[derive(Component)]
struct ChoiceScreenUi;

/// A clickable power-up card.
#[derive(Component)]
struct ChoiceButton(PowerUpId);

/// Number keys that pick the matching card.
const CHOICE_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Setup choice screen systems.
pub fn setup_level_up_systems(app: &mut App) {
    app.add_systems(
        Update,
        (refresh_choice_screen, choice_input)
            .chain()
            .run_if(in_state(PlayState::ChoosingPowerUp))
            .run_if(resource_exists::<PowerUpProgression>),
    )
    .add_systems(OnExit(PlayState::ChoosingPowerUp), cleanup_choice_screen);
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::srgb(0.75, 0.75, 0.75),
        Rarity::Uncommon => Color::srgb(0.35, 0.8, 0.35),
        Rarity::Rare => Color::srgb(0.3, 0.55, 0.95),
        Rarity::Epic => Color::srgb(0.7, 0.35, 0.9),
        Rarity::Legendary => Color::srgb(0.95, 0.65, 0.2),
    }
}

/// Rebuild the cards whenever a new offer is presented (or the screen
/// was torn down by a pause).
fn refresh_choice_screen(
    mut commands: Commands,
    progression: Res<PowerUpProgression>,
    screen_query: Query<Entity, With<ChoiceScreenUi>>,
    mut shown_serial: Local<Option<u64>>,
) {
    let serial = progression.offer_serial();
    if *shown_serial == Some(serial) && !screen_query.is_empty() {
        return;
    }

    for entity in screen_query.iter() {
        commands.entity(entity).despawn_recursive();
    }

    let Some(offer) = progression.current_offer() else {
        return;
    };
    *shown_serial = Some(serial);

    let catalog = progression.catalog();
    let ledger = progression.ledger();
    let waiting = progression.pending_level_ups().saturating_sub(1);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.05, 0.75)),
            ChoiceScreenUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("LEVEL UP"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
            ));

            if waiting > 0 {
                parent.spawn((
                    Text::new(format!("{} more waiting", waiting)),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.6, 0.65)),
                ));
            }

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                })
                .with_children(|row| {
                    for (index, id) in offer.iter().enumerate() {
                        let Some(definition) = catalog.get(id) else {
                            continue;
                        };
                        let stacks = ledger.stacks_of(id);
                        let owned = if stacks == 0 {
                            "New".to_string()
                        } else {
                            format!("Owned: {}", stacks)
                        };

                        row.spawn((
                            Button,
                            Node {
                                width: Val::Px(200.0),
                                min_height: Val::Px(220.0),
                                margin: UiRect::all(Val::Px(10.0)),
                                padding: UiRect::all(Val::Px(12.0)),
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(8.0),
                                border: UiRect::all(Val::Px(2.0)),
                                ..default()
                            },
                            BorderColor(rarity_color(definition.rarity)),
                            BackgroundColor(BUTTON_IDLE),
                            ChoiceButton(id.clone()),
                        ))
                        .with_children(|card| {
                            card.spawn((
                                Text::new(format!("[{}] {}", index + 1, definition.name)),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.9, 0.9, 0.95)),
                            ));
                            card.spawn((
                                Text::new(definition.rarity.label()),
                                TextFont {
                                    font_size: 14.0,
                                    ..default()
                                },
                                TextColor(rarity_color(definition.rarity)),
                            ));
                            card.spawn((
                                Text::new(definition.description.clone()),
                                TextFont {
                                    font_size: 14.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.75, 0.75, 0.8)),
                            ));
                            card.spawn((
                                Text::new(owned),
                                TextFont {
                                    font_size: 12.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.55, 0.55, 0.6)),
                            ));
                        });
                    }
                });
        });
}

/// Report the player's pick by click or number key, once per offer.
fn choice_input(
    mut interaction_query: Query<
        (&Interaction, &ChoiceButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    keyboard: Res<ButtonInput<KeyCode>>,
    progression: Res<PowerUpProgression>,
    mut chosen: EventWriter<PowerUpChosenEvent>,
    mut answered_serial: Local<Option<u64>>,
) {
    let Some(offer) = progression.current_offer() else {
        return;
    };
    let serial = progression.offer_serial();

    let mut pick = None;

    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        if *interaction == Interaction::Pressed && offer.contains(&button.0) {
            pick = Some(button.0.clone());
        }
        paint_button(interaction, &mut bg_color);
    }

    if pick.is_none() {
        pick = CHOICE_KEYS
            .iter()
            .zip(offer.iter())
            .find(|(key, _)| keyboard.just_pressed(**key))
            .map(|(_, id)| id.clone());
    }

    if let Some(id) = pick {
        if *answered_serial == Some(serial) {
            return;
        }
        *answered_serial = Some(serial);
        chosen.send(PowerUpChosenEvent { id });
    }
}

/// Clean up choice screen entities.
fn cleanup_choice_screen(mut commands: Commands, query: Query<Entity, With<ChoiceScreenUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
