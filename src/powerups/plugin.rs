//! Power-up plugin - loads the catalog, turns level-ups into offers and
//! applies the player's choices.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use super::data::{PowerUpConfig, DEFAULT_POWER_UP_PATH};
use super::error::DataLoadError;
use super::orchestrator::LevelUpOrchestrator;
use crate::abilities::{PlayerAbilities, PlayerEffectApplier};
use crate::combat::Health;
use crate::core::{
    GameState, LevelUpEvent, PlayState, PowerUpAppliedEvent, PowerUpChosenEvent,
    PowerUpOfferedEvent,
};
use crate::player::Player;

/// Where to load power-ups from and how to seed the run's random source.
#[derive(Resource, Debug, Clone)]
pub struct PowerUpSettings {
    pub config_path: PathBuf,
    /// Fixed seed for reproducible runs, entropy when `None`.
    pub seed: Option<u64>,
    /// Overrides `choices_per_level` from the data file.
    pub choices_per_level: Option<usize>,
}

impl Default for PowerUpSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_POWER_UP_PATH),
            seed: None,
            choices_per_level: None,
        }
    }
}

/// The run's level-up orchestrator.
#[derive(Resource, Deref, DerefMut)]
pub struct PowerUpProgression(pub LevelUpOrchestrator<StdRng>);

impl PowerUpProgression {
    /// Load and validate the data file described by `settings`.
    pub fn load(settings: &PowerUpSettings) -> Result<Self, DataLoadError> {
        let config = PowerUpConfig::load(&settings.config_path)?;
        let choices_per_level = settings.choices_per_level.unwrap_or(config.choices_per_level);
        let (catalog, weights) = config.into_parts()?;

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self(LevelUpOrchestrator::new(
            catalog,
            weights,
            choices_per_level,
            rng,
        )))
    }
}

/// Power-up plugin - catalog loading, level-up queue, choice resolution.
pub struct PowerUpPlugin;

impl Plugin for PowerUpPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PowerUpSettings>()
            .add_systems(Startup, load_power_ups)
            // Leave Loading only once the configuration is usable
            .add_systems(
                Update,
                finish_loading
                    .run_if(in_state(GameState::Loading))
                    .run_if(resource_exists::<PowerUpProgression>),
            )
            // Leaving a run in any way abandons it
            .add_systems(OnEnter(GameState::MainMenu), reset_run)
            .add_systems(OnEnter(GameState::GameOver), reset_run)
            .add_systems(
                Update,
                (queue_level_ups, resolve_choices, sync_play_state)
                    .chain()
                    .run_if(in_state(GameState::InGame))
                    .run_if(resource_exists::<PowerUpProgression>),
            );
    }
}

/// Load the catalog and weights. A failure here is fatal: the game stays
/// in `GameState::Loading`.
fn load_power_ups(
    mut commands: Commands,
    settings: Res<PowerUpSettings>,
    existing: Option<Res<PowerUpProgression>>,
) {
    if existing.is_some() {
        return;
    }

    match PowerUpProgression::load(&settings) {
        Ok(progression) => {
            info!(
                "Loaded {} power-ups from {:?} ({} choices per level)",
                progression.catalog().len(),
                settings.config_path,
                progression.choices_per_level()
            );
            commands.insert_resource(progression);
        }
        Err(e) => {
            error!("Cannot start without power-ups: {}", e);
        }
    }
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Discard queued level-ups and the run's ledger.
fn reset_run(progression: Option<ResMut<PowerUpProgression>>) {
    if let Some(mut progression) = progression {
        progression.reset();
        info!("Power-up run state reset");
    }
}

/// Feed level-ups into the orchestrator in arrival order.
fn queue_level_ups(
    mut level_ups: EventReader<LevelUpEvent>,
    mut progression: ResMut<PowerUpProgression>,
    mut offered: EventWriter<PowerUpOfferedEvent>,
) {
    for event in level_ups.read() {
        if let Some(offer) = progression.on_level_up(event.new_level) {
            info!("Level {}: offering {} power-ups", event.new_level, offer.len());
            offered.send(PowerUpOfferedEvent {
                choices: offer.choices().to_vec(),
            });
        }
    }
}

/// Apply the player's picks.
fn resolve_choices(
    mut choices: EventReader<PowerUpChosenEvent>,
    mut progression: ResMut<PowerUpProgression>,
    mut player_query: Query<(&mut PlayerAbilities, &mut Health), With<Player>>,
    mut applied: EventWriter<PowerUpAppliedEvent>,
    mut offered: EventWriter<PowerUpOfferedEvent>,
) {
    for event in choices.read() {
        let mut player = player_query.get_single_mut().ok();
        let mut applier = PlayerEffectApplier::new(
            player
                .as_mut()
                .map(|(abilities, health)| (&mut **abilities, &mut **health)),
        );

        let next_offer = match progression.on_selection(&event.id, &mut applier) {
            Ok(next) => next.map(|offer| offer.choices().to_vec()),
            Err(e) => {
                warn!("Ignoring power-up choice: {}", e);
                continue;
            }
        };

        applied.send(PowerUpAppliedEvent {
            id: event.id.clone(),
            stacks: progression.ledger().stacks_of(&event.id),
        });

        if let Some(choices) = next_offer {
            info!("Next queued level-up: offering {} power-ups", choices.len());
            offered.send(PowerUpOfferedEvent { choices });
        }
    }
}

/// Run condition for gameplay systems: false while a power-up choice is
/// open, even on frames where `PlayState` has not caught up yet (such as
/// the first frame after resuming from pause).
pub fn no_choice_pending(progression: Option<Res<PowerUpProgression>>) -> bool {
    progression.map_or(true, |progression| !progression.is_awaiting_choice())
}

/// Keep the play sub-state in line with the orchestrator, so the choice
/// screen survives pausing.
fn sync_play_state(
    progression: Res<PowerUpProgression>,
    play_state: Option<Res<State<PlayState>>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let Some(play_state) = play_state else {
        return;
    };

    let wanted = if progression.is_awaiting_choice() {
        PlayState::ChoosingPowerUp
    } else {
        PlayState::Playing
    };

    if *play_state.get() != wanted {
        next_state.set(wanted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatPlugin, Enemy, EnemyStats};
    use crate::core::{CorePlugin, DamageEvent};
    use crate::powerups::{
        PowerUpCatalog, PowerUpDefinition, PowerUpEffect, PowerUpId, Rarity, RarityWeightTable,
    };
    use bevy::state::app::StatesPlugin;

    fn seeded_progression() -> PowerUpProgression {
        let catalog = PowerUpCatalog::from_definitions([
            PowerUpDefinition::new(
                "ember",
                Rarity::Common,
                PowerUpEffect::OrbitingFireballs { damage: 4.0 },
            ),
            PowerUpDefinition::new(
                "storm",
                Rarity::Rare,
                PowerUpEffect::LightningStrike { damage: 5.0 },
            ),
            PowerUpDefinition::new("vitality", Rarity::Epic, PowerUpEffect::MaxHealth { amount: 10.0 })
                .unique(),
        ])
        .unwrap();

        PowerUpProgression(LevelUpOrchestrator::new(
            catalog,
            RarityWeightTable::default(),
            2,
            StdRng::seed_from_u64(3),
        ))
    }

    fn base_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>();
        app
    }

    fn loaded_app() -> App {
        let mut app = base_app();
        app.insert_resource(seeded_progression())
            .add_plugins((CorePlugin, PowerUpPlugin));
        app
    }

    /// App that has finished loading and entered a run.
    fn in_game_app() -> App {
        start_run(loaded_app())
    }

    fn start_run(mut app: App) -> App {
        // Loading -> MainMenu
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::MainMenu
        );

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        app
    }

    fn spawn_test_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((Player, PlayerAbilities::default(), Health::new(100.0)))
            .id()
    }

    fn progression(app: &App) -> &PowerUpProgression {
        app.world().resource::<PowerUpProgression>()
    }

    fn first_offered(app: &App) -> PowerUpId {
        progression(app).current_offer().unwrap().choices()[0].clone()
    }

    fn play_state(app: &App) -> PlayState {
        *app.world().resource::<State<PlayState>>().get()
    }

    #[test]
    fn queued_level_ups_are_resolved_in_sequence() {
        let mut app = in_game_app();
        let player = spawn_test_player(&mut app);

        app.world_mut().send_event(LevelUpEvent { player, new_level: 2 });
        app.world_mut().send_event(LevelUpEvent { player, new_level: 3 });
        app.update();

        assert!(progression(&app).is_awaiting_choice());
        assert_eq!(progression(&app).pending_level_ups(), 2);
        assert_eq!(progression(&app).offer_serial(), 1);

        app.update();
        assert_eq!(play_state(&app), PlayState::ChoosingPowerUp);

        // First choice opens the second screen
        let first = first_offered(&app);
        app.world_mut().send_event(PowerUpChosenEvent { id: first.clone() });
        app.update();

        assert_eq!(progression(&app).offer_serial(), 2);
        assert_eq!(progression(&app).pending_level_ups(), 1);
        assert_eq!(progression(&app).ledger().stacks_of(&first), 1);

        let applied = app.world().resource::<Events<PowerUpAppliedEvent>>();
        let mut cursor = applied.get_cursor();
        let applied: Vec<(PowerUpId, u32)> =
            cursor.read(applied).map(|e| (e.id.clone(), e.stacks)).collect();
        assert_eq!(applied, vec![(first.clone(), 1)]);

        // Second choice returns to play
        let second = first_offered(&app);
        app.world_mut().send_event(PowerUpChosenEvent { id: second });
        app.update();
        app.update();

        assert!(!progression(&app).is_awaiting_choice());
        assert_eq!(progression(&app).pending_level_ups(), 0);
        assert_eq!(progression(&app).ledger().total_acquisitions(), 2);
        assert_eq!(play_state(&app), PlayState::Playing);

        let abilities = app.world().get::<PlayerAbilities>(player).unwrap();
        let health = app.world().get::<Health>(player).unwrap();
        assert!(*abilities != PlayerAbilities::default() || health.maximum > 100.0);
    }

    #[test]
    fn resuming_into_an_open_choice_keeps_combat_frozen() {
        let mut app = loaded_app();
        app.add_plugins(CombatPlugin);
        let mut app = start_run(app);
        let player = spawn_test_player(&mut app);
        let enemy = app
            .world_mut()
            .spawn((Enemy, EnemyStats::default(), Health::new(20.0)))
            .id();

        app.world_mut().send_event(LevelUpEvent { player, new_level: 2 });
        app.update();
        app.update();
        assert_eq!(play_state(&app), PlayState::ChoosingPowerUp);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::Paused);
        app.update();

        // PlayState comes back as Playing for the first resumed frame
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.world_mut().send_event(DamageEvent {
            target: enemy,
            amount: 5.0,
        });
        app.update();

        assert!(progression(&app).is_awaiting_choice());
        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 20.0);

        app.update();
        assert_eq!(play_state(&app), PlayState::ChoosingPowerUp);
        assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 20.0);
    }

    #[test]
    fn choice_not_on_offer_is_ignored() {
        let mut app = in_game_app();
        let player = spawn_test_player(&mut app);

        app.world_mut().send_event(LevelUpEvent { player, new_level: 2 });
        app.update();
        app.world_mut().send_event(PowerUpChosenEvent {
            id: PowerUpId::new("not-a-power-up"),
        });
        app.update();

        assert!(progression(&app).is_awaiting_choice());
        assert!(progression(&app).ledger().is_empty());
    }

    #[test]
    fn returning_to_main_menu_abandons_the_run() {
        let mut app = in_game_app();
        let player = spawn_test_player(&mut app);

        app.world_mut().send_event(LevelUpEvent { player, new_level: 2 });
        app.update();
        let pick = first_offered(&app);
        app.world_mut().send_event(PowerUpChosenEvent { id: pick });
        app.world_mut().send_event(LevelUpEvent { player, new_level: 3 });
        app.world_mut().send_event(LevelUpEvent { player, new_level: 4 });
        app.update();
        assert!(progression(&app).pending_level_ups() > 0);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::MainMenu);
        app.update();

        assert!(!progression(&app).is_awaiting_choice());
        assert_eq!(progression(&app).pending_level_ups(), 0);
        assert!(progression(&app).ledger().is_empty());
    }

    #[test]
    fn broken_configuration_keeps_the_game_loading() {
        let mut app = base_app();
        app.insert_resource(PowerUpSettings {
            config_path: PathBuf::from("assets/data/missing-powerups.ron"),
            ..default()
        })
        .add_plugins((CorePlugin, PowerUpPlugin));

        app.update();
        app.update();
        app.update();

        assert!(!app.world().contains_resource::<PowerUpProgression>());
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Loading
        );
    }

    #[test]
    fn bundled_data_file_loads_with_fixed_seed() {
        let settings = PowerUpSettings {
            seed: Some(11),
            choices_per_level: Some(2),
            ..default()
        };

        let progression = PowerUpProgression::load(&settings).unwrap();

        assert!(!progression.catalog().is_empty());
        assert_eq!(progression.choices_per_level(), 2);
    }
}
