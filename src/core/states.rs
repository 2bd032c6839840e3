//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! abilities only fire while `PlayState::Playing`, and the choice screen
//! only exists in `PlayState::ChoosingPowerUp`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` until the power-up configuration is loaded
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run
/// - `Paused` freezes gameplay
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files. A broken power-up
    /// configuration keeps the game here.
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - enemies, abilities, experience
    #[default]
    Playing,
    /// A power-up choice screen is open, gameplay is frozen
    ChoosingPowerUp,
}
