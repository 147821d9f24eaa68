//! Claw of Code - a single-screen claw arcade game
//!
//! Core modules:
//! - `sim`: Game state machine (claw, arrow, balloons, scoring)
//! - `input`: Raw input events to game actions, with touch/click debounce
//! - `renderer`: WebGPU rendering of the play field
//! - `audio`: Procedural sound cues (Web Audio on wasm32)
//! - `settings`: Gameplay tuning and audio preferences
//! - `highscores`: In-memory best score for the process lifetime

pub mod audio;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use input::{Action, InputDispatcher, InputEvent, Key};
pub use settings::Settings;
pub use sim::{GameEvent, GameSession, Screen, Viewport, tick};

/// Game configuration constants
pub mod consts {
    /// Balloons spawned per round
    pub const BALLOON_COUNT: usize = 10;
    /// Upper bound accepted from settings overrides
    pub const MAX_BALLOON_COUNT: usize = 1000;
    /// Balloon ellipse bounding box (pixels)
    pub const BALLOON_WIDTH: f32 = 50.0;
    pub const BALLOON_HEIGHT: f32 = 35.0;
    /// Horizontal keep-out from the viewport edges when spawning
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Balloons spawn between these fractions of the viewport height
    pub const SPAWN_TOP_FRACTION: f32 = 0.3;
    pub const SPAWN_SPAN_FRACTION: f32 = 0.5;

    /// Claw sweep speed (pixels per tick, constant)
    pub const CLAW_SPEED: f32 = 4.0;
    /// Claw x after every reset
    pub const CLAW_START_X: f32 = 20.0;
    /// Claw height from the top of the viewport
    pub const CLAW_Y: f32 = 10.0;

    /// Arrow fall per tick
    pub const DROP_STEP: f32 = 5.0;
    /// Points per popped balloon
    pub const POINTS_PER_POP: u32 = 10;

    /// Viewport used when no display is attached (native demo, tests)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}
