//! Game settings and preferences
//!
//! Gameplay tuning plus audio preferences. Nothing here is persisted; the
//! browser shell and the native demo may load overrides from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Balloons spawned on every reset
    pub balloon_count: usize,
    /// Claw sweep speed (pixels per tick)
    pub claw_speed: f32,
    /// Claw x after a reset
    pub claw_start_x: f32,
    /// Fixed claw height
    pub claw_y: f32,
    /// Arrow fall per tick
    pub drop_step: f32,
    /// Balloon hit box width
    pub balloon_width: f32,
    /// Balloon hit box height
    pub balloon_height: f32,
    /// Horizontal keep-out when spawning balloons
    pub spawn_margin: f32,
    /// Score per popped balloon
    pub points_per_pop: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambience loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Pause the ambience loop while the page is hidden
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            balloon_count: BALLOON_COUNT,
            claw_speed: CLAW_SPEED,
            claw_start_x: CLAW_START_X,
            claw_y: CLAW_Y,
            drop_step: DROP_STEP,
            balloon_width: BALLOON_WIDTH,
            balloon_height: BALLOON_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            points_per_pop: POINTS_PER_POP,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.3,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse settings from JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} balloons)", settings.balloon_count);
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.balloon_count = self.balloon_count.min(MAX_BALLOON_COUNT);
        self.claw_start_x = finite_or(self.claw_start_x, defaults.claw_start_x);
        self.claw_y = finite_or(self.claw_y, defaults.claw_y);
        self.claw_speed = positive_or(self.claw_speed, defaults.claw_speed);
        self.drop_step = positive_or(self.drop_step, defaults.drop_step);
        self.balloon_width = positive_or(self.balloon_width, defaults.balloon_width);
        self.balloon_height = positive_or(self.balloon_height, defaults.balloon_height);
        self.spawn_margin = self.spawn_margin.max(0.0);

        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective ambience volume
    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Keep positive finite values, otherwise use the fallback
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}
