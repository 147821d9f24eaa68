//! Game state and core simulation types
//!
//! `GameSession` is the one mutable aggregate. The shell owns it and threads
//! it through `tick`, the input dispatcher and the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::spawn_balloons_with_margin;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::highscores::HighScore;
use crate::settings::Settings;

/// Which screen the game is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen, waiting for the first start
    Start,
    /// Active gameplay
    Playing,
    /// Arrow fell past the bottom
    GameOver,
    /// Every balloon popped
    Won,
}

impl Screen {
    /// GameOver or Won
    pub fn is_terminal(&self) -> bool {
        matches!(self, Screen::GameOver | Screen::Won)
    }
}

/// Play area size in pixels, owned by the rendering shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Taller than wide (the game wants landscape)
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Balloon palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalloonColor {
    HotPink,
    SkyBlue,
    LightYellow,
    LightGreen,
    Violet,
    PeachPuff,
    LightCoral,
    LightCyan,
}

impl BalloonColor {
    pub const ALL: [BalloonColor; 8] = [
        BalloonColor::HotPink,
        BalloonColor::SkyBlue,
        BalloonColor::LightYellow,
        BalloonColor::LightGreen,
        BalloonColor::Violet,
        BalloonColor::PeachPuff,
        BalloonColor::LightCoral,
        BalloonColor::LightCyan,
    ];

    /// CSS color keyword
    pub fn css_name(&self) -> &'static str {
        match self {
            BalloonColor::HotPink => "hotpink",
            BalloonColor::SkyBlue => "skyblue",
            BalloonColor::LightYellow => "lightyellow",
            BalloonColor::LightGreen => "lightgreen",
            BalloonColor::Violet => "violet",
            BalloonColor::PeachPuff => "peachpuff",
            BalloonColor::LightCoral => "lightcoral",
            BalloonColor::LightCyan => "lightcyan",
        }
    }

    /// sRGB-encoded RGBA for the renderer (keyword bytes / 255)
    pub fn rgba(&self) -> [f32; 4] {
        let (r, g, b) = match self {
            BalloonColor::HotPink => (255, 105, 180),
            BalloonColor::SkyBlue => (135, 206, 235),
            BalloonColor::LightYellow => (255, 255, 224),
            BalloonColor::LightGreen => (144, 238, 144),
            BalloonColor::Violet => (238, 130, 238),
            BalloonColor::PeachPuff => (255, 218, 185),
            BalloonColor::LightCoral => (240, 128, 128),
            BalloonColor::LightCyan => (224, 255, 255),
        };
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

/// A balloon target. Position is fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub pos: Vec2,
    pub color: BalloonColor,
}

/// The sweeping aim point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Claw {
    pub x: f32,
    /// Fixed height
    pub y: f32,
    /// +1.0 (right) or -1.0 (left)
    pub direction: f32,
}

impl Claw {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, direction: 1.0 }
    }

    /// Move one step; bounce off either edge (boundary inclusive)
    pub fn sweep(&mut self, speed: f32, width: f32) {
        self.x += speed * self.direction;
        if self.x <= 0.0 || self.x >= width {
            self.direction = -self.direction;
        }
    }
}

/// The falling arrow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub dropping: bool,
    pub y: f32,
}

impl Projectile {
    /// A retracted arrow resting at the claw
    pub fn retracted(claw_y: f32) -> Self {
        Self {
            dropping: false,
            y: claw_y,
        }
    }

    pub fn retract(&mut self, claw_y: f32) {
        *self = Self::retracted(claw_y);
    }
}

/// Something the shell should react to (sound cues)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// One balloon removed
    BalloonPopped { pos: Vec2, color: BalloonColor },
    /// Arrow fell past the bottom
    Lost { score: u32 },
    /// Last balloon popped
    Won { score: u32 },
}

/// Complete game state for one process
#[derive(Debug, Clone)]
pub struct GameSession {
    pub screen: Screen,
    pub claw: Claw,
    pub projectile: Projectile,
    /// Live balloons, in spawn order
    pub balloons: Vec<Balloon>,
    pub score: u32,
    pub high_score: HighScore,
    pub viewport: Viewport,
    pub settings: Settings,
    rng: Pcg32,
}

impl GameSession {
    /// Create a session on the Start screen.
    ///
    /// A first balloon layout is spawned so the field is never empty, but
    /// every start regenerates it.
    pub fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
        let mut session = Self {
            screen: Screen::Start,
            claw: Claw::new(settings.claw_start_x, settings.claw_y),
            projectile: Projectile::retracted(settings.claw_y),
            balloons: Vec::new(),
            score: 0,
            high_score: HighScore::new(),
            viewport,
            settings,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.reset();
        session
    }

    /// Claw back to the start, arrow retracted, score zeroed, new balloons.
    /// Does not touch the screen or the high score.
    pub fn reset(&mut self) {
        self.claw = Claw::new(self.settings.claw_start_x, self.settings.claw_y);
        self.projectile = Projectile::retracted(self.settings.claw_y);
        self.score = 0;
        self.balloons = spawn_balloons_with_margin(
            self.settings.balloon_count,
            self.viewport,
            self.settings.spawn_margin,
            &mut self.rng,
        );
        log::debug!("Spawned {} balloons", self.balloons.len());
    }

    /// From Start, GameOver or Won: reset and start playing.
    /// Returns false (and does nothing) while already playing.
    pub fn start_or_restart(&mut self) -> bool {
        if self.screen == Screen::Playing {
            return false;
        }
        self.reset();
        self.screen = Screen::Playing;
        log::info!("Round started ({} balloons)", self.balloons.len());
        true
    }

    /// Drop the arrow from the claw. Ignored unless playing with the arrow
    /// retracted.
    pub fn fire(&mut self) -> bool {
        if self.screen != Screen::Playing || self.projectile.dropping {
            return false;
        }
        self.projectile = Projectile {
            dropping: true,
            y: self.claw.y,
        };
        log::debug!("Arrow fired at x={:.1}", self.claw.x);
        true
    }

    /// From GameOver or Won: reset and go back to the Start screen.
    /// A following `start_or_restart` enters play.
    pub fn request_restart(&mut self) -> bool {
        if !self.screen.is_terminal() {
            return false;
        }
        self.reset();
        self.screen = Screen::Start;
        log::info!("Back to start screen");
        true
    }

    /// From GameOver or Won: reset and resume play in one step
    pub fn restart_and_resume(&mut self) -> bool {
        if !self.screen.is_terminal() {
            return false;
        }
        self.start_or_restart()
    }

    /// Update the play area. Claw bounds use it immediately; balloons pick it
    /// up on the next reset.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
        // A claw left past the new edge would flip every tick and never return
        if self.claw.x >= viewport.width {
            self.claw.x = viewport.width;
            self.claw.direction = -1.0;
        } else if self.claw.x <= 0.0 {
            self.claw.direction = 1.0;
        }
    }

    /// End the round on a terminal screen and fold the score into the high score
    pub(crate) fn finish_round(&mut self, screen: Screen) {
        debug_assert!(screen.is_terminal());
        self.projectile.retract(self.claw.y);
        self.screen = screen;
        self.high_score.record(self.score);
        log::info!("Round over: {:?}, score {}", screen, self.score);
    }

    /// Overlay text for non-playing screens (None while playing)
    pub fn overlay_lines(&self) -> Option<[String; 3]> {
        let summary = format!("Score: {} | High: {}", self.score, self.high_score.best());
        match self.screen {
            Screen::Playing => None,
            Screen::Start => Some([
                "🎮 CLAW OF CODE 🎮".to_string(),
                String::new(),
                "Tap anywhere or press ENTER to Start".to_string(),
            ]),
            Screen::GameOver => Some([
                "💀 GAME OVER 💀".to_string(),
                summary,
                "Tap or press R to Restart".to_string(),
            ]),
            Screen::Won => Some([
                "🎉 YOU WON! 🎉".to_string(),
                summary,
                "Tap or press R to Restart".to_string(),
            ]),
        }
    }

    /// Score and high score lines for the in-game HUD
    pub fn hud_lines(&self) -> [String; 2] {
        [
            format!("Score: {}", self.score),
            format!("High: {}", self.high_score.best()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(7, Viewport::default(), Settings::default())
    }

    #[test]
    fn test_new_session_on_start_screen() {
        let s = session();
        assert_eq!(s.screen, Screen::Start);
        assert_eq!(s.score, 0);
        assert!(!s.projectile.dropping);
        assert_eq!(s.balloons.len(), 10);
    }

    #[test]
    fn test_start_then_second_start_is_noop() {
        let mut s = session();
        assert!(s.start_or_restart());
        assert_eq!(s.screen, Screen::Playing);
        let balloons = s.balloons.clone();
        assert!(!s.start_or_restart());
        assert_eq!(s.balloons, balloons);
    }

    #[test]
    fn test_fire_only_while_playing_and_retracted() {
        let mut s = session();
        assert!(!s.fire());
        assert!(!s.projectile.dropping);

        s.start_or_restart();
        assert!(s.fire());
        assert!(s.projectile.dropping);
        assert_eq!(s.projectile.y, s.claw.y);
        assert!(!s.fire());
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut s = session();
        s.start_or_restart();
        s.score = 40;
        s.claw.x = 300.0;
        s.claw.direction = -1.0;
        s.balloons.truncate(2);
        s.finish_round(Screen::GameOver);

        assert!(s.start_or_restart());
        assert_eq!(s.screen, Screen::Playing);
        assert_eq!(s.score, 0);
        assert!(!s.projectile.dropping);
        assert_eq!(s.balloons.len(), 10);
        assert_eq!(s.claw.x, 20.0);
        assert_eq!(s.claw.direction, 1.0);
        assert_eq!(s.high_score.best(), 40);
    }

    #[test]
    fn test_two_step_restart() {
        let mut s = session();
        assert!(!s.request_restart());

        s.start_or_restart();
        assert!(!s.request_restart());
        s.score = 10;
        s.finish_round(Screen::Won);

        assert!(s.request_restart());
        assert_eq!(s.screen, Screen::Start);
        assert_eq!(s.score, 0);
        assert!(s.start_or_restart());
        assert_eq!(s.screen, Screen::Playing);
    }

    #[test]
    fn test_restart_and_resume_only_from_terminal() {
        let mut s = session();
        assert!(!s.restart_and_resume());
        assert_eq!(s.screen, Screen::Start);

        s.start_or_restart();
        s.finish_round(Screen::GameOver);
        assert!(s.restart_and_resume());
        assert_eq!(s.screen, Screen::Playing);
    }

    #[test]
    fn test_overlay_lines() {
        let mut s = session();
        assert_eq!(
            s.overlay_lines().unwrap()[2],
            "Tap anywhere or press ENTER to Start"
        );

        s.start_or_restart();
        assert!(s.overlay_lines().is_none());

        s.score = 20;
        s.finish_round(Screen::GameOver);
        let lines = s.overlay_lines().unwrap();
        assert_eq!(lines[0], "💀 GAME OVER 💀");
        assert_eq!(lines[1], "Score: 20 | High: 20");
    }

    #[test]
    fn test_claw_bounces_at_edges() {
        let mut claw = Claw::new(796.0, 10.0);
        claw.sweep(4.0, 800.0);
        assert_eq!(claw.x, 800.0);
        assert_eq!(claw.direction, -1.0);

        let mut claw = Claw {
            x: 4.0,
            y: 10.0,
            direction: -1.0,
        };
        claw.sweep(4.0, 800.0);
        assert_eq!(claw.x, 0.0);
        assert_eq!(claw.direction, 1.0);
    }

    #[test]
    fn test_palette_names() {
        let names: Vec<_> = BalloonColor::ALL.iter().map(|c| c.css_name()).collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"peachpuff"));
    }
}
