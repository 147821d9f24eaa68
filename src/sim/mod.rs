//! Game simulation module
//!
//! All gameplay logic lives here:
//! - One tick per displayed frame, no wall-clock time
//! - Seeded RNG only (balloon layouts)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_action;
pub use collision::{PopOutcome, balloon_hit, pop_balloons};
pub use spawn::spawn_balloons;
pub use state::{Balloon, BalloonColor, Claw, GameEvent, GameSession, Projectile, Screen, Viewport};
pub use tick::tick;
