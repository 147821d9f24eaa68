//! Demo player
//!
//! Picks the action an idle player would take this tick: start a round when
//! one isn't running, and drop the arrow when the claw is over a balloon.

use super::state::{GameSession, Screen};
use crate::input::Action;

/// Keeps the aim a little inside the hit box so float drift can't miss
const AIM_SLACK: f32 = 1.0;

/// Choose an action for the demo player (None = keep waiting)
pub fn choose_action(session: &GameSession) -> Option<Action> {
    match session.screen {
        Screen::Start => Some(Action::StartOrRestart),
        Screen::GameOver | Screen::Won => Some(Action::RestartAndResume),
        Screen::Playing => {
            if session.projectile.dropping {
                return None;
            }
            let reach = (session.settings.balloon_width / 2.0 - AIM_SLACK).max(0.0);
            session
                .balloons
                .iter()
                .any(|b| (b.pos.x - session.claw.x).abs() < reach)
                .then_some(Action::Fire)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Viewport, tick};

    #[test]
    fn test_demo_starts_round() {
        let session = GameSession::new(9, Viewport::default(), Settings::default());
        assert_eq!(choose_action(&session), Some(Action::StartOrRestart));
    }

    #[test]
    fn test_demo_waits_for_alignment() {
        let mut session = GameSession::new(9, Viewport::default(), Settings::default());
        session.start_or_restart();
        session.balloons.retain(|b| (b.pos.x - session.claw.x).abs() >= 24.0);
        assert_eq!(choose_action(&session), None);

        session.claw.x = session.balloons[0].pos.x;
        assert_eq!(choose_action(&session), Some(Action::Fire));
    }

    #[test]
    fn test_demo_clears_the_field() {
        let mut session = GameSession::new(2024, Viewport::default(), Settings::default());
        for _ in 0..100_000 {
            if let Some(action) = choose_action(&session) {
                if action == Action::RestartAndResume {
                    break;
                }
                action.apply(&mut session);
            }
            tick(&mut session);
        }
        assert_eq!(session.screen, Screen::Won);
        assert_eq!(session.score, 100);
        assert_eq!(session.high_score.best(), 100);
    }
}
