//! Per-frame simulation tick
//!
//! Advances the session by one displayed frame. Nothing moves outside the
//! Playing screen; the other screens only differ in their overlay.

use glam::Vec2;

use super::collision::pop_balloons;
use super::state::{GameEvent, GameSession, Screen};

/// Advance the game by one tick and return the events it produced
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.screen != Screen::Playing {
        return events;
    }

    // Claw only sweeps while the arrow is in hand
    if !session.projectile.dropping {
        session
            .claw
            .sweep(session.settings.claw_speed, session.viewport.width);
        return events;
    }

    session.projectile.y += session.settings.drop_step;
    let tip = Vec2::new(session.claw.x, session.projectile.y);

    let outcome = pop_balloons(
        &mut session.balloons,
        tip,
        session.settings.balloon_width,
        session.settings.balloon_height,
    );
    for balloon in &outcome.popped {
        session.score = session.score.saturating_add(session.settings.points_per_pop);
        events.push(GameEvent::BalloonPopped {
            pos: balloon.pos,
            color: balloon.color,
        });
    }
    if outcome.any() {
        log::debug!("Popped {} balloon(s), score {}", outcome.count(), session.score);
    }

    // Clearing the field wins even if the arrow is also past the bottom
    if session.balloons.is_empty() {
        session.finish_round(Screen::Won);
        events.push(GameEvent::Won {
            score: session.score,
        });
    } else if outcome.any() {
        session.projectile.retract(session.claw.y);
    } else if session.projectile.y > session.viewport.height {
        session.finish_round(Screen::GameOver);
        events.push(GameEvent::Lost {
            score: session.score,
        });
    }

    events
}
