//! Input dispatch
//!
//! Maps raw keyboard and pointer events onto the session's actions. Keyboard
//! restarts take two steps (R, then Enter); a tap restarts and resumes at once.
//! A touch is followed by a synthesized click on mobile browsers, so a touch
//! arms a guard that swallows the next click.

use crate::sim::{GameSession, Screen};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    R,
    /// Toggle demo mode
    I,
    /// Toggle mute
    M,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "r" | "R" => Key::R,
            "i" | "I" => Key::I,
            "m" | "M" => Key::M,
            _ => Key::Other,
        }
    }
}

/// A raw input event from the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Touch,
    Click,
}

/// A game action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartOrRestart,
    Fire,
    /// Terminal screen back to Start
    RequestRestart,
    /// Terminal screen straight into a new round
    RestartAndResume,
}

impl Action {
    /// Apply to the session. Returns whether anything changed.
    pub fn apply(self, session: &mut GameSession) -> bool {
        match self {
            Action::StartOrRestart => session.start_or_restart(),
            Action::Fire => session.fire(),
            Action::RequestRestart => session.request_restart(),
            Action::RestartAndResume => session.restart_and_resume(),
        }
    }
}

/// Turns raw events into actions
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    /// Set by a touch, cleared by the click that follows it
    touch_guard: bool,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self { touch_guard: false }
    }

    /// Decide which action (if any) an event maps to in the current screen
    pub fn translate(&mut self, event: InputEvent, session: &GameSession) -> Option<Action> {
        match event {
            InputEvent::KeyDown(key) => keyboard_action(key, session.screen),
            InputEvent::Touch => {
                self.touch_guard = true;
                Some(pointer_action(session.screen))
            }
            InputEvent::Click => {
                if std::mem::take(&mut self.touch_guard) {
                    log::trace!("Ignoring click synthesized from touch");
                    return None;
                }
                Some(pointer_action(session.screen))
            }
        }
    }

    /// Translate and apply. Returns whether the session changed.
    pub fn dispatch(&mut self, event: InputEvent, session: &mut GameSession) -> bool {
        match self.translate(event, session) {
            Some(action) => {
                let applied = action.apply(session);
                log::trace!("{:?} -> {:?} (applied: {})", event, action, applied);
                applied
            }
            None => false,
        }
    }
}

fn keyboard_action(key: Key, screen: Screen) -> Option<Action> {
    match (key, screen) {
        (Key::Enter, Screen::Start) => Some(Action::StartOrRestart),
        (Key::Enter, Screen::Playing) => Some(Action::Fire),
        (Key::R, Screen::GameOver | Screen::Won) => Some(Action::RequestRestart),
        _ => None,
    }
}

fn pointer_action(screen: Screen) -> Action {
    match screen {
        Screen::Start => Action::StartOrRestart,
        Screen::Playing => Action::Fire,
        Screen::GameOver | Screen::Won => Action::RestartAndResume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Viewport;

    fn session() -> GameSession {
        GameSession::new(5, Viewport::default(), Settings::default())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_dom("Enter"), Key::Enter);
        assert_eq!(Key::from_dom("r"), Key::R);
        assert_eq!(Key::from_dom("R"), Key::R);
        assert_eq!(Key::from_dom("m"), Key::M);
        assert_eq!(Key::from_dom(" "), Key::Other);
    }

    #[test]
    fn test_shell_keys_leave_session_alone() {
        let mut s = session();
        let mut input = InputDispatcher::new();
        for key in [Key::I, Key::M] {
            assert!(!input.dispatch(InputEvent::KeyDown(key), &mut s));
            assert_eq!(s.screen, Screen::Start);
        }
    }

    #[test]
    fn test_enter_starts_then_fires() {
        let mut s = session();
        let mut input = InputDispatcher::new();

        assert!(input.dispatch(InputEvent::KeyDown(Key::Enter), &mut s));
        assert_eq!(s.screen, Screen::Playing);
        assert!(!s.projectile.dropping);

        assert!(input.dispatch(InputEvent::KeyDown(Key::Enter), &mut s));
        assert!(s.projectile.dropping);

        // Repeated fire is inert
        assert!(!input.dispatch(InputEvent::KeyDown(Key::Enter), &mut s));
    }

    #[test]
    fn test_keyboard_restart_is_two_steps() {
        let mut s = session();
        let mut input = InputDispatcher::new();
        s.start_or_restart();
        s.finish_round(Screen::GameOver);

        // Enter does nothing on a terminal screen
        assert!(!input.dispatch(InputEvent::KeyDown(Key::Enter), &mut s));
        assert_eq!(s.screen, Screen::GameOver);

        assert!(input.dispatch(InputEvent::KeyDown(Key::R), &mut s));
        assert_eq!(s.screen, Screen::Start);
        assert!(input.dispatch(InputEvent::KeyDown(Key::Enter), &mut s));
        assert_eq!(s.screen, Screen::Playing);
    }

    #[test]
    fn test_r_ignored_while_playing() {
        let mut s = session();
        let mut input = InputDispatcher::new();
        s.start_or_restart();
        assert!(!input.dispatch(InputEvent::KeyDown(Key::R), &mut s));
        assert_eq!(s.screen, Screen::Playing);
    }

    #[test]
    fn test_tap_restarts_and_resumes() {
        let mut s = session();
        let mut input = InputDispatcher::new();
        s.start_or_restart();
        s.finish_round(Screen::Won);

        assert!(input.dispatch(InputEvent::Click, &mut s));
        assert_eq!(s.screen, Screen::Playing);
        assert!(!s.projectile.dropping);
    }

    #[test]
    fn test_touch_then_click_counts_once() {
        let mut s = session();
        let mut input = InputDispatcher::new();

        assert!(input.dispatch(InputEvent::Touch, &mut s));
        assert_eq!(s.screen, Screen::Playing);
        // The synthesized click must not fire the arrow
        assert!(!input.dispatch(InputEvent::Click, &mut s));
        assert!(!s.projectile.dropping);

        // A later real click fires
        assert!(input.dispatch(InputEvent::Click, &mut s));
        assert!(s.projectile.dropping);
    }
}
