//! Arrow vs balloon hit testing
//!
//! Balloons are drawn as ellipses but hit-tested against their bounding box.
//! Every balloon overlapping the arrow tip pops in the same tick.

use glam::Vec2;

use super::state::Balloon;

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopOutcome {
    /// Removed balloons, in spawn order
    pub popped: Vec<Balloon>,
}

impl PopOutcome {
    pub fn any(&self) -> bool {
        !self.popped.is_empty()
    }

    pub fn count(&self) -> usize {
        self.popped.len()
    }
}

/// Box test between the arrow tip and a balloon's bounding box (strict)
#[inline]
pub fn balloon_hit(tip: Vec2, balloon: &Balloon, width: f32, height: f32) -> bool {
    let d = (tip - balloon.pos).abs();
    d.x < width / 2.0 && d.y < height / 2.0
}

/// Remove every balloon hit by the arrow tip
pub fn pop_balloons(
    balloons: &mut Vec<Balloon>,
    tip: Vec2,
    width: f32,
    height: f32,
) -> PopOutcome {
    let mut outcome = PopOutcome::default();
    balloons.retain(|b| {
        if balloon_hit(tip, b, width, height) {
            outcome.popped.push(*b);
            false
        } else {
            true
        }
    });
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALLOON_HEIGHT, BALLOON_WIDTH};
    use crate::sim::state::BalloonColor;

    fn balloon(x: f32, y: f32) -> Balloon {
        Balloon {
            pos: Vec2::new(x, y),
            color: BalloonColor::SkyBlue,
        }
    }

    #[test]
    fn test_hit_centre() {
        let b = balloon(100.0, 100.0);
        assert!(balloon_hit(Vec2::new(100.0, 100.0), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
    }

    #[test]
    fn test_miss_horizontal() {
        let b = balloon(100.0, 100.0);
        // dx = 26 >= 25
        assert!(!balloon_hit(Vec2::new(126.0, 100.0), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
        // exactly on the edge is still a miss
        assert!(!balloon_hit(Vec2::new(125.0, 100.0), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
        assert!(balloon_hit(Vec2::new(124.0, 100.0), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
    }

    #[test]
    fn test_box_not_ellipse() {
        // Corner of the bounding box: outside the ellipse, inside the box
        let b = balloon(100.0, 100.0);
        assert!(balloon_hit(Vec2::new(124.0, 117.0), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
        assert!(!balloon_hit(Vec2::new(100.0, 117.5), &b, BALLOON_WIDTH, BALLOON_HEIGHT));
    }

    #[test]
    fn test_pop_removes_all_overlapping() {
        let mut balloons = vec![
            balloon(100.0, 100.0),
            balloon(500.0, 100.0),
            balloon(110.0, 105.0),
        ];
        let tip = Vec2::new(105.0, 100.0);
        let outcome = pop_balloons(&mut balloons, tip, BALLOON_WIDTH, BALLOON_HEIGHT);
        assert_eq!(outcome.count(), 2);
        assert_eq!(outcome.popped[0].pos.x, 100.0);
        assert_eq!(outcome.popped[1].pos.x, 110.0);
        assert_eq!(balloons.len(), 1);
        assert_eq!(balloons[0].pos.x, 500.0);
    }

    #[test]
    fn test_pop_nothing() {
        let mut balloons = vec![balloon(100.0, 100.0)];
        let tip = Vec2::new(300.0, 300.0);
        let outcome = pop_balloons(&mut balloons, tip, BALLOON_WIDTH, BALLOON_HEIGHT);
        assert!(!outcome.any());
        assert_eq!(balloons.len(), 1);
    }
}
