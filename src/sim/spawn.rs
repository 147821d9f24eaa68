//! Balloon layout generation

use glam::Vec2;
use rand::Rng;

use super::state::{Balloon, BalloonColor, Viewport};
use crate::consts::{SPAWN_MARGIN, SPAWN_SPAN_FRACTION, SPAWN_TOP_FRACTION};

/// Spawn `count` balloons at random positions.
///
/// x is uniform across the width minus a margin on each side, y is uniform in
/// the 30%..80% band of the height. Overlaps are allowed.
pub fn spawn_balloons<R: Rng>(count: usize, viewport: Viewport, rng: &mut R) -> Vec<Balloon> {
    spawn_balloons_with_margin(count, viewport, SPAWN_MARGIN, rng)
}

/// Same as [`spawn_balloons`] with an explicit horizontal margin
pub fn spawn_balloons_with_margin<R: Rng>(
    count: usize,
    viewport: Viewport,
    margin: f32,
    rng: &mut R,
) -> Vec<Balloon> {
    let min_x = margin;
    let max_x = viewport.width - margin;

    (0..count)
        .map(|_| {
            // Narrow viewport: collapse onto the centre instead of an inverted range
            let x = if max_x > min_x {
                rng.random_range(min_x..=max_x)
            } else {
                viewport.width / 2.0
            };
            let y = viewport.height * SPAWN_TOP_FRACTION
                + rng.random::<f32>() * viewport.height * SPAWN_SPAN_FRACTION;
            let color = BalloonColor::ALL[rng.random_range(0..BalloonColor::ALL.len())];
            Balloon {
                pos: Vec2::new(x, y),
                color,
            }
        })
        .collect()
}
