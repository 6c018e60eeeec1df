use rand::{rngs::StdRng, Rng, SeedableRng};

use super::ImpulseState;
use crate::{field::Grid, math::Vec2};

/// Drives [ImpulseState] with radial splashes at random places and random
/// intervals, standing in for pointer input.
pub struct DropletGenerator {
    accumulator_ms: f32,
    next_drop_ms: f32,
    delay_ms: f32,
    rng: StdRng,
}

impl DropletGenerator {
    /// Droplets arrive every `delay_ms` on average. The first one falls on
    /// the first frame.
    pub fn new(delay_ms: f32) -> Self {
        Self::with_rng(delay_ms, StdRng::from_entropy())
    }

    /// A reproducible generator.
    pub fn with_seed(delay_ms: f32, seed: u64) -> Self {
        Self::with_rng(delay_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay_ms: f32, rng: StdRng) -> Self {
        Self {
            accumulator_ms: 0.0,
            next_drop_ms: 0.0,
            delay_ms,
            rng,
        }
    }

    /// Advance by `dt` seconds and write this frame's impulse.
    ///
    /// When the accumulated time reaches the next drop, a radial impulse
    /// between two random cells is written and the next threshold is drawn
    /// from `[delay / 2, 1.5 * delay]`. Otherwise every flag is cleared.
    /// Returns true when a droplet fell.
    pub fn drive(
        &mut self,
        dt: f32,
        grid: &Grid,
        impulse: &mut ImpulseState,
    ) -> bool {
        self.accumulator_ms += dt * 1000.0;
        if self.accumulator_ms < self.next_drop_ms {
            impulse.deactivate();
            return false;
        }

        self.accumulator_ms = 0.0;
        self.next_drop_ms = self
            .rng
            .gen_range(0.5 * self.delay_ms..=1.5 * self.delay_ms);

        let from = self.random_cell(grid);
        let to = self.random_cell(grid);
        impulse.set_stroke(from, to, true);
        log::trace!(
            "droplet at ({:.0}, {:.0}), next in {:.0}ms",
            to.x,
            to.y,
            self.next_drop_ms
        );
        true
    }

    pub fn next_drop_ms(&self) -> f32 {
        self.next_drop_ms
    }

    fn random_cell(&mut self, grid: &Grid) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0..grid.width()) as f32,
            self.rng.gen_range(0..grid.height()) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impulse::Injection;

    #[test]
    fn first_frame_drops_and_later_frames_wait() {
        let grid = Grid::new(66, 66).unwrap();
        let mut droplets = DropletGenerator::with_seed(1000.0, 7);
        let mut impulse = ImpulseState::default();

        assert!(droplets.drive(0.016, &grid, &mut impulse));
        assert_eq!(impulse.injection(), Some(Injection::Radial));
        assert!(impulse.ink_active);

        assert!(!droplets.drive(0.016, &grid, &mut impulse));
        assert_eq!(impulse.injection(), None);
        assert!(!impulse.ink_active && !impulse.radial);
    }

    #[test]
    fn thresholds_stay_within_half_to_one_and_a_half_delays() {
        let grid = Grid::new(10, 10).unwrap();
        let mut droplets = DropletGenerator::with_seed(200.0, 11);
        let mut impulse = ImpulseState::default();
        let mut frames_since_drop = 0;
        let mut drops = 0;

        for _ in 0..5_000 {
            frames_since_drop += 1;
            if droplets.drive(0.001, &grid, &mut impulse) {
                drops += 1;
                assert!((100.0..=300.0).contains(&droplets.next_drop_ms()));
                // the accumulator restarts at zero on the drop frame
                if drops > 1 {
                    assert!((100..=302).contains(&frames_since_drop));
                }
                frames_since_drop = 0;
            }
        }
        assert!(drops > 10);
    }

    #[test]
    fn positions_land_on_the_grid() {
        let grid = Grid::new(20, 8).unwrap();
        let mut droplets = DropletGenerator::with_seed(1.0, 3);
        let mut impulse = ImpulseState::default();
        for _ in 0..200 {
            if droplets.drive(1.0, &grid, &mut impulse) {
                for p in [impulse.last_pos, impulse.current_pos].iter() {
                    assert!(p.x >= 0.0 && p.x < 20.0);
                    assert!(p.y >= 0.0 && p.y < 8.0);
                }
                assert_eq!(
                    impulse.delta,
                    impulse.current_pos - impulse.last_pos
                );
            }
        }
    }
}
