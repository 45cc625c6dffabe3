use druid::{Color, PaintCtx, Rect, RenderContext, Size};
use druid_color_thesaurus::{blue, pink, purple, red, yellow};
use rand::Rng;

/// Host-supplied celebration input: a counter bumped once per event worth
/// celebrating (a fresh burst is spawned on every change).
pub trait CelebrationData {
    fn celebration_seq(&self) -> u64;
}

const PARTICLE_COUNT: usize = 140;
const GRAVITY: f64 = 0.2; // unit-heights per second squared
const MAX_AGE: f64 = 5.0; // seconds; stragglers are cut off here

const PALETTE: [Color; 5] = [
    blue::ARGENTINIAN_BLUE,
    purple::PURPUREUS,
    pink::CORAL_PINK,
    red::CARMINE,
    yellow::YELLOW_AMBER,
];

/// One falling flake. Position and velocity live in unit coordinates
/// (fractions of the host widget's size) so the burst is resolution
/// independent; the flake size is in pixels.
#[derive(Debug, Clone)]
struct Flake {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    width: f64,
    color: Color,
}

/// A one-shot shower of confetti, rained from the top edge of the widget
/// that hosts it.
#[derive(Debug, Clone)]
pub struct ConfettiBurst {
    flakes: Vec<Flake>,
    age: f64,
}

impl ConfettiBurst {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let flakes = (0..PARTICLE_COUNT)
            .map(|_| Flake {
                x: rng.gen::<f64>(),
                y: -0.05,
                vx: (rng.gen::<f64>() - 0.5) * 0.25,
                vy: rng.gen::<f64>() * 0.25 + 0.17,
                width: rng.gen::<f64>() * 6.0 + 4.0,
                color: PALETTE[rng.gen_range(0..PALETTE.len())].clone(),
            })
            .collect();
        ConfettiBurst { flakes, age: 0.0 }
    }

    /// Advance the shower by `dt` seconds. Returns false once every flake
    /// has left the bottom edge (or the cutoff age passed) and the burst
    /// can be dropped.
    pub fn step(&mut self, dt: f64) -> bool {
        self.age += dt;
        for flake in &mut self.flakes {
            flake.x += flake.vx * dt;
            flake.y += flake.vy * dt;
            flake.vy += GRAVITY * dt;
        }
        self.age <= MAX_AGE && self.flakes.iter().any(|flake| flake.y <= 1.05)
    }

    pub fn paint(&self, ctx: &mut PaintCtx, bounds: Size) {
        for flake in &self.flakes {
            let rect = Rect::new(
                flake.x * bounds.width,
                flake.y * bounds.height,
                flake.x * bounds.width + flake.width,
                flake.y * bounds.height + flake.width * 0.6,
            );
            ctx.fill(rect, &flake.color);
        }
    }
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_eventually_expires() {
        let mut burst = ConfettiBurst::new();
        let mut frames = 0;
        while burst.step(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 60 * 10, "burst never expired");
        }
    }

    #[test]
    fn flakes_fall_downward() {
        let mut burst = ConfettiBurst::new();
        let before: Vec<f64> = burst.flakes.iter().map(|f| f.y).collect();
        burst.step(0.1);
        for (flake, y0) in burst.flakes.iter().zip(before) {
            assert!(flake.y > y0);
        }
    }
}
