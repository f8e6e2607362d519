//! Drifting background particles. Purely decorative; nothing here reads or
//! writes [`crate::state::AppState`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance past the canvas edge before a particle wraps around.
pub const WRAP_MARGIN: f64 = 10.0;
/// One particle per this many pixels of canvas width.
const PIXELS_PER_PARTICLE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub dx: f64,
    pub dy: f64,
    pub hue: f64,
}

impl Particle {
    /// CSS fill used when drawing this particle.
    #[must_use]
    pub fn fill_style(&self) -> String {
        format!("hsla({:.0}, 70%, 60%, 0.08)", self.hue)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl ParticleField {
    #[must_use]
    pub fn seeded(width: f64, height: f64, seed: u64) -> Self {
        let mut field = Self {
            width: width.max(0.0),
            height: height.max(0.0),
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        field.populate();
        field
    }

    fn populate(&mut self) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (self.width / PIXELS_PER_PARTICLE).floor() as usize;
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..=width),
                y: rng.gen_range(0.0..=height),
                radius: 0.6 + rng.gen_range(0.0..2.0),
                dx: (rng.gen_range(0.0..1.0) - 0.5) * 0.3,
                dy: (rng.gen_range(0.0..1.0) - 0.5) * 0.3,
                hue: 140.0 + rng.gen_range(0.0..80.0),
            })
            .collect();
    }

    /// Match a new canvas size; the field is re-seeded from the running generator.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.populate();
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.x = wrap(p.x + p.dx, width);
            p.y = wrap(p.y + p.dy, height);
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

fn wrap(value: f64, extent: f64) -> f64 {
    if value < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if value > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}
