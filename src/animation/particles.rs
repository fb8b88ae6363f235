use image::RgbImage;
use rand::Rng;

use crate::foundation::core::Rgb8;
use crate::raster::draw::fill_circle_blend;

/// One decorative point sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels (grows downward).
    pub y: f64,
    /// Radius in pixels.
    pub radius: u32,
    /// Downward speed in pixels per frame.
    pub speed: f64,
    /// Opacity on a 0..=255 scale.
    pub opacity: f64,
    /// Seconds for opacity to decay from 255 to 0.
    pub lifetime_secs: f64,
}

/// Spawn and population parameters for a [`ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Hard cap on live particles.
    pub max: usize,
    /// Population spawned when the field is created.
    pub initial: usize,
    /// New particles per frame while below `max`.
    pub spawn_rate: usize,
    /// Inclusive radius range in pixels.
    pub radius_px: (u32, u32),
    /// Inclusive speed range in pixels per frame.
    pub speed_px: (f64, f64),
    /// Inclusive lifetime range in seconds.
    pub lifetime_secs: (f64, f64),
    /// Particles below `height + exit_margin` are still alive.
    pub exit_margin: f64,
    /// Fill color.
    pub color: Rgb8,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        // Lifetimes of 20..=50 frames at a 24 fps reference.
        Self {
            max: 120,
            initial: 40,
            spawn_rate: 5,
            radius_px: (1, 3),
            speed_px: (0.5, 2.0),
            lifetime_secs: (20.0 / 24.0, 50.0 / 24.0),
            exit_margin: 5.0,
            color: [255, 255, 200],
        }
    }
}

/// Bounded particle population that drifts downward and fades out.
///
/// The random source is injected so tests can seed it; renders use an OS-seeded RNG.
#[derive(Debug)]
pub struct ParticleField<R: Rng> {
    cfg: ParticleConfig,
    width: u32,
    height: u32,
    rng: R,
    particles: Vec<Particle>,
}

impl<R: Rng> ParticleField<R> {
    /// Create a field over a `width`×`height` canvas and spawn the initial population.
    pub fn new(cfg: ParticleConfig, width: u32, height: u32, rng: R) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(cfg.max),
            cfg,
            width,
            height,
            rng,
        };
        let initial = field.cfg.initial.min(field.cfg.max);
        for _ in 0..initial {
            let p = field.spawn();
            field.particles.push(p);
        }
        field
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particle count.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when no particle is alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Configuration in use.
    pub fn config(&self) -> &ParticleConfig {
        &self.cfg
    }

    /// Drop every live particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Age every particle by one frame of `dt_secs` and drop the dead ones.
    pub fn advance(&mut self, dt_secs: f64) {
        let floor = f64::from(self.height) + self.cfg.exit_margin;
        self.particles.retain_mut(|p| {
            p.y += p.speed;
            p.opacity -= 255.0 * dt_secs / p.lifetime_secs;
            p.opacity > 0.0 && p.y < floor
        });
    }

    /// Spawn up to `spawn_rate` particles without exceeding `max`.
    pub fn replenish(&mut self) {
        let room = self.cfg.max.saturating_sub(self.particles.len());
        for _ in 0..self.cfg.spawn_rate.min(room) {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    /// [`advance`](Self::advance) then [`replenish`](Self::replenish).
    pub fn step(&mut self, dt_secs: f64) {
        self.advance(dt_secs);
        self.replenish();
    }

    /// Blend every live particle into `frame` as a filled circle.
    pub fn draw(&self, frame: &mut RgbImage) {
        for p in &self.particles {
            fill_circle_blend(
                frame,
                p.x as i32,
                p.y as i32,
                p.radius,
                self.cfg.color,
                p.opacity / 255.0,
            );
        }
    }

    fn spawn(&mut self) -> Particle {
        let (r0, r1) = self.cfg.radius_px;
        let (s0, s1) = self.cfg.speed_px;
        let (l0, l1) = self.cfg.lifetime_secs;
        Particle {
            x: f64::from(self.rng.random_range(0..=self.width)),
            y: f64::from(self.rng.random_range(0..=self.height)),
            radius: self.rng.random_range(r0..=r1.max(r0)),
            speed: self.rng.random_range(s0..=s1.max(s0)),
            opacity: 255.0,
            lifetime_secs: self.rng.random_range(l0..=l1.max(l0)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particles.rs"]
mod tests;
