//! Text particles and their per-frame motion.
//!
//! A particle is born somewhere random, drifts until the field allows
//! forming, then eases toward its target pixel. Once there, its profile
//! decides how it behaves. The pointer can knock any particle loose.

mod motion;

pub use motion::{edge_hold, Orbit, Profile};

use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;
use crate::config::{
    DEFAULT_POINTER_RADIUS, FORM_THRESHOLD, IDLE_ACCEL, IDLE_DAMPING, IDLE_MAX_SPEED,
    REPULSION_SCALE,
};

/// Pointer position in document coordinates, if any has been seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub position: Option<Vec2>,
    pub radius: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER_RADIUS)
    }
}

impl Pointer {
    pub fn new(radius: f32) -> Self {
        Self { position: None, radius }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Vec2::new(x, y));
        self
    }

    /// Velocity impulse pushing a particle at `at` away from the pointer, or
    /// `None` when the particle is outside the interaction radius.
    ///
    /// A pointer sitting exactly on the particle has no direction to push in;
    /// the impulse is then zero but still counts as a hit.
    pub fn repulsion(&self, at: Vec2, density: f32) -> Option<Vec2> {
        let offset = self.position? - at;
        let distance = offset.length();
        if distance >= self.radius {
            return None;
        }
        let force = (self.radius - distance) / self.radius;
        Some(-offset.normalize_or_zero() * force * density * REPULSION_SCALE)
    }
}

/// Everything a particle needs from the outside world for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub can_form: bool,
    pub pointer: Pointer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    base: Vec2,
    pos: Vec2,
    vel: Vec2,
    profile: Profile,
    size: f32,
    density: f32,
    formed: bool,
    color: Rgba,
    fill_style: String,
}

impl Particle {
    /// Spawn a particle targeting `base`, starting at `start`, with randomized
    /// size, density and colour.
    pub fn new<R: Rng + ?Sized>(base: Vec2, start: Vec2, is_edge: bool, rng: &mut R) -> Self {
        let density = rng.gen_range(3.0f32..13.0);
        let (profile, size, color) = if is_edge {
            let shade = rng.gen_range(110..130u8);
            (Profile::edge(), rng.gen_range(1.0f32..1.4), Rgba::green_shade(shade, 1.0))
        } else {
            let shade = rng.gen_range(75..115u8);
            let alpha = rng.gen_range(0.6f32..0.9);
            (Profile::fill(rng), rng.gen_range(0.5f32..1.1), Rgba::green_shade(shade, alpha))
        };
        Self {
            base,
            pos: start,
            vel: Vec2::ZERO,
            profile,
            size,
            density,
            formed: false,
            color,
            fill_style: color.css(),
        }
    }

    pub fn base(&self) -> Vec2 {
        self.base
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_edge(&self) -> bool {
        self.profile.is_edge()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn formed(&self) -> bool {
        self.formed
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// CSS colour string, formatted once at spawn.
    pub fn fill_style(&self) -> &str {
        &self.fill_style
    }

    /// Advance one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, ctx: &FrameContext, rng: &mut R) {
        if ctx.can_form {
            self.seek(&ctx.pointer, rng);
        } else {
            self.drift(rng);
        }
        self.pos += self.vel;
    }

    // Idle float before forming is allowed. Heavy damping stands in for
    // friction here.
    fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let accel = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * IDLE_ACCEL;
        self.vel = (self.vel + accel).clamp_length_max(IDLE_MAX_SPEED) * IDLE_DAMPING;
        self.formed = false;
    }

    fn seek<R: Rng + ?Sized>(&mut self, pointer: &Pointer, rng: &mut R) {
        let to_target = self.base - self.pos;
        let repulsion = pointer.repulsion(self.pos, self.density);

        self.formed = to_target.length() < FORM_THRESHOLD && repulsion.is_none();

        if let Some(impulse) = repulsion {
            self.vel += impulse;
        }

        if self.formed {
            self.vel = self.profile.hold(self.base, self.pos, self.vel, rng);
        } else {
            self.vel += to_target * self.profile.ease();
        }

        self.vel *= self.profile.friction();
    }
}
