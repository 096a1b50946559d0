//! Per-profile rules for particles that have reached their target.
//!
//! Edge particles hold still to draw a crisp outline; fill particles circle
//! their target with a little noise so the interior shimmers.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::{
    EDGE_EASE, EDGE_FRICTION, EDGE_MAX_SPEED, EDGE_PULL, FILL_EASE, FILL_FRICTION, FILL_JITTER,
    FILL_MAX_SPEED, FILL_ORBIT_PULL,
};

/// Motion profile, fixed when the particle is spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Profile {
    Edge,
    Fill(Orbit),
}

impl Profile {
    pub fn edge() -> Self {
        Profile::Edge
    }

    pub fn fill<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Profile::Fill(Orbit::random(rng))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Profile::Edge)
    }

    pub fn friction(&self) -> f32 {
        match self {
            Profile::Edge => EDGE_FRICTION,
            Profile::Fill(_) => FILL_FRICTION,
        }
    }

    pub fn ease(&self) -> f32 {
        match self {
            Profile::Edge => EDGE_EASE,
            Profile::Fill(_) => FILL_EASE,
        }
    }

    /// Velocity after the formed-state rule for this profile.
    pub fn hold<R: Rng + ?Sized>(
        &mut self,
        base: Vec2,
        pos: Vec2,
        vel: Vec2,
        rng: &mut R,
    ) -> Vec2 {
        match self {
            Profile::Edge => edge_hold(base - pos, vel),
            Profile::Fill(orbit) => orbit.shimmer(base, pos, vel, rng),
        }
    }
}

/// Snap hard toward the target, but never faster than a crawl.
pub fn edge_hold(to_target: Vec2, vel: Vec2) -> Vec2 {
    (vel + to_target * EDGE_PULL).clamp_length_max(EDGE_MAX_SPEED)
}

/// Slowly rotating orbit around a fill particle's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub angle: f32,
    pub angle_speed: f32,
    pub radius: f32,
}

impl Orbit {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            angle: rng.gen_range(0.0f32..TAU),
            angle_speed: rng.gen_range(-0.0075f32..0.0075),
            radius: rng.gen_range(1.0f32..3.0),
        }
    }

    /// Point on the orbit the particle is currently chasing.
    pub fn point(&self, base: Vec2) -> Vec2 {
        base + Vec2::new(self.angle.cos(), self.angle.sin()) * self.radius * 2.0
    }

    /// Advance the orbit and return the new velocity.
    pub fn shimmer<R: Rng + ?Sized>(
        &mut self,
        base: Vec2,
        pos: Vec2,
        vel: Vec2,
        rng: &mut R,
    ) -> Vec2 {
        self.angle += self.angle_speed;
        let pull = (self.point(base) - pos) * FILL_ORBIT_PULL;
        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * FILL_JITTER;
        (vel + pull + jitter).clamp_length_max(FILL_MAX_SPEED)
    }
}
