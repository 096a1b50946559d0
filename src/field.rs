//! The full set of text particles plus the frame-level state around them.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::TextConfig;
use crate::particle::{FrameContext, Particle, Pointer};
use crate::raster::{sample, sample_gap, AlphaMask, Placement, TextElement};

/// Counts from one spawn pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnStats {
    pub edge: usize,
    pub fill: usize,
}

impl SpawnStats {
    pub fn total(&self) -> usize {
        self.edge + self.fill
    }
}

/// Delays seeking until a fixed interval after particles are spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationGate {
    warmup_ms: f64,
    spawned_at: Option<f64>,
}

impl FormationGate {
    pub fn new(warmup_ms: f64) -> Self {
        Self { warmup_ms, spawned_at: None }
    }

    pub fn arm(&mut self, now_ms: f64) {
        self.spawned_at = Some(now_ms);
    }

    pub fn is_open(&self, now_ms: f64) -> bool {
        self.spawned_at
            .is_some_and(|t| now_ms - t >= self.warmup_ms)
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    pointer: Pointer,
    gate: FormationGate,
    paused: bool,
    rng: SmallRng,
}

impl ParticleField {
    pub fn new(config: &TextConfig, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            pointer: Pointer::new(config.pointer_radius),
            gate: FormationGate::new(config.warmup_ms),
            paused: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Spawn one particle per opaque sample of `mask`, scattered over
    /// `extent` (viewport width by document height).
    pub fn spawn_text(
        &mut self,
        element: &TextElement,
        mask: &AlphaMask,
        text_width: f64,
        extent: Vec2,
    ) -> SpawnStats {
        let placement = Placement::new(element, text_width);
        let mut stats = SpawnStats::default();
        for s in sample(mask, sample_gap(element.font_size)) {
            let start = Vec2::new(
                self.rng.gen::<f32>() * extent.x,
                self.rng.gen::<f32>() * extent.y,
            );
            let p = Particle::new(placement.to_document(&s), start, s.is_edge, &mut self.rng);
            self.particles.push(p);
            if s.is_edge {
                stats.edge += 1;
            } else {
                stats.fill += 1;
            }
        }
        stats
    }

    /// Start the warm-up clock; seeking begins once it runs out.
    pub fn arm(&mut self, now_ms: f64) {
        self.gate.arm(now_ms);
    }

    pub fn can_form(&self, now_ms: f64) -> bool {
        self.gate.is_open(now_ms)
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer.position = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.position = None;
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance every particle one frame. Returns false, doing nothing, while
    /// paused.
    pub fn step(&mut self, now_ms: f64) -> bool {
        if self.paused {
            return false;
        }
        let ctx = FrameContext { can_form: self.can_form(now_ms), pointer: self.pointer };
        for p in &mut self.particles {
            p.update(&ctx, &mut self.rng);
        }
        true
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
