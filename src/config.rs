//! Tuning constants and the runtime settings built from them.
//!
//! The constants are the hand-tuned values the animations were designed
//! around. `TextConfig` and `ColumnConfig` carry the few knobs a page may
//! override through `data-*` attributes on its canvases.

/// Attribute marking an element whose text is rendered as particles.
pub const TEXT_ATTRIBUTE: &str = "data-particle-text";

pub const PARTICLE_CANVAS_ID: &str = "particleCanvas";
pub const LEFT_COLUMN_ID: &str = "leftColumn";
pub const RIGHT_COLUMN_ID: &str = "rightColumn";

pub const FONT_FAMILY: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

// Rasterization
pub const ALPHA_THRESHOLD: u8 = 128;
pub const EDGE_RADIUS: i32 = 2;
pub const BITMAP_HEIGHT_FACTOR: f64 = 1.5;
pub const BASELINE_FACTOR: f64 = 0.75;
pub const MIN_GAP: u32 = 2;
pub const GAP_DIVISOR: f64 = 25.0;

// Motion
pub const FORM_THRESHOLD: f32 = 2.0;
pub const IDLE_ACCEL: f32 = 0.1;
pub const IDLE_MAX_SPEED: f32 = 0.5;
pub const IDLE_DAMPING: f32 = 0.98;
pub const REPULSION_SCALE: f32 = 0.3;
pub const EDGE_PULL: f32 = 0.5;
pub const EDGE_MAX_SPEED: f32 = 0.1;
pub const EDGE_FRICTION: f32 = 0.85;
pub const EDGE_EASE: f32 = 0.008;
pub const FILL_ORBIT_PULL: f32 = 0.04;
pub const FILL_JITTER: f32 = 0.3;
pub const FILL_MAX_SPEED: f32 = 1.2;
pub const FILL_FRICTION: f32 = 0.82;
pub const FILL_EASE: f32 = 0.006;
pub const EDGE_GLOW_BLUR: f64 = 3.0;

// Timing
pub const DEFAULT_POINTER_RADIUS: f32 = 100.0;
pub const DEFAULT_WARMUP_MS: f64 = 2000.0;
pub const DEFAULT_THROTTLE_MS: f64 = 16.0;

// Ambient columns
pub const DEFAULT_COLUMN_WIDTH: u32 = 120;
pub const COLUMN_TIME_STEP: f64 = 0.016;
pub const COLUMN_FADE: &str = "rgba(0, 0, 0, 0.1)";
pub const WAVE_COUNT: usize = 3;
pub const WAVE_STEP: u32 = 5;
pub const SPIRAL_COUNT: usize = 5;
pub const SPIRAL_DOT_RADIUS: f64 = 2.0;
pub const LINK_DISTANCE: f64 = 150.0;
pub const GUIDE_COUNT: usize = 3;
pub const GUIDE_STEP: u32 = 20;

/// Settings for the text-particle engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    pub pointer_radius: f32,
    pub warmup_ms: f64,
    pub throttle_ms: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            pointer_radius: DEFAULT_POINTER_RADIUS,
            warmup_ms: DEFAULT_WARMUP_MS,
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

impl TextConfig {
    /// Apply one `data-*` override. Returns false when the key is unknown or
    /// the value does not parse as a non-negative number.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        let Some(v) = parse_non_negative(value) else {
            return false;
        };
        match key {
            "pointer-radius" => self.pointer_radius = v as f32,
            "warmup-ms" => self.warmup_ms = v,
            "throttle-ms" => self.throttle_ms = v,
            _ => return false,
        }
        true
    }

    pub const KEYS: [&'static str; 3] = ["pointer-radius", "warmup-ms", "throttle-ms"];
}

/// Settings for one ambient side column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConfig {
    pub width: u32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self { width: DEFAULT_COLUMN_WIDTH }
    }
}

impl ColumnConfig {
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        match (key, parse_non_negative(value)) {
            ("column-width", Some(v)) if v >= 1.0 => {
                self.width = v as u32;
                true
            }
            _ => false,
        }
    }

    pub const KEYS: [&'static str; 1] = ["column-width"];
}

fn parse_non_negative(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
