//! Glyph bitmaps and the sampling that turns them into particle targets.
//!
//! The browser does the actual text rasterization (see `wasm::dom`); this
//! module only sees the resulting alpha channel, so everything here runs and
//! tests on the host.

use glam::Vec2;

use crate::config::{
    ALPHA_THRESHOLD, BITMAP_HEIGHT_FACTOR, EDGE_RADIUS, GAP_DIVISOR, MIN_GAP,
};

/// Alpha channel of an offscreen text bitmap, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Missing pixels read as transparent; extra bytes are dropped.
    pub fn new(width: u32, height: u32, mut alpha: Vec<u8>) -> Self {
        alpha.resize((width * height) as usize, 0);
        Self { width, height, alpha }
    }

    pub fn empty() -> Self {
        Self { width: 0, height: 0, alpha: Vec::new() }
    }

    /// Keep only the alpha byte of each RGBA pixel.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Self::new(width, height, alpha)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// Alpha at (x, y); anything outside the bitmap is transparent.
    #[inline]
    pub fn alpha_at(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.alpha[(y as u32 * self.width + x as u32) as usize]
    }

    #[inline]
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.alpha_at(x, y) > ALPHA_THRESHOLD
    }

    /// True when any pixel in the 5x5 window around (x, y), centre excluded,
    /// falls below the threshold.
    pub fn is_edge(&self, x: i32, y: i32) -> bool {
        for dy in -EDGE_RADIUS..=EDGE_RADIUS {
            for dx in -EDGE_RADIUS..=EDGE_RADIUS {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.alpha_at(x + dx, y + dy) < ALPHA_THRESHOLD {
                    return true;
                }
            }
        }
        false
    }
}

/// Sampling stride for a font size; large text samples sparser.
pub fn sample_gap(font_size: f64) -> u32 {
    ((font_size / GAP_DIVISOR).floor() as u32).max(MIN_GAP)
}

/// Parse a computed CSS font size such as `"48px"`.
pub fn parse_font_size(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Bitmap dimensions for text of the given measured width: the height is
/// padded to 1.5x the font size so ascenders and descenders fit.
pub fn bitmap_size(text_width: f64, font_size: f64) -> (u32, u32) {
    let w = text_width.max(0.0).floor() as u32;
    let h = (font_size * BITMAP_HEIGHT_FACTOR).max(0.0).floor() as u32;
    (w, h)
}

/// One accepted bitmap sample in bitmap-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub x: u32,
    pub y: u32,
    pub is_edge: bool,
}

/// Walk the mask on a `gap` grid, keeping opaque points and classifying each
/// as edge or fill. Row-major order.
pub fn sample(mask: &AlphaMask, gap: u32) -> Vec<Sample> {
    let gap = gap.max(1) as usize;
    let mut out = Vec::new();
    for y in (0..mask.height()).step_by(gap) {
        for x in (0..mask.width()).step_by(gap) {
            let (xi, yi) = (x as i32, y as i32);
            if !mask.is_opaque(xi, yi) {
                continue;
            }
            out.push(Sample { x, y, is_edge: mask.is_edge(xi, yi) });
        }
    }
    out
}

/// A page element whose text is rendered as particles.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    /// Centre of the element's layout box in document coordinates.
    pub anchor: Vec2,
    pub font_size: f64,
}

impl TextElement {
    /// Build from a client rect and the scroll offset at init time.
    pub fn from_rect(
        text: impl Into<String>,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        scroll_y: f64,
        font_size: f64,
    ) -> Self {
        Self {
            text: text.into(),
            anchor: Vec2::new(
                (left + width / 2.0) as f32,
                (top + scroll_y + height / 2.0) as f32,
            ),
            font_size,
        }
    }
}

/// Maps bitmap pixels of a rasterized element into document space.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    origin: Vec2,
}

impl Placement {
    pub fn new(element: &TextElement, text_width: f64) -> Self {
        let origin = element.anchor
            - Vec2::new((text_width / 2.0) as f32, (element.font_size / 2.0) as f32);
        Self { origin }
    }

    #[inline]
    pub fn to_document(&self, s: &Sample) -> Vec2 {
        self.origin + Vec2::new(s.x as f32, s.y as f32)
    }
}
