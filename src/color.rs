use std::fmt;

/// Straight-alpha colour, serialised as a CSS `rgba()` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Dark green derived from a single shade: red and blue follow green at
    /// 30% and 40%.
    pub fn green_shade(shade: u8, a: f32) -> Self {
        let g = shade as f32;
        Self::new((g * 0.3) as u8, shade, (g * 0.4) as u8, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Accent used by the side columns.
pub const COLUMN_ACCENT: Rgba = Rgba::new(95, 175, 127, 1.0);
