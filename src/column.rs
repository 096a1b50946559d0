//! Ambient side columns: flowing waves, orbiting points and wavy guides.
//!
//! A `Column` holds nothing but its size, a time accumulator and the fixed
//! wave/spiral descriptors. Each frame is a pure function of those, built as
//! a `ColumnFrame` the canvas layer strokes verbatim.

use glam::DVec2;

use crate::color::{Rgba, COLUMN_ACCENT};
use crate::config::{
    COLUMN_TIME_STEP, GUIDE_COUNT, GUIDE_STEP, LINK_DISTANCE, SPIRAL_COUNT, SPIRAL_DOT_RADIUS,
    WAVE_COUNT, WAVE_STEP,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub offset: f64,
    pub speed: f64,
    pub amplitude: f64,
    pub frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    pub y: f64,
    pub speed: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<DVec2>,
    pub color: Rgba,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: DVec2,
    pub radius: f64,
    pub color: Rgba,
}

/// One spiral point and the line back to its predecessor, painted dot first.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralMark {
    pub dot: Dot,
    pub link: Option<Stroke>,
}

/// Everything drawn in one column frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFrame {
    pub waves: Vec<Stroke>,
    pub spirals: Vec<SpiralMark>,
    pub guides: Vec<Stroke>,
}

pub struct Column {
    width: u32,
    height: u32,
    time: f64,
    waves: [Wave; WAVE_COUNT],
    spirals: [Spiral; SPIRAL_COUNT],
}

impl Column {
    pub fn new(width: u32, height: u32) -> Self {
        let waves = std::array::from_fn(|i| {
            let i = i as f64;
            Wave {
                offset: i * 100.0,
                speed: 0.02 + i * 0.01,
                amplitude: 20.0 + i * 10.0,
                frequency: 0.01 + i * 0.005,
            }
        });
        let spirals = std::array::from_fn(|i| {
            let i = i as f64;
            Spiral { y: i * 200.0, speed: 0.5 + i * 0.2, radius: 15.0 + i * 5.0 }
        });
        Self { width, height, time: 0.0, waves, spirals }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn spirals(&self) -> &[Spiral] {
        &self.spirals
    }

    /// Only the height follows the viewport; the width is fixed.
    pub fn resize(&mut self, height: u32) {
        self.height = height;
    }

    pub fn tick(&mut self) {
        self.time += COLUMN_TIME_STEP;
    }

    fn center(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn frame(&self) -> ColumnFrame {
        let mut spirals = Vec::with_capacity(SPIRAL_COUNT);
        let mut prev: Option<DVec2> = None;
        for i in 0..SPIRAL_COUNT {
            let center = self.spiral_position(i);
            spirals.push(SpiralMark {
                dot: Dot {
                    center,
                    radius: SPIRAL_DOT_RADIUS,
                    color: COLUMN_ACCENT.with_alpha(0.6 - 0.1 * i as f32),
                },
                link: prev.and_then(|p| link(p, center)),
            });
            prev = Some(center);
        }

        ColumnFrame {
            waves: (0..WAVE_COUNT).map(|i| self.wave(i)).collect(),
            spirals,
            guides: (0..GUIDE_COUNT).map(|i| self.guide(i)).collect(),
        }
    }

    fn wave(&self, i: usize) -> Stroke {
        let wave = &self.waves[i];
        let cx = self.center();
        let points = (0..self.height)
            .step_by(WAVE_STEP as usize)
            .map(|y| {
                let y = y as f64;
                let phase = (y + self.time * 100.0) * wave.frequency + wave.offset;
                DVec2::new(cx + phase.sin() * wave.amplitude, y)
            })
            .collect();
        Stroke {
            points,
            color: COLUMN_ACCENT.with_alpha(0.3 - 0.08 * i as f32),
            width: 2.0,
        }
    }

    pub fn spiral_position(&self, i: usize) -> DVec2 {
        let spiral = &self.spirals[i];
        let mut y = spiral.y + self.time * spiral.speed * 50.0;
        if self.height > 0 {
            y = y.rem_euclid(self.height as f64);
        }
        let angle = self.time * 2.0 + i as f64;
        DVec2::new(self.center() + angle.cos() * spiral.radius, y)
    }

    fn guide(&self, i: usize) -> Stroke {
        let x = self.width as f64 / 4.0 * (i + 1) as f64;
        let offset = self.time * 50.0 + i as f64 * 100.0;
        let points = (0..self.height)
            .step_by(GUIDE_STEP as usize)
            .map(|y| {
                let y = y as f64;
                DVec2::new(x + ((y + offset) * 0.02).sin() * 5.0, y)
            })
            .collect();
        Stroke {
            points,
            color: COLUMN_ACCENT.with_alpha(0.15 - 0.03 * i as f32),
            width: 1.0,
        }
    }
}

/// Connecting line between neighbouring spiral points, fading with distance.
pub fn link(a: DVec2, b: DVec2) -> Option<Stroke> {
    let d = a.distance(b);
    if d >= LINK_DISTANCE {
        return None;
    }
    Some(Stroke {
        points: vec![a, b],
        color: COLUMN_ACCENT.with_alpha((0.2 * (1.0 - d / LINK_DISTANCE)) as f32),
        width: 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_match_tuning() {
        let col = Column::new(120, 800);
        assert_eq!(col.waves()[2].amplitude, 40.0);
        assert!((col.waves()[1].frequency - 0.015).abs() < 1e-12);
        assert_eq!(col.spirals()[4].y, 800.0);
        assert_eq!(col.spirals()[4].radius, 35.0);
    }

    #[test]
    fn polylines_cover_height() {
        let col = Column::new(120, 801);
        let frame = col.frame();
        assert_eq!(frame.waves.len(), 3);
        assert!(frame.waves.iter().all(|w| w.points.len() == 161));
        assert!(frame.guides.iter().all(|g| g.points.len() == 41));
        assert_eq!(frame.guides[0].points[0].y, 0.0);
    }

    #[test]
    fn guides_sit_on_quarter_lines() {
        let col = Column::new(120, 100);
        let frame = col.frame();
        // sin(offset * 0.02) at y = 0, t = 0 with offsets 0, 100, 200
        let expect = [30.0, 60.0 + 2f64.sin() * 5.0, 90.0 + 4f64.sin() * 5.0];
        for (g, x) in frame.guides.iter().zip(expect) {
            assert!((g.points[0].x - x).abs() < 1e-9);
        }
    }

    #[test]
    fn spirals_wrap_within_height() {
        let mut col = Column::new(120, 300);
        for _ in 0..500 {
            col.tick();
            for i in 0..SPIRAL_COUNT {
                let p = col.spiral_position(i);
                assert!(p.y >= 0.0 && p.y < 300.0);
                assert!((p.x - 60.0).abs() <= col.spirals()[i].radius + 1e-9);
            }
        }
    }

    #[test]
    fn links_only_when_close() {
        assert!(link(DVec2::ZERO, DVec2::new(0.0, 150.0)).is_none());
        let l = link(DVec2::ZERO, DVec2::new(0.0, 75.0)).unwrap();
        assert!((l.color.a - 0.1).abs() < 1e-6);
        let frame = Column::new(120, 100).frame();
        for l in frame.spirals.iter().filter_map(|m| m.link.as_ref()) {
            assert!(l.color.a > 0.0 && l.color.a <= 0.2);
        }
    }

    #[test]
    fn each_link_follows_its_dot() {
        // Neighbours start 200 apart and only come into range after wrapping.
        let mut col = Column::new(120, 300);
        let mut linked = false;
        for _ in 0..400 {
            col.tick();
            let frame = col.frame();
            assert_eq!(frame.spirals.len(), SPIRAL_COUNT);
            assert!(frame.spirals[0].link.is_none());
            for pair in frame.spirals.windows(2) {
                if let Some(l) = &pair[1].link {
                    assert_eq!(l.points, vec![pair[0].dot.center, pair[1].dot.center]);
                    linked = true;
                }
            }
        }
        assert!(linked);
    }

    #[test]
    fn zero_height_draws_nothing() {
        let frame = Column::new(120, 0).frame();
        assert!(frame.waves.iter().all(|w| w.points.is_empty()));
        assert!(frame.guides.iter().all(|g| g.points.is_empty()));
    }

    #[test]
    fn tick_advances_time() {
        let mut col = Column::new(120, 10);
        col.tick();
        col.tick();
        assert!((col.time() - 0.032).abs() < 1e-12);
    }
}
