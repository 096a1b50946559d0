use glam::Vec2;
use particle_wasm::particle::{FrameContext, Particle, Pointer};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const BASE: Vec2 = Vec2::new(400.0, 300.0);

fn idle() -> FrameContext {
    FrameContext { can_form: false, pointer: Pointer::default() }
}

fn forming(pointer: Pointer) -> FrameContext {
    FrameContext { can_form: true, pointer }
}

fn settled(is_edge: bool, seed: u64) -> (Particle, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let p = Particle::new(BASE, BASE, is_edge, &mut rng);
    (p, rng)
}

#[test]
fn idle_drift_respects_speed_cap() {
    for is_edge in [true, false] {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut p = Particle::new(BASE, Vec2::ZERO, is_edge, &mut rng);
        for _ in 0..2000 {
            p.update(&idle(), &mut rng);
            assert!(p.speed() <= 0.5 + 1e-6, "speed {}", p.speed());
            assert!(!p.formed());
        }
    }
}

#[test]
fn formed_edge_is_nearly_static() {
    let (mut p, mut rng) = settled(true, 7);
    for _ in 0..500 {
        let was_close = p.pos().distance(p.base()) < 2.0;
        p.update(&forming(Pointer::default()), &mut rng);
        if was_close {
            assert!(p.formed());
            assert!(p.speed() <= 0.1 + 1e-6, "edge speed {}", p.speed());
        }
    }
    assert!(p.pos().distance(BASE) < 2.0);
}

#[test]
fn formed_fill_shimmers_within_cap() {
    let (mut p, mut rng) = settled(false, 8);
    let mut moved = false;
    for _ in 0..500 {
        let was_close = p.pos().distance(p.base()) < 2.0;
        let before = p.pos();
        p.update(&forming(Pointer::default()), &mut rng);
        if was_close {
            assert!(p.speed() <= 1.2 + 1e-5, "fill speed {}", p.speed());
        }
        moved |= p.pos() != before;
    }
    assert!(moved);
}

#[test]
fn far_pointer_does_not_disturb() {
    let (mut p, mut rng) = settled(true, 9);
    let pointer = Pointer::new(100.0).at(BASE.x + 100.0, BASE.y);
    p.update(&forming(pointer), &mut rng);
    assert!(p.formed());
}

#[test]
fn pointer_on_particle_breaks_formation() {
    let (mut p, mut rng) = settled(true, 10);
    p.update(&forming(Pointer::default()), &mut rng);
    assert!(p.formed());

    let here = p.pos();
    p.update(&forming(Pointer::new(100.0).at(here.x, here.y)), &mut rng);
    assert!(!p.formed());
    assert!(p.vel().is_finite());
}

#[test]
fn repulsion_pushes_away_and_unforms() {
    let (mut p, mut rng) = settled(false, 11);
    let pointer = Pointer::new(100.0).at(BASE.x - 10.0, BASE.y);
    p.update(&forming(pointer), &mut rng);
    assert!(!p.formed());
    assert!(p.vel().x > 0.0);
    assert!(p.pos().x > BASE.x);
}

#[test]
fn repulsion_wins_at_any_distance_to_target() {
    // Far from its target but inside the pointer radius.
    let mut rng = SmallRng::seed_from_u64(12);
    let mut p = Particle::new(BASE, Vec2::new(50.0, 50.0), true, &mut rng);
    p.update(&forming(Pointer::new(100.0).at(60.0, 50.0)), &mut rng);
    assert!(!p.formed());
}

#[test]
fn same_seed_same_trajectory() {
    let run = |seed: u64, is_edge: bool| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut p = Particle::new(BASE, Vec2::new(10.0, 20.0), is_edge, &mut rng);
        let mut trace = Vec::new();
        for frame in 0..600 {
            let ctx = if frame < 120 {
                idle()
            } else if frame % 50 < 5 {
                forming(Pointer::new(100.0).at(BASE.x + 20.0, BASE.y))
            } else {
                forming(Pointer::default())
            };
            p.update(&ctx, &mut rng);
            trace.push((p.pos(), p.formed()));
        }
        trace
    };
    for is_edge in [true, false] {
        assert_eq!(run(99, is_edge), run(99, is_edge));
    }
    assert_ne!(run(1, false), run(2, false));
}

#[test]
fn target_never_moves() {
    let mut rng = SmallRng::seed_from_u64(13);
    let mut p = Particle::new(BASE, Vec2::ZERO, false, &mut rng);
    for frame in 0..1000 {
        let pointer = Pointer::new(100.0).at((frame % 800) as f32, 300.0);
        p.update(&forming(pointer), &mut rng);
        assert_eq!(p.base(), BASE);
    }
}

#[test]
fn edges_converge_faster_than_fill() {
    let start = Vec2::new(0.0, 0.0);
    let mut rng = SmallRng::seed_from_u64(14);
    let mut edge = Particle::new(BASE, start, true, &mut rng);
    let mut rng_f = SmallRng::seed_from_u64(14);
    let mut fill = Particle::new(BASE, start, false, &mut rng_f);
    for _ in 0..20 {
        edge.update(&forming(Pointer::default()), &mut rng);
        fill.update(&forming(Pointer::default()), &mut rng_f);
    }
    assert!(edge.pos().distance(BASE) < fill.pos().distance(BASE));
}
