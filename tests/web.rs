#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use particle_wasm::config::EDGE_RADIUS;
use particle_wasm::raster::{bitmap_size, sample, sample_gap, Placement, TextElement};
use particle_wasm::wasm::{rasterize, stop_animations, AnimationLoop};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn counting_loop() -> (AnimationLoop, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let frames = AnimationLoop::start(move |_| counter.set(counter.get() + 1)).unwrap();
    (frames, calls)
}

#[wasm_bindgen_test]
fn letter_a_stays_inside_padded_box() {
    let raster = rasterize(&document(), "A", 100.0).unwrap();
    let (w, h) = bitmap_size(raster.text_width, 100.0);
    assert_eq!((raster.mask.width(), raster.mask.height()), (w, h));
    assert_eq!(h, 150);

    let samples = sample(&raster.mask, sample_gap(100.0));
    assert!(!samples.is_empty());
    assert!(samples.iter().any(|s| s.is_edge));

    let el = TextElement::from_rect("A", 200.0, 100.0, 80.0, 120.0, 0.0, 100.0);
    let placement = Placement::new(&el, raster.text_width);
    let left = el.anchor.x - (raster.text_width / 2.0) as f32;
    let top = el.anchor.y - 50.0;
    for s in &samples {
        let p = placement.to_document(s);
        assert!(p.x >= left && p.x < left + w as f32, "x {} outside", p.x);
        assert!(p.y >= top && p.y < top + h as f32, "y {} outside", p.y);
    }
}

#[wasm_bindgen_test]
fn rasterizing_is_deterministic() {
    let a = rasterize(&document(), "Wave", 64.0).unwrap();
    let b = rasterize(&document(), "Wave", 64.0).unwrap();
    assert_eq!(sample(&a.mask, 2), sample(&b.mask, 2));
}

#[wasm_bindgen_test]
fn classification_matches_neighbourhood() {
    let raster = rasterize(&document(), "Hi", 80.0).unwrap();
    let mask = &raster.mask;
    for s in sample(mask, sample_gap(80.0)) {
        let (x, y) = (s.x as i32, s.y as i32);
        let mut touches_background = false;
        for dy in -EDGE_RADIUS..=EDGE_RADIUS {
            for dx in -EDGE_RADIUS..=EDGE_RADIUS {
                if (dx, dy) != (0, 0) && mask.alpha_at(x + dx, y + dy) < 128 {
                    touches_background = true;
                }
            }
        }
        assert_eq!(s.is_edge, touches_background);
    }
}

#[wasm_bindgen_test]
fn empty_text_has_no_pixels() {
    let raster = rasterize(&document(), "", 40.0).unwrap();
    assert!(raster.mask.is_empty());
    assert!(sample(&raster.mask, 2).is_empty());
}

#[wasm_bindgen_test]
async fn cancelled_loop_stops_calling_back() {
    let (frames, calls) = counting_loop();
    sleep(200).await;
    assert!(calls.get() > 0, "loop never ran");

    frames.cancel();
    frames.cancel();
    assert!(frames.is_cancelled());
    let at_cancel = calls.get();
    sleep(200).await;
    assert_eq!(calls.get(), at_cancel);
}

#[wasm_bindgen_test]
async fn loop_can_cancel_itself() {
    let calls = Rc::new(Cell::new(0u32));
    let slot: Rc<Cell<Option<AnimationLoop>>> = Rc::new(Cell::new(None));
    let (counter, handle) = (Rc::clone(&calls), Rc::clone(&slot));
    let frames = AnimationLoop::start(move |_| {
        counter.set(counter.get() + 1);
        if let Some(frames) = handle.take() {
            frames.cancel();
        }
    })
    .unwrap();
    slot.set(Some(frames.clone()));
    sleep(200).await;
    assert!(frames.is_cancelled());
    assert_eq!(calls.get(), 1);
}

#[wasm_bindgen_test]
fn stopping_twice_finds_nothing_left() {
    stop_animations();
    assert_eq!(stop_animations(), 0);
}
