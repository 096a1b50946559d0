//! Particle text: DOM scan, spawn after fonts load, draw loop.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::dom;
use super::frame::AnimationLoop;
use crate::config::EDGE_GLOW_BLUR;
use crate::error::Result;
use crate::field::{ParticleField, SpawnStats};
use crate::throttle::Throttle;

struct Scene {
    field: ParticleField,
    throttle: Throttle,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Scene {
    fn frame(&mut self, now: f64) {
        if self.field.step(now) {
            self.draw();
        }
    }

    fn draw(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#000000");
        ctx.fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

        for p in self.field.particles() {
            let color = p.fill_style();
            let pos = p.pos();
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            if ctx.arc(pos.x as f64, pos.y as f64, p.size() as f64, 0.0, TAU).is_err() {
                continue;
            }
            ctx.fill();

            if p.is_edge() {
                ctx.set_shadow_blur(EDGE_GLOW_BLUR);
                ctx.set_shadow_color(color);
                ctx.fill();
                ctx.set_shadow_blur(0.0);
            }
        }
    }
}

/// Start the particle-text animation on the canvas with the given id.
pub fn start(canvas_id: &str) -> Result<AnimationLoop> {
    let (window, document) = dom::window_and_document()?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let config = dom::text_config(&canvas);
    let ctx = dom::context_2d(&canvas, true)?;
    fit_canvas(&canvas);

    let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    let scene = Rc::new(RefCell::new(Scene {
        field: ParticleField::new(&config, seed),
        throttle: Throttle::new(config.throttle_ms),
        canvas,
        ctx,
    }));

    {
        // Particles are kept on resize; only the surface follows the page.
        let scene = Rc::clone(&scene);
        dom::listen(&window, "resize", move |_| fit_canvas(&scene.borrow().canvas))?;
    }
    {
        let scene = Rc::clone(&scene);
        let win = window.clone();
        dom::listen(&window, "mousemove", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut scene = scene.borrow_mut();
            if scene.throttle.admit(dom::now(&win)) {
                scene.field.set_pointer(e.page_x() as f32, e.page_y() as f32);
            }
        })?;
    }
    {
        let scene = Rc::clone(&scene);
        let doc = document.clone();
        dom::listen(&document, "visibilitychange", move |_| {
            scene.borrow_mut().field.set_paused(doc.hidden());
        })?;
    }

    spawn_local(populate(Rc::clone(&scene)));

    AnimationLoop::start(move |ts| scene.borrow_mut().frame(ts))
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    let Ok((window, document)) = dom::window_and_document() else {
        return;
    };
    canvas.set_width(dom::viewport_width(&window));
    canvas.set_height(dom::document_height(&window, &document));
}

async fn populate(scene: Rc<RefCell<Scene>>) {
    match spawn_particles(&scene).await {
        Ok(stats) => log::info!(
            "spawned {} text particles ({} edge, {} fill)",
            stats.total(),
            stats.edge,
            stats.fill
        ),
        Err(e) => log::error!("particle text spawn failed: {e}"),
    }
}

// Wait for web fonts so glyphs are not sampled from a fallback face.
async fn spawn_particles(scene: &RefCell<Scene>) -> Result<SpawnStats> {
    let (window, document) = dom::window_and_document()?;
    JsFuture::from(document.fonts().ready()?).await?;

    let elements = dom::text_elements(&window, &document)?;
    let extent = dom::document_extent(&window, &document);

    let mut scene = scene.borrow_mut();
    let mut total = SpawnStats::default();
    for el in &elements {
        let raster = match dom::rasterize(&document, &el.text, el.font_size) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping {:?}: {e}", el.text);
                continue;
            }
        };
        let stats = scene.field.spawn_text(el, &raster.mask, raster.text_width, extent);
        log::debug!("{:?} at {}px -> {} particles", el.text, el.font_size, stats.total());
        total.edge += stats.edge;
        total.fill += stats.fill;
    }
    scene.field.arm(dom::now(&window));
    Ok(total)
}
