use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use web_sys::CanvasRenderingContext2d;

use super::dom;
use super::frame::AnimationLoop;
use crate::column::{Column, ColumnFrame, Stroke};
use crate::config::COLUMN_FADE;
use crate::error::Result;

/// Start the ambient animation on the canvas with the given id.
pub fn start(canvas_id: &str) -> Result<AnimationLoop> {
    let (window, document) = dom::window_and_document()?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let config = dom::column_config(&canvas);
    let ctx = dom::context_2d(&canvas, false)?;

    let height = dom::viewport_height(&window);
    canvas.set_width(config.width);
    canvas.set_height(height);
    let column = Rc::new(RefCell::new(Column::new(config.width, height)));

    {
        let column = Rc::clone(&column);
        let canvas = canvas.clone();
        let win = window.clone();
        dom::listen(&window, "resize", move |_| {
            let h = dom::viewport_height(&win);
            canvas.set_height(h);
            column.borrow_mut().resize(h);
        })?;
    }

    AnimationLoop::start(move |_| {
        let mut column = column.borrow_mut();
        column.tick();
        ctx.set_fill_style_str(COLUMN_FADE);
        ctx.fill_rect(0.0, 0.0, column.width() as f64, column.height() as f64);
        draw(&ctx, &column.frame());
    })
}

fn draw(ctx: &CanvasRenderingContext2d, frame: &ColumnFrame) {
    for wave in &frame.waves {
        stroke(ctx, wave);
    }
    for mark in &frame.spirals {
        let dot = &mark.dot;
        ctx.begin_path();
        if ctx.arc(dot.center.x, dot.center.y, dot.radius, 0.0, TAU).is_ok() {
            ctx.set_fill_style_str(&dot.color.css());
            ctx.fill();
        }
        if let Some(link) = &mark.link {
            stroke(ctx, link);
        }
    }
    for guide in &frame.guides {
        stroke(ctx, guide);
    }
}

fn stroke(ctx: &CanvasRenderingContext2d, s: &Stroke) {
    let Some((first, rest)) = s.points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.set_stroke_style_str(&s.color.css());
    ctx.set_line_width(s.width);
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
}
