//! Thin helpers over web-sys shared by both animations.

use glam::Vec2;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement, Window,
};

use crate::config::{ColumnConfig, TextConfig, BASELINE_FACTOR, FONT_FAMILY, TEXT_ATTRIBUTE};
use crate::error::{Error, Result};
use crate::raster::{bitmap_size, parse_font_size, AlphaMask, TextElement};

pub fn window_and_document() -> Result<(Window, Document)> {
    let window = web_sys::window().ok_or(Error::NoWindow)?;
    let document = window.document().ok_or(Error::NoDocument)?;
    Ok((window, document))
}

pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingSurface(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::NotACanvas(id.to_owned()))
}

/// 2D context; `opaque` asks the browser for a canvas without alpha.
pub fn context_2d(canvas: &HtmlCanvasElement, opaque: bool) -> Result<CanvasRenderingContext2d> {
    let ctx = if opaque {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::FALSE)?;
        canvas.get_context_with_context_options("2d", &options)?
    } else {
        canvas.get_context("2d")?
    };
    ctx.ok_or(Error::ContextUnavailable("2d"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| Error::ContextUnavailable("2d"))
}

/// Register `handler` for `event` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32
}

pub fn viewport_height(window: &Window) -> u32 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32
}

/// Full scrollable height of the page, falling back to the viewport.
pub fn document_height(window: &Window, document: &Document) -> u32 {
    match document.body().map(|b| b.scroll_height()) {
        Some(h) if h > 0 => h as u32,
        _ => viewport_height(window),
    }
}

/// Viewport width by document height: the area particles scatter over.
pub fn document_extent(window: &Window, document: &Document) -> Vec2 {
    Vec2::new(
        viewport_width(window) as f32,
        document_height(window, document) as f32,
    )
}

fn read_overrides(el: &Element, keys: &[&str], mut apply: impl FnMut(&str, &str) -> bool) {
    for key in keys {
        let Some(value) = el.get_attribute(&format!("data-{key}")) else {
            continue;
        };
        if !apply(key, &value) {
            log::warn!("ignoring data-{key}={value:?} on #{}", el.id());
        }
    }
}

pub fn text_config(canvas: &HtmlCanvasElement) -> TextConfig {
    let mut cfg = TextConfig::default();
    read_overrides(canvas, &TextConfig::KEYS, |k, v| cfg.apply(k, v));
    cfg
}

pub fn column_config(canvas: &HtmlCanvasElement) -> ColumnConfig {
    let mut cfg = ColumnConfig::default();
    read_overrides(canvas, &ColumnConfig::KEYS, |k, v| cfg.apply(k, v));
    cfg
}

/// Every element tagged for particle text, measured once.
pub fn text_elements(window: &Window, document: &Document) -> Result<Vec<TextElement>> {
    let nodes = document.query_selector_all(&format!("[{TEXT_ATTRIBUTE}]"))?;
    let scroll_y = window.scroll_y()?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        match read_text_element(window, &el, scroll_y) {
            Some(t) => out.push(t),
            None => log::debug!("skipping <{}>: no usable text or font size", el.tag_name()),
        }
    }
    Ok(out)
}

fn read_text_element(window: &Window, el: &Element, scroll_y: f64) -> Option<TextElement> {
    let text = el.get_attribute(TEXT_ATTRIBUTE).filter(|t| !t.is_empty())?;
    let style = window.get_computed_style(el).ok()??;
    let font_size = parse_font_size(&style.get_property_value("font-size").ok()?)?;
    let rect = el.get_bounding_client_rect();
    Some(TextElement::from_rect(
        text,
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        scroll_y,
        font_size,
    ))
}

pub fn font(font_size: f64) -> String {
    format!("bold {font_size}px {FONT_FAMILY}")
}

/// Offscreen rendering of a text run.
pub struct RasterizedText {
    pub mask: AlphaMask,
    /// Measured advance width, before truncation to whole pixels.
    pub text_width: f64,
}

/// Draw `text` white-on-transparent into a throwaway canvas and keep its
/// alpha channel.
pub fn rasterize(document: &Document, text: &str, font_size: f64) -> Result<RasterizedText> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::NotACanvas("offscreen".into()))?;
    let ctx = context_2d(&canvas, false)?;
    let font = font(font_size);

    ctx.set_font(&font);
    let text_width = ctx.measure_text(text)?.width();
    let (w, h) = bitmap_size(text_width, font_size);
    if w == 0 || h == 0 {
        return Ok(RasterizedText { mask: AlphaMask::empty(), text_width });
    }

    // Resizing resets the context, so the font goes on again.
    canvas.set_width(w);
    canvas.set_height(h);
    ctx.set_font(&font);
    ctx.set_fill_style_str("white");
    ctx.set_text_baseline("middle");
    ctx.fill_text(text, 0.0, font_size * BASELINE_FACTOR)?;

    let image = ctx.get_image_data(0.0, 0.0, w as f64, h as f64)?;
    let rgba = image.data();
    Ok(RasterizedText { mask: AlphaMask::from_rgba(w, h, &rgba), text_width })
}
