//! Pointer and touch wiring for the tract canvas.
//!
//! Mouse input uses the reserved contact `-1`; each touch carries its own
//! session-stable identifier, so several constrictions can be held at once.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use tract_core::{ProcessorParams, TractSurface, MOUSE_CONTACT};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::events::drain_events;

#[inline]
pub fn mouse_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(ev.client_x() as f32, ev.client_y() as f32, canvas)
}

#[inline]
pub fn touch_canvas_px(touch: &web::Touch, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(touch.client_x() as f32, touch.client_y() as f32, canvas)
}

/// Convert client (CSS px) coordinates into canvas backing-store pixels.
#[inline]
pub fn client_to_canvas_px(client_x: f32, client_y: f32, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left() as f32;
    let y_css = client_y - rect.top() as f32;
    let sx = (x_css / rect.width().max(1.0) as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height().max(1.0) as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub surface: Rc<RefCell<TractSurface>>,
    pub params: Rc<RefCell<ProcessorParams>>,
}

enum Phase {
    Down,
    Move,
    Up,
}

fn handle_contact(
    w: &InputWiring,
    id: i32,
    position: Option<Vec2>,
    phase: &Phase,
) {
    let mut out = Vec::new();
    {
        let mut surface = w.surface.borrow_mut();
        match (phase, position) {
            (Phase::Down, Some(pos)) => surface.contact_down(id, pos, &mut out),
            (Phase::Move, Some(pos)) => surface.contact_move(id, pos, &mut out),
            (Phase::Up, _) => surface.contact_up(id, &mut out),
            _ => {}
        }
    }
    drain_events(&mut out, &w.params, &w.canvas);
}

pub fn wire_input_handlers(w: InputWiring) {
    let w = Rc::new(w);

    // mouse
    for (dom_name, phase) in [
        ("mousedown", Phase::Down),
        ("mousemove", Phase::Move),
        ("mouseup", Phase::Up),
    ] {
        let w = w.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let pos = mouse_canvas_px(&ev, &w.canvas);
            handle_contact(&w, MOUSE_CONTACT, Some(pos), &phase);
        }) as Box<dyn FnMut(_)>);
        if dom_name == "mouseup" {
            // release anywhere, not just over the canvas
            if let Some(wnd) = web::window() {
                let _ =
                    wnd.add_event_listener_with_callback(dom_name, closure.as_ref().unchecked_ref());
            }
        } else {
            let _ =
                canvas.add_event_listener_with_callback(dom_name, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // touch; cancel is treated exactly like end
    for (dom_name, phase) in [
        ("touchstart", Phase::Down),
        ("touchmove", Phase::Move),
        ("touchend", Phase::Up),
        ("touchcancel", Phase::Up),
    ] {
        let w = w.clone();
        let canvas = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            ev.prevent_default();
            let touches = ev.changed_touches();
            for i in 0..touches.length() {
                if let Some(touch) = touches.item(i) {
                    let pos = touch_canvas_px(&touch, &w.canvas);
                    handle_contact(&w, touch.identifier(), Some(pos), &phase);
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(dom_name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
