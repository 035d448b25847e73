//! On-screen glottis pad: a rectangle whose horizontal axis is pitch and
//! whose vertical axis is tenseness, with a cursor that tracks the current
//! scalar parameters (so gamepad and host-page writes move it too).
//!
//! Contact and latch bookkeeping lives in [`PadState`]; this module only
//! translates DOM events into its calls.

use std::cell::RefCell;
use std::rc::Rc;

use tract_core::{glottis, PadState, ProcessorParams};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::events::drain_events;

pub struct PadWiring {
    pub pad: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub params: Rc<RefCell<ProcessorParams>>,
    pub state: Rc<RefCell<PadState>>,
}

fn pad_fraction(client_x: f32, client_y: f32, pad: &web::HtmlElement) -> (f32, f32) {
    let rect = pad.get_bounding_client_rect();
    let h = (client_x - rect.left() as f32) / rect.width().max(1.0) as f32;
    let v = (client_y - rect.top() as f32) / rect.height().max(1.0) as f32;
    (h, v)
}

pub fn wire_pad_handlers(w: PadWiring) {
    let w = Rc::new(w);

    {
        let w = w.clone();
        let pad = w.pad.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let (h, v) = pad_fraction(ev.client_x() as f32, ev.client_y() as f32, &w.pad);
            let mut out = Vec::new();
            w.state.borrow_mut().press(None, h, v, &mut out);
            drain_events(&mut out, &w.params, &w.canvas);
        }) as Box<dyn FnMut(_)>);
        let _ = pad.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let pad = w.pad.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let state = w.state.borrow();
            if !state.is_active() || state.touch_id().is_some() {
                return;
            }
            let (h, v) = pad_fraction(ev.client_x() as f32, ev.client_y() as f32, &w.pad);
            let mut out = Vec::new();
            state.slide(h, v, &mut out);
            drop(state);
            drain_events(&mut out, &w.params, &w.canvas);
        }) as Box<dyn FnMut(_)>);
        let _ = pad.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            if !w.state.borrow().is_active() || w.state.borrow().touch_id().is_some() {
                return;
            }
            let mut out = Vec::new();
            w.state.borrow_mut().release(&mut out);
            drain_events(&mut out, &w.params, &w.canvas);
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    {
        let w = w.clone();
        let pad = w.pad.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            ev.prevent_default();
            if w.state.borrow().is_active() {
                return;
            }
            let touches = ev.changed_touches();
            let Some(touch) = touches.item(0) else {
                return;
            };
            let (h, v) = pad_fraction(touch.client_x() as f32, touch.client_y() as f32, &w.pad);
            let mut out = Vec::new();
            w.state
                .borrow_mut()
                .press(Some(touch.identifier()), h, v, &mut out);
            drain_events(&mut out, &w.params, &w.canvas);
        }) as Box<dyn FnMut(_)>);
        let _ =
            pad.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let w = w.clone();
        let pad = w.pad.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            ev.prevent_default();
            let Some(owner) = w.state.borrow().touch_id() else {
                return;
            };
            let touches = ev.changed_touches();
            for i in 0..touches.length() {
                if let Some(touch) = touches.item(i) {
                    if touch.identifier() == owner {
                        let (h, v) =
                            pad_fraction(touch.client_x() as f32, touch.client_y() as f32, &w.pad);
                        let mut out = Vec::new();
                        w.state.borrow().slide(h, v, &mut out);
                        drain_events(&mut out, &w.params, &w.canvas);
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = pad.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    for dom_name in ["touchend", "touchcancel"] {
        let w = w.clone();
        let pad = w.pad.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            let Some(owner) = w.state.borrow().touch_id() else {
                return;
            };
            let touches = ev.changed_touches();
            for i in 0..touches.length() {
                if let Some(touch) = touches.item(i) {
                    if touch.identifier() == owner {
                        let mut out = Vec::new();
                        w.state.borrow_mut().release(&mut out);
                        drain_events(&mut out, &w.params, &w.canvas);
                        return;
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = pad.add_event_listener_with_callback(dom_name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Keep the pad cursor in sync with the parameter tree, whichever input
/// last wrote it.
pub fn update_pad_cursor(document: &web::Document, params: &ProcessorParams) {
    let Some(cursor) = document.get_element_by_id("glottis-cursor") else {
        return;
    };
    let Some(cursor) = cursor.dyn_ref::<web::HtmlElement>() else {
        return;
    };
    let h = glottis::FrequencyRange::default().normalize(params.frequency);
    let v = glottis::tenseness_interpolation(params.tenseness);
    let style = format!(
        "left:{:.2}%;top:{:.2}%;opacity:{}",
        h * 100.0,
        v * 100.0,
        if params.intensity > 0.0 { "1" } else { "0.4" }
    );
    let _ = cursor.set_attribute("style", &style);
}
