//! Bridge between the core event queue and the page-level channel.
//!
//! Outbound: every drained [`TractEvent`] is applied to the local parameter
//! tree, and the notifications peers care about are re-dispatched as
//! bubbling CustomEvents under their historical names. Inbound: the canvas
//! listens for `setParameterTract` / `setParameter` so a host page can
//! drive the same parameters.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use tract_core::{ProcessorParams, ScalarParam, TractEvent, TractParamName};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Apply and forward every queued event, leaving the queue empty.
pub fn drain_events(
    out: &mut Vec<TractEvent>,
    params: &Rc<RefCell<ProcessorParams>>,
    canvas: &web::HtmlCanvasElement,
) {
    for event in out.drain(..) {
        params.borrow_mut().apply(&event);
        dispatch_peer_event(canvas, &event);
    }
}

fn set_field(detail: &js_sys::Object, key: &str, value: f64) {
    let _ = js_sys::Reflect::set(detail, &JsValue::from_str(key), &JsValue::from_f64(value));
}

/// Re-dispatch one event for peer components, when peers track it at all.
pub fn dispatch_peer_event(canvas: &web::HtmlCanvasElement, event: &TractEvent) {
    // Parameter writes report no wire name; the tree is the source of truth.
    let Some(name) = event.wire_name() else {
        return;
    };
    let detail = js_sys::Object::new();
    match *event {
        TractEvent::NewConstriction { id, slot, .. }
        | TractEvent::RemoveConstriction { id, slot } => {
            set_field(&detail, "touchIdentifier", id as f64);
            set_field(&detail, "constrictionIndex", slot as f64);
        }
        TractEvent::GamepadTongue {
            index,
            diameter,
            stick_radius,
            stick_angle,
        } => {
            set_field(&detail, "index", index as f64);
            set_field(&detail, "diameter", diameter as f64);
            set_field(&detail, "radius", stick_radius as f64);
            set_field(&detail, "angle", stick_angle as f64);
        }
        TractEvent::GamepadGlottis {
            frequency,
            tenseness,
        } => {
            set_field(&detail, "frequency", frequency as f64);
            set_field(&detail, "tenseness", tenseness as f64);
        }
        TractEvent::SetTongue { .. }
        | TractEvent::SetConstriction { .. }
        | TractEvent::SetScalar { .. } => return,
    };

    let init = web::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    if let Ok(ev) = web::CustomEvent::new_with_event_init_dict(name, &init) {
        let _ = canvas.dispatch_event(&ev);
    }
}

fn custom_event_fields(ev: &web::Event) -> Option<(String, f64)> {
    let custom = ev.dyn_ref::<web::CustomEvent>()?;
    let detail = custom.detail();
    let name = js_sys::Reflect::get(&detail, &JsValue::from_str("parameterName"))
        .ok()?
        .as_string()?;
    let value = js_sys::Reflect::get(&detail, &JsValue::from_str("newValue"))
        .ok()?
        .as_f64()?;
    Some((name, value))
}

/// Accept `setParameterTract` and `setParameter` from the surrounding page.
pub fn wire_inbound_parameters(
    canvas: &web::HtmlCanvasElement,
    params: Rc<RefCell<ProcessorParams>>,
) {
    {
        let params = params.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            let Some((name, value)) = custom_event_fields(&ev) else {
                return;
            };
            match TractParamName::from_str(&name) {
                Ok(param) => params.borrow_mut().set_tract_param(param, value as f32),
                Err(e) => log::warn!("setParameterTract: {}", e),
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("setParameterTract", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            let Some((name, value)) = custom_event_fields(&ev) else {
                return;
            };
            match ScalarParam::from_str(&name) {
                Ok(param) => params.borrow_mut().set_scalar(param, value as f32),
                Err(e) => log::warn!("setParameter: {}", e),
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("setParameter", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
