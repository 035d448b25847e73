//! Gamepad API wiring: connect/disconnect listeners plus the per-frame
//! device snapshot read consumed by the core poller.

use std::cell::RefCell;
use std::rc::Rc;

use tract_core::{AssistMode, GamepadSnapshot, TractSurface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn wire_gamepad_events(surface: Rc<RefCell<TractSurface>>) {
    let Some(window) = web::window() else {
        return;
    };
    {
        let surface = surface.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::GamepadEvent| {
            if let Some(pad) = ev.gamepad() {
                surface.borrow_mut().gamepad_connected(pad.index());
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window
            .add_event_listener_with_callback("gamepadconnected", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::GamepadEvent| {
            surface.borrow_mut().gamepad_disconnected();
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback(
            "gamepaddisconnected",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

/// Read the current axis snapshot for a device, or None while the browser
/// has no live entry for it (the poller retries next frame).
pub fn read_snapshot(device_index: u32) -> Option<GamepadSnapshot> {
    let pads = web::window()?.navigator().get_gamepads().ok()?;
    let value = pads.get(device_index);
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let pad: web::Gamepad = value.dyn_into().ok()?;
    let axes = pad.axes();
    let mut snapshot = GamepadSnapshot::default();
    for (i, axis) in snapshot.axes.iter_mut().enumerate() {
        *axis = axes.get(i as u32).as_f64().unwrap_or(0.0) as f32;
    }
    Some(snapshot)
}

/// Runtime strategy flag, kept as the page-global `forceControl` for
/// compatibility: truthy selects the assisted strategy.
pub fn read_assist_mode() -> AssistMode {
    let assisted = web::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("forceControl")).ok())
        .map(|v| v.is_truthy())
        .unwrap_or(true);
    if assisted {
        AssistMode::Assisted
    } else {
        AssistMode::Direct
    }
}
