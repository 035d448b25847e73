#![cfg(target_arch = "wasm32")]

pub mod audio;
pub mod dom;
pub mod events;
pub mod frame;
pub mod gamepad;
pub mod glottis;
pub mod input;
pub mod overlay;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use tract_core::{ProcessorParams, ScalarParam, TractSurface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tract-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("tract-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #tract-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::set_fixed_backing_size(&canvas, render::CANVAS_WIDTH, render::CANVAS_HEIGHT);

    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let surface = Rc::new(RefCell::new(TractSurface::default()));
    let params = Rc::new(RefCell::new(ProcessorParams::default()));

    input::wire_input_handlers(input::InputWiring {
        canvas: canvas.clone(),
        surface: surface.clone(),
        params: params.clone(),
    });
    gamepad::wire_gamepad_events(surface.clone());
    events::wire_inbound_parameters(&canvas, params.clone());

    let pad_state = Rc::new(RefCell::new(tract_core::PadState::default()));
    if let Some(pad) = document
        .get_element_by_id("glottis-pad")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        glottis::wire_pad_handlers(glottis::PadWiring {
            pad,
            canvas: canvas.clone(),
            params: params.clone(),
            state: pad_state.clone(),
        });
    }
    {
        let params = params.clone();
        let canvas = canvas.clone();
        dom::add_click_listener(&document, "always-voice", move || {
            let mut out = Vec::new();
            {
                let mut state = pad_state.borrow_mut();
                let next = !state.always_voice();
                state.set_always_voice(next, &mut out);
            }
            events::drain_events(&mut out, &params, &canvas);
        });
    }

    // The surface renders and tracks input straight away; audio waits for a
    // gesture so the context starts unmuted.
    let audio: Rc<RefCell<Option<audio::VoiceAudio>>> = Rc::new(RefCell::new(None));
    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        surface,
        params: params.clone(),
        canvas,
        ctx2d,
        audio: audio.clone(),
        document: document.clone(),
        epoch: Instant::now(),
    })));

    static STARTED: AtomicBool = AtomicBool::new(false);
    let boot = {
        let document = document.clone();
        move || {
            if STARTED.swap(true, Ordering::SeqCst) {
                return;
            }
            log::info!("starting voice after gesture");
            match audio::VoiceAudio::new() {
                Ok(voice) => *audio.borrow_mut() = Some(voice),
                Err(()) => return,
            }
            params
                .borrow_mut()
                .set_scalar(ScalarParam::Intensity, 1.0);
            overlay::hide(&document);
        }
    };
    dom::add_click_listener(&document, "start-overlay", boot);

    Ok(())
}
