//! requestAnimationFrame loop: gamepad poll, event drain, draw, audio push.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use tract_core::{ProcessorParams, TractSurface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::VoiceAudio;
use crate::events::drain_events;
use crate::gamepad::{read_assist_mode, read_snapshot};
use crate::glottis::update_pad_cursor;
use crate::render::draw_surface;

pub struct FrameContext {
    pub surface: Rc<RefCell<TractSurface>>,
    pub params: Rc<RefCell<ProcessorParams>>,
    pub canvas: web::HtmlCanvasElement,
    pub ctx2d: web::CanvasRenderingContext2d,
    /// None until the first user gesture unlocks the audio context.
    pub audio: Rc<RefCell<Option<VoiceAudio>>>,
    pub document: web::Document,
    pub epoch: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.epoch.elapsed();
        let now_ms = now.as_secs_f64() * 1000.0;
        let now_sec = now.as_secs_f64();

        let mut out = Vec::new();
        {
            let mut surface = self.surface.borrow_mut();
            surface.set_assist(read_assist_mode());
            let snapshot = surface.poller.device_index().and_then(read_snapshot);
            surface.poll_gamepad(now_ms, snapshot.as_ref(), &mut out);
        }
        drain_events(&mut out, &self.params, &self.canvas);

        let params = self.params.borrow();
        draw_surface(
            &self.ctx2d,
            &self.surface.borrow().geometry,
            &params,
            now_sec,
        );
        update_pad_cursor(&self.document, &params);
        if let Some(audio) = self.audio.borrow().as_ref() {
            audio.update(&params);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
