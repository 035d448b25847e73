//! Minimal voice-source stand-in.
//!
//! The real acoustic processor is an external collaborator; this module
//! keeps the parameter channel audible end to end with a single sawtooth
//! source whose pitch follows `frequency` and whose level follows
//! `intensity` and `tenseness`.

use tract_core::ProcessorParams;
use web_sys as web;

pub struct VoiceAudio {
    pub ctx: web::AudioContext,
    source: web::OscillatorNode,
    master_gain: web::GainNode,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

impl VoiceAudio {
    /// Build the audio graph. Must run inside a user gesture so the context
    /// starts unmuted.
    pub fn new() -> Result<Self, ()> {
        let ctx = match web::AudioContext::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("AudioContext error: {:?}", e);
                return Err(());
            }
        };
        let master_gain = create_gain(&ctx, 0.0, "master")?;
        let source = match web::OscillatorNode::new(&ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("OscillatorNode error: {:?}", e);
                return Err(());
            }
        };
        source.set_type(web::OscillatorType::Sawtooth);
        source.frequency().set_value(140.0);
        if source.connect_with_audio_node(&master_gain).is_err()
            || master_gain
                .connect_with_audio_node(&ctx.destination())
                .is_err()
        {
            log::error!("audio graph connect error");
            return Err(());
        }
        if let Err(e) = source.start() {
            log::error!("oscillator start error: {:?}", e);
            return Err(());
        }
        log::info!("voice source running");
        Ok(Self {
            ctx,
            source,
            master_gain,
        })
    }

    /// Push the current scalar parameters into the graph.
    pub fn update(&self, params: &ProcessorParams) {
        self.source.frequency().set_value(params.frequency);
        let level = params.intensity * (0.1 + 0.25 * params.tenseness);
        self.master_gain.gain().set_value(level);
    }
}
