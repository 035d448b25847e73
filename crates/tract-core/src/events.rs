//! Messages emitted by the control surface for the acoustic processor and
//! peer components.
//!
//! Handlers push into a caller-provided `Vec<TractEvent>` instead of
//! dispatching bubbling DOM events; the web layer drains the queue once per
//! handler or frame and forwards each message over whatever channel the
//! host page uses, under the name [`TractEvent::wire_name`] reports.

use crate::registry::ContactId;

/// Scalar parameters of the voice source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarParam {
    Frequency,
    Tenseness,
    Intensity,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TractEvent {
    /// Tongue moved; maps to `setParameterTract` for `tongue.index` and
    /// `tongue.diameter`.
    SetTongue { index: f32, diameter: f32 },
    /// A contact opened a new constriction in slot `slot`.
    NewConstriction {
        id: ContactId,
        slot: u32,
        index: f32,
        diameter: f32,
    },
    /// An existing constriction moved.
    SetConstriction {
        id: ContactId,
        slot: u32,
        index: f32,
        diameter: f32,
    },
    /// A constriction contact lifted; slot is released.
    RemoveConstriction { id: ContactId, slot: u32 },
    /// Tongue update produced by the gamepad, with the raw stick vector in
    /// polar form for downstream visualization.
    GamepadTongue {
        index: f32,
        diameter: f32,
        stick_radius: f32,
        stick_angle: f32,
    },
    /// Right-stick glottis control.
    GamepadGlottis { frequency: f32, tenseness: f32 },
    /// Direct scalar write (glottis pad, host page).
    SetScalar { param: ScalarParam, value: f32 },
}

impl TractEvent {
    /// Historical event name on the page-level peer channel, or `None` for
    /// messages that stay internal to the parameter tree.
    pub fn wire_name(&self) -> Option<&'static str> {
        match self {
            TractEvent::NewConstriction { .. } => Some("didNewConstriction"),
            TractEvent::RemoveConstriction { .. } => Some("didRemoveConstriction"),
            TractEvent::GamepadTongue { .. } => Some("gamepadInputTract"),
            TractEvent::GamepadGlottis { .. } => Some("gamepadInputGlottis"),
            TractEvent::SetTongue { .. }
            | TractEvent::SetConstriction { .. }
            | TractEvent::SetScalar { .. } => None,
        }
    }
}
