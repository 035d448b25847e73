//! Glottis (frequency/tenseness) input mapping, shared by the on-screen pad
//! and the gamepad right stick, plus the pad's contact state machine.

use std::f32::consts::FRAC_PI_2;

use crate::events::{ScalarParam, TractEvent};

/// Pitch range of the voice source.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyRange {
    pub min: f32,
    pub max: f32,
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            min: 20.0,
            max: 1000.0,
        }
    }
}

impl FrequencyRange {
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Frequency for an interpolation value in `[0, 1]`.
    #[inline]
    pub fn interpolate(&self, t: f32) -> f32 {
        self.min + self.span() * t
    }

    /// Interpolation value for a frequency, clamped to `[0, 1]`.
    #[inline]
    pub fn normalize(&self, frequency: f32) -> f32 {
        ((frequency - self.min) / self.span()).clamp(0.0, 1.0)
    }
}

// Observed mechanical ranges of the right stick, per axis.
pub const STICK_X_MIN: f32 = -1.0;
pub const STICK_X_MAX: f32 = 1.0;
pub const STICK_Y_MIN: f32 = -0.94;
pub const STICK_Y_MAX: f32 = 0.95;

/// Map a raw axis value into `[0, 1]` against its calibrated range.
#[inline]
pub fn normalize_axis(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Cosine ease mapping a vertical interpolation onto tenseness; the curve
/// concentrates resolution at the breathy end.
#[inline]
pub fn tenseness_curve(vertical: f32) -> f32 {
    1.0 - ((1.0 - vertical) * FRAC_PI_2).cos()
}

/// Inverse of [`tenseness_curve`], for placing the pad cursor.
#[inline]
pub fn tenseness_interpolation(tenseness: f32) -> f32 {
    1.0 - (1.0 - tenseness.clamp(0.0, 1.0)).acos() / FRAC_PI_2
}

/// Pad contact at normalized `(horizontal, vertical)` in `[0, 1)`.
pub fn pad_input(horizontal: f32, vertical: f32) -> (f32, f32) {
    let horizontal = horizontal.clamp(0.0, 0.99);
    let vertical = vertical.clamp(0.0, 0.99);
    (
        FrequencyRange::default().interpolate(horizontal),
        tenseness_curve(vertical),
    )
}

/// Right-stick sample; horizontal controls frequency, vertical tenseness.
pub fn stick_input(axis_x: f32, axis_y: f32) -> (f32, f32) {
    let horizontal = normalize_axis(axis_x, STICK_X_MIN, STICK_X_MAX);
    let vertical = normalize_axis(axis_y, STICK_Y_MIN, STICK_Y_MAX);
    (
        FrequencyRange::default().interpolate(horizontal),
        tenseness_curve(vertical),
    )
}

/// Contact state of the glottis pad. One contact owns the pad at a time;
/// with the always-voice latch set (the default) the voice stays on between
/// presses, otherwise intensity follows press and release.
#[derive(Debug)]
pub struct PadState {
    active: bool,
    touch_id: Option<i32>,
    always_voice: bool,
}

impl Default for PadState {
    fn default() -> Self {
        Self {
            active: false,
            touch_id: None,
            always_voice: true,
        }
    }
}

impl PadState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Owning touch identifier; `None` for mouse or no contact.
    pub fn touch_id(&self) -> Option<i32> {
        self.touch_id
    }

    pub fn always_voice(&self) -> bool {
        self.always_voice
    }

    /// Contact down at normalized pad coordinates.
    pub fn press(
        &mut self,
        touch_id: Option<i32>,
        horizontal: f32,
        vertical: f32,
        out: &mut Vec<TractEvent>,
    ) {
        self.active = true;
        self.touch_id = touch_id;
        self.slide(horizontal, vertical, out);
        if !self.always_voice {
            out.push(TractEvent::SetScalar {
                param: ScalarParam::Intensity,
                value: 1.0,
            });
        }
    }

    /// Contact motion while held.
    pub fn slide(&self, horizontal: f32, vertical: f32, out: &mut Vec<TractEvent>) {
        let (frequency, tenseness) = pad_input(horizontal, vertical);
        out.push(TractEvent::SetScalar {
            param: ScalarParam::Frequency,
            value: frequency,
        });
        out.push(TractEvent::SetScalar {
            param: ScalarParam::Tenseness,
            value: tenseness,
        });
    }

    /// Contact up or cancel. Only a cleared latch silences the voice.
    pub fn release(&mut self, out: &mut Vec<TractEvent>) {
        self.active = false;
        self.touch_id = None;
        if !self.always_voice {
            out.push(TractEvent::SetScalar {
                param: ScalarParam::Intensity,
                value: 0.0,
            });
        }
    }

    /// Flip the latch. Turning it on voices immediately; turning it off
    /// silences unless the pad is currently held.
    pub fn set_always_voice(&mut self, on: bool, out: &mut Vec<TractEvent>) {
        if self.always_voice == on {
            return;
        }
        self.always_voice = on;
        if on {
            out.push(TractEvent::SetScalar {
                param: ScalarParam::Intensity,
                value: 1.0,
            });
        } else if !self.active {
            out.push(TractEvent::SetScalar {
                param: ScalarParam::Intensity,
                value: 0.0,
            });
        }
    }
}
