//! Tongue position state machine.
//!
//! Two mutually exclusive drivers exist per session: pointer/touch contacts
//! in tongue mode, and a connected gamepad. Ownership is an explicit enum
//! set on gamepad connect/disconnect; pointer input while the gamepad owns
//! the tongue is silently dropped rather than aborting the gesture.

use crate::constants::{MAX_DIAMETER, STICK_DEADZONE, STICK_VELOCITY_FACTOR, TRACT_LENGTH};
use crate::events::TractEvent;
use crate::geometry::TractPoint;
use crate::vowels::{blend_tongue, is_near_vowel, score_anchors, VOWEL_ANCHORS};

/// Which driver currently owns tongue updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlOwner {
    Pointer,
    Gamepad,
}

/// Gamepad tongue strategy, selected by a runtime mode flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistMode {
    /// Snap to vowels when near one, otherwise integrate stick velocity.
    Assisted,
    /// Map the stick directly onto the tract ranges, no deadzone.
    Direct,
}

#[derive(Debug)]
pub struct TongueController {
    position: TractPoint,
    owner: ControlOwner,
}

impl Default for TongueController {
    fn default() -> Self {
        Self {
            position: TractPoint::new(22.0, 2.0),
            owner: ControlOwner::Pointer,
        }
    }
}

impl TongueController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> TractPoint {
        self.position
    }

    pub fn owner(&self) -> ControlOwner {
        self.owner
    }

    pub fn set_owner(&mut self, owner: ControlOwner) {
        if self.owner != owner {
            log::info!("tongue control owner -> {:?}", owner);
            self.owner = owner;
        }
    }

    /// Tongue-mode pointer/touch event at a raw tract-space point.
    ///
    /// Near a vowel the position snaps to the softmax-weighted anchor
    /// average; elsewhere the raw point is adopted directly (clamped).
    /// Returns false without touching state while the gamepad owns control.
    pub fn pointer_input(&mut self, point: TractPoint, out: &mut Vec<TractEvent>) -> bool {
        if self.owner == ControlOwner::Gamepad {
            return false;
        }
        let scores = score_anchors(point, &VOWEL_ANCHORS);
        let next = if is_near_vowel(&scores) {
            blend_tongue(&scores)
        } else {
            point.clamped(TRACT_LENGTH, MAX_DIAMETER)
        };
        self.position = next;
        out.push(TractEvent::SetTongue {
            index: next.index,
            diameter: next.diameter,
        });
        true
    }

    /// One gamepad stick sample. Returns true when the tongue moved.
    pub fn gamepad_input(
        &mut self,
        axis_x: f32,
        axis_y: f32,
        mode: AssistMode,
        out: &mut Vec<TractEvent>,
    ) -> bool {
        match mode {
            AssistMode::Assisted => self.assisted_input(axis_x, axis_y, out),
            AssistMode::Direct => self.direct_input(axis_x, axis_y, out),
        }
    }

    fn assisted_input(&mut self, axis_x: f32, axis_y: f32, out: &mut Vec<TractEvent>) -> bool {
        if axis_x.abs() < STICK_DEADZONE && axis_y.abs() < STICK_DEADZONE {
            return false;
        }
        // Near-vowel check runs against the current tongue position, not the
        // incoming stick sample.
        let scores = score_anchors(self.position, &VOWEL_ANCHORS);
        if is_near_vowel(&scores) {
            self.position = blend_tongue(&scores);
        } else {
            self.position = TractPoint::new(
                self.position.index + axis_x * STICK_VELOCITY_FACTOR * TRACT_LENGTH,
                self.position.diameter + axis_y * STICK_VELOCITY_FACTOR * MAX_DIAMETER,
            )
            .clamped(TRACT_LENGTH, MAX_DIAMETER);
        }
        self.emit_gamepad(axis_x, axis_y, out);
        true
    }

    fn direct_input(&mut self, axis_x: f32, axis_y: f32, out: &mut Vec<TractEvent>) -> bool {
        // Signed-square response on the index axis: finer control near the
        // center, and a centered stick rests at the tract midpoint.
        let curved = axis_x * axis_x.abs();
        self.position = TractPoint::new(
            ((curved + 1.0) * 0.5).clamp(0.0, 1.0) * TRACT_LENGTH,
            ((axis_y + 1.0) * 0.5).clamp(0.0, 1.0) * MAX_DIAMETER,
        );
        self.emit_gamepad(axis_x, axis_y, out);
        true
    }

    fn emit_gamepad(&self, axis_x: f32, axis_y: f32, out: &mut Vec<TractEvent>) {
        out.push(TractEvent::SetTongue {
            index: self.position.index,
            diameter: self.position.diameter,
        });
        out.push(TractEvent::GamepadTongue {
            index: self.position.index,
            diameter: self.position.diameter,
            stick_radius: (axis_x * axis_x + axis_y * axis_y).sqrt(),
            stick_angle: axis_y.atan2(axis_x),
        });
    }
}
