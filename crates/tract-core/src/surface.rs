//! The tract surface orchestrator: routes contacts and gamepad samples
//! through the registry, tongue controller, and geometry transform.
//!
//! All mutation happens synchronously inside one handler or one poll tick;
//! the surface is single-threaded by construction.

use crate::constants::{MAX_DIAMETER, TONGUE_CAPTURE_DISTANCE, TRACT_LENGTH};
use crate::events::TractEvent;
use crate::gamepad::{GamepadPoller, GamepadSnapshot};
use crate::geometry::TractGeometry;
use crate::registry::{ConstrictionRegistry, ContactId, ContactMode};
use crate::tongue::{AssistMode, ControlOwner, TongueController};
use crate::vowels::{min_distance, score_anchors, VOWEL_ANCHORS};
use glam::Vec2;

pub struct TractSurface {
    pub geometry: TractGeometry,
    pub registry: ConstrictionRegistry,
    pub tongue: TongueController,
    pub poller: GamepadPoller,
    pub assist: AssistMode,
}

impl Default for TractSurface {
    fn default() -> Self {
        Self::new(TractGeometry::default())
    }
}

impl TractSurface {
    pub fn new(geometry: TractGeometry) -> Self {
        Self {
            geometry,
            registry: ConstrictionRegistry::new(),
            tongue: TongueController::new(),
            poller: GamepadPoller::new(),
            assist: AssistMode::Assisted,
        }
    }

    pub fn set_assist(&mut self, mode: AssistMode) {
        self.assist = mode;
    }

    /// Contact down at a canvas pixel position. Near a vowel the contact
    /// grabs the tongue; elsewhere it opens a new constriction slot. A
    /// duplicate down for an already-registered contact is ignored.
    pub fn contact_down(&mut self, id: ContactId, screen: Vec2, out: &mut Vec<TractEvent>) {
        if self.registry.is_registered(id) {
            return;
        }
        let point = self.geometry.to_tract_space(screen);
        let scores = score_anchors(point, &VOWEL_ANCHORS);
        if min_distance(&scores) < TONGUE_CAPTURE_DISTANCE {
            self.registry.register_tongue(id);
            // No tongue update while the gamepad owns control; the contact
            // still registers so its up event stays balanced.
            self.tongue.pointer_input(point, out);
        } else {
            let slot = self.registry.register_constriction(id);
            let point = point.clamped(TRACT_LENGTH, MAX_DIAMETER);
            log::debug!("contact {} opens constriction slot {}", id, slot);
            out.push(TractEvent::NewConstriction {
                id,
                slot,
                index: point.index,
                diameter: point.diameter,
            });
        }
    }

    /// Contact motion. Unknown contacts are a no-op (late or duplicated
    /// events after an up).
    pub fn contact_move(&mut self, id: ContactId, screen: Vec2, out: &mut Vec<TractEvent>) {
        let Some(mode) = self.registry.mode(id) else {
            return;
        };
        let point = self.geometry.to_tract_space(screen);
        match mode {
            ContactMode::Tongue => {
                self.tongue.pointer_input(point, out);
            }
            ContactMode::Constriction(slot) => {
                let point = point.clamped(TRACT_LENGTH, MAX_DIAMETER);
                out.push(TractEvent::SetConstriction {
                    id,
                    slot,
                    index: point.index,
                    diameter: point.diameter,
                });
            }
        }
    }

    /// Contact up or cancel. Removal is unconditional and idempotent; only
    /// constriction contacts produce a removal message, the tongue is a
    /// singleton control with no slot to release.
    pub fn contact_up(&mut self, id: ContactId, out: &mut Vec<TractEvent>) {
        match self.registry.remove(id) {
            Some(ContactMode::Constriction(slot)) => {
                log::debug!("contact {} releases constriction slot {}", id, slot);
                out.push(TractEvent::RemoveConstriction { id, slot });
            }
            Some(ContactMode::Tongue) | None => {}
        }
    }

    pub fn gamepad_connected(&mut self, device_index: u32) {
        self.poller.connect(device_index);
        self.tongue.set_owner(ControlOwner::Gamepad);
    }

    pub fn gamepad_disconnected(&mut self) {
        self.poller.disconnect();
        self.tongue.set_owner(ControlOwner::Pointer);
    }

    /// Per-frame gamepad step; see [`GamepadPoller::poll`].
    pub fn poll_gamepad(
        &mut self,
        now_ms: f64,
        snapshot: Option<&GamepadSnapshot>,
        out: &mut Vec<TractEvent>,
    ) -> bool {
        self.poller
            .poll(now_ms, snapshot, self.assist, &mut self.tongue, out)
    }
}
