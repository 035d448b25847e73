//! Gamepad polling step.
//!
//! The poller itself carries no timer: the frame loop calls [`poll`] once
//! per animation frame with a monotonic timestamp and whatever device
//! snapshot is available. A missing snapshot or an unelapsed interval skips
//! the sample and retries next frame; nothing here can fail.
//!
//! [`poll`]: GamepadPoller::poll

use crate::constants::GAMEPAD_UPDATE_INTERVAL_MS;
use crate::events::TractEvent;
use crate::glottis;
use crate::tongue::{AssistMode, TongueController};

/// Raw axis values from one device read, in `[-1, 1]`.
/// Axes 0/1 are the left stick (tongue), 2/3 the right stick (glottis).
#[derive(Clone, Copy, Debug, Default)]
pub struct GamepadSnapshot {
    pub axes: [f32; 4],
}

impl GamepadSnapshot {
    pub fn left_stick(&self) -> (f32, f32) {
        (self.axes[0], self.axes[1])
    }

    pub fn right_stick(&self) -> (f32, f32) {
        (self.axes[2], self.axes[3])
    }
}

#[derive(Debug, Default)]
pub struct GamepadPoller {
    device_index: Option<u32>,
    last_update_ms: f64,
}

impl GamepadPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, device_index: u32) {
        log::info!("gamepad {} connected", device_index);
        self.device_index = Some(device_index);
    }

    pub fn disconnect(&mut self) {
        if let Some(index) = self.device_index.take() {
            log::info!("gamepad {} disconnected", index);
        }
    }

    pub fn is_active(&self) -> bool {
        self.device_index.is_some()
    }

    pub fn device_index(&self) -> Option<u32> {
        self.device_index
    }

    /// One poll tick. Returns true when a sample was consumed; false means
    /// the caller should simply try again next frame.
    pub fn poll(
        &mut self,
        now_ms: f64,
        snapshot: Option<&GamepadSnapshot>,
        mode: AssistMode,
        tongue: &mut TongueController,
        out: &mut Vec<TractEvent>,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(snapshot) = snapshot else {
            // Device momentarily unavailable; not an error.
            return false;
        };
        if now_ms - self.last_update_ms < GAMEPAD_UPDATE_INTERVAL_MS {
            return false;
        }
        self.last_update_ms = now_ms;

        let (left_x, left_y) = snapshot.left_stick();
        tongue.gamepad_input(left_x, left_y, mode, out);

        let (right_x, right_y) = snapshot.right_stick();
        let (frequency, tenseness) = glottis::stick_input(right_x, right_y);
        out.push(TractEvent::GamepadGlottis {
            frequency,
            tenseness,
        });
        true
    }
}
