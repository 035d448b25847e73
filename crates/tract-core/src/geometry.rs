//! Bidirectional mapping between tract-space `(index, diameter)` and the
//! polar screen layout of the tract.
//!
//! The transform is stateless and applies no clamping; callers clamp to the
//! valid tract ranges before storing or emitting values.

use crate::constants::{WOBBLE_AMPLITUDE, WOBBLE_RADIUS_GAIN, WOBBLE_TIME_RATE};
use glam::Vec2;

/// A position along the tract paired with the constriction diameter there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TractPoint {
    pub index: f32,
    pub diameter: f32,
}

impl TractPoint {
    pub const fn new(index: f32, diameter: f32) -> Self {
        Self { index, diameter }
    }

    /// Clamp into the valid tract ranges.
    pub fn clamped(self, tract_length: f32, max_diameter: f32) -> Self {
        Self {
            index: self.index.clamp(0.0, tract_length),
            diameter: self.diameter.clamp(0.0, max_diameter),
        }
    }
}

/// Fixed per-session polar layout of the tract on the canvas.
///
/// Invariant: `angle_scale` and `tract_length` keep the mapped angular range
/// close to a half-turn; larger spans would alias distinct indices onto the
/// same recovered angle in [`to_tract_space`](Self::to_tract_space).
#[derive(Clone, Copy, Debug)]
pub struct TractGeometry {
    pub origin: Vec2,
    pub base_radius: f32,
    pub diameter_scale: f32,
    pub angle_scale: f32,
    pub angle_offset: f32,
    pub tract_length: f32,
}

impl Default for TractGeometry {
    fn default() -> Self {
        Self {
            origin: Vec2::new(340.0, 460.0),
            base_radius: 298.0,
            diameter_scale: 60.0,
            angle_scale: 0.64,
            angle_offset: -0.25,
            tract_length: crate::constants::TRACT_LENGTH,
        }
    }
}

impl TractGeometry {
    /// Angle of a tract index around the polar origin.
    #[inline]
    pub fn index_angle(&self, index: f32) -> f32 {
        self.angle_offset + index * self.angle_scale * std::f32::consts::PI / (self.tract_length - 1.0)
    }

    /// Radius for a constriction diameter (wider opening pulls inward).
    #[inline]
    pub fn diameter_radius(&self, diameter: f32) -> f32 {
        self.base_radius - self.diameter_scale * diameter
    }

    /// Convert a polar pair into canvas pixels.
    #[inline]
    pub fn polar_point(&self, angle: f32, radius: f32) -> Vec2 {
        Vec2::new(
            self.origin.x - radius * angle.cos(),
            self.origin.y - radius * angle.sin(),
        )
    }

    /// Forward transform: tract-space to canvas pixels.
    pub fn to_screen(&self, point: TractPoint) -> Vec2 {
        self.polar_point(
            self.index_angle(point.index),
            self.diameter_radius(point.diameter),
        )
    }

    /// Inverse transform: canvas pixels back to tract-space.
    ///
    /// The recovered angle is normalized into `(-2π, 0]` so it matches the
    /// branch the forward transform produces; without this, points past the
    /// atan2 seam would solve to a wildly wrong index.
    pub fn to_tract_space(&self, screen: Vec2) -> TractPoint {
        let rel = screen - self.origin;
        let mut angle = rel.y.atan2(rel.x);
        while angle > 0.0 {
            angle -= 2.0 * std::f32::consts::PI;
        }
        let index = (std::f32::consts::PI + angle - self.angle_offset) * (self.tract_length - 1.0)
            / (self.angle_scale * std::f32::consts::PI);
        let diameter = (self.base_radius - rel.length()) / self.diameter_scale;
        TractPoint { index, diameter }
    }

    /// Draw-time perturbation: a sine of index and time, scaled by the
    /// instantaneous acoustic amplitude at the tract and nose extremities.
    /// Applied to angle (and ×[`WOBBLE_RADIUS_GAIN`] to radius) while
    /// drawing only; never stored back into tract-space state.
    pub fn wobble(&self, index: f32, now_sec: f64, edge_amplitude: f32) -> f32 {
        edge_amplitude
            * WOBBLE_AMPLITUDE
            * (2.0 * index - WOBBLE_TIME_RATE * now_sec as f32).sin()
            * index
            / self.tract_length
    }

    /// Screen position for a tract point with the wobble applied.
    pub fn to_screen_wobbled(&self, point: TractPoint, now_sec: f64, edge_amplitude: f32) -> Vec2 {
        let wobble = self.wobble(point.index, now_sec, edge_amplitude);
        self.polar_point(
            self.index_angle(point.index) + wobble,
            self.diameter_radius(point.diameter) + WOBBLE_RADIUS_GAIN * wobble,
        )
    }
}
