//! Live parameter tree of the acoustic processor, as seen by the surface.
//!
//! The surface reads this once per frame for drawing and mutates it by
//! applying [`TractEvent`]s. Audio signal processing itself lives elsewhere;
//! only the parameters the surface reads and writes are modeled.

use crate::events::{ScalarParam, TractEvent};
use crate::geometry::TractPoint;
use fnv::FnvHashMap;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter name: {0}")]
    UnknownName(String),
}

/// Tract parameter addressed by `setParameterTract`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TractParamName {
    TongueIndex,
    TongueDiameter,
}

impl FromStr for TractParamName {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tongue.index" => Ok(TractParamName::TongueIndex),
            "tongue.diameter" => Ok(TractParamName::TongueDiameter),
            other => Err(ParamError::UnknownName(other.to_string())),
        }
    }
}

impl FromStr for ScalarParam {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frequency" => Ok(ScalarParam::Frequency),
            "tenseness" => Ok(ScalarParam::Tenseness),
            "intensity" => Ok(ScalarParam::Intensity),
            other => Err(ParamError::UnknownName(other.to_string())),
        }
    }
}

/// Closed scalar range with a midpoint, used for the tongue parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Tongue position and the region it may occupy.
#[derive(Clone, Debug)]
pub struct TongueParams {
    pub position: TractPoint,
    pub index_range: ParamRange,
    pub diameter_range: ParamRange,
}

impl Default for TongueParams {
    fn default() -> Self {
        Self {
            position: TractPoint::new(12.9, 2.43),
            index_range: ParamRange::new(12.0, 29.0),
            diameter_range: ParamRange::new(2.05, 3.5),
        }
    }
}

/// Nasal branch geometry and state. `diameter[0]` is the velum opening.
#[derive(Clone, Debug)]
pub struct NoseParams {
    pub start: usize,
    pub length: usize,
    pub offset: f32,
    pub diameter: Vec<f32>,
    pub amplitude_max: Vec<f32>,
}

impl Default for NoseParams {
    fn default() -> Self {
        let length = 28;
        let mut diameter = vec![0.0; length];
        for (i, d) in diameter.iter_mut().enumerate() {
            let t = 2.0 * i as f32 / length as f32;
            *d = if t < 1.0 { 0.4 + 1.6 * t } else { 0.5 + 1.5 * (2.0 - t) };
            *d = d.min(1.9);
        }
        diameter[0] = 0.01; // velum rests nearly closed
        Self {
            start: 17,
            length,
            offset: 0.8,
            diameter,
            amplitude_max: vec![0.0; length],
        }
    }
}

/// Oral tract segments plus the branches the renderer needs.
#[derive(Clone, Debug)]
pub struct TractTree {
    pub length: usize,
    pub diameter: Vec<f32>,
    pub amplitude_max: Vec<f32>,
    pub tongue: TongueParams,
    pub nose: NoseParams,
    /// Active constrictions keyed by registry slot.
    pub constrictions: FnvHashMap<u32, TractPoint>,
}

impl Default for TractTree {
    fn default() -> Self {
        let length = crate::constants::TRACT_LENGTH as usize;
        let mut diameter = vec![0.0; length];
        for (i, d) in diameter.iter_mut().enumerate() {
            // rest shape: narrow glottal end, wider oral cavity
            *d = if i < 7 {
                0.6
            } else if i < 12 {
                1.1
            } else {
                1.5
            };
        }
        Self {
            length,
            diameter,
            amplitude_max: vec![0.0; length],
            tongue: TongueParams::default(),
            nose: NoseParams::default(),
            constrictions: FnvHashMap::default(),
        }
    }
}

impl TractTree {
    /// Velum opening, stored as the first nose segment.
    #[inline]
    pub fn velum(&self) -> f32 {
        self.nose.diameter.first().copied().unwrap_or(0.0)
    }
}

/// Everything the surface fetches from the processor each frame.
#[derive(Clone, Debug)]
pub struct ProcessorParams {
    pub frequency: f32,
    pub tenseness: f32,
    pub intensity: f32,
    pub tract: TractTree,
}

impl Default for ProcessorParams {
    fn default() -> Self {
        Self {
            frequency: 140.0,
            tenseness: 0.6,
            intensity: 0.0,
            tract: TractTree::default(),
        }
    }
}

impl ProcessorParams {
    /// Apply one surface message to the tree. Unknown slots on removal are
    /// ignored; values are clamped into the parameter's own range.
    pub fn apply(&mut self, event: &TractEvent) {
        match *event {
            TractEvent::SetTongue { index, diameter }
            | TractEvent::GamepadTongue {
                index, diameter, ..
            } => {
                let tongue = &mut self.tract.tongue;
                tongue.position = TractPoint::new(
                    tongue.index_range.clamp(index),
                    tongue.diameter_range.clamp(diameter),
                );
            }
            TractEvent::NewConstriction {
                slot,
                index,
                diameter,
                ..
            }
            | TractEvent::SetConstriction {
                slot,
                index,
                diameter,
                ..
            } => {
                self.tract
                    .constrictions
                    .insert(slot, TractPoint::new(index, diameter));
            }
            TractEvent::RemoveConstriction { slot, .. } => {
                self.tract.constrictions.remove(&slot);
            }
            TractEvent::GamepadGlottis {
                frequency,
                tenseness,
            } => {
                self.frequency = frequency;
                self.tenseness = tenseness.clamp(0.0, 1.0);
            }
            TractEvent::SetScalar { param, value } => self.set_scalar(param, value),
        }
    }

    pub fn set_scalar(&mut self, param: ScalarParam, value: f32) {
        match param {
            ScalarParam::Frequency => self.frequency = value,
            ScalarParam::Tenseness => self.tenseness = value.clamp(0.0, 1.0),
            ScalarParam::Intensity => self.intensity = value.clamp(0.0, 1.0),
        }
    }

    pub fn scalar(&self, param: ScalarParam) -> f32 {
        match param {
            ScalarParam::Frequency => self.frequency,
            ScalarParam::Tenseness => self.tenseness,
            ScalarParam::Intensity => self.intensity,
        }
    }

    pub fn set_tract_param(&mut self, name: TractParamName, value: f32) {
        let tongue = &mut self.tract.tongue;
        match name {
            TractParamName::TongueIndex => {
                tongue.position.index = tongue.index_range.clamp(value)
            }
            TractParamName::TongueDiameter => {
                tongue.position.diameter = tongue.diameter_range.clamp(value)
            }
        }
    }

    /// Combined amplitude at the lip and nostril ends, driving the wobble.
    pub fn edge_amplitude(&self) -> f32 {
        let lip = self.tract.amplitude_max.last().copied().unwrap_or(0.0);
        let nostril = self.tract.nose.amplitude_max.last().copied().unwrap_or(0.0);
        lip + nostril
    }
}
