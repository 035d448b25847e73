//! Vowel anchor table and the proximity/softmax blender.
//!
//! Anchors are expressed in the table's legacy `(angle, radius)` units where
//! `radius = openness * 1.5 + 2`. A query tract-space point is compared
//! against anchors in that same representation, and an anchor's tongue
//! target is its own `(angle, radius)` pair, so a full-weight match
//! reproduces the anchor exactly.

use crate::constants::{
    SNAP_DISTANCE_THRESHOLD, SOFTMAX_SHARPNESS, VOWEL_RADIUS_OFFSET, VOWEL_RADIUS_SCALE,
};
use crate::geometry::TractPoint;
use smallvec::SmallVec;

/// A named reference vowel used for proximity-based tongue snapping.
#[derive(Clone, Copy, Debug)]
pub struct VowelAnchor {
    pub angle: f32,
    pub radius: f32,
    pub phoneme: &'static str,
    /// Tract-space tongue position a full-weight match produces.
    pub tongue_index: f32,
    pub tongue_diameter: f32,
}

impl VowelAnchor {
    pub const fn new(angle: f32, openness: f32, phoneme: &'static str) -> Self {
        let radius = openness * VOWEL_RADIUS_SCALE + VOWEL_RADIUS_OFFSET;
        Self {
            angle,
            radius,
            phoneme,
            tongue_index: angle,
            tongue_diameter: radius,
        }
    }

    pub fn tongue_target(&self) -> TractPoint {
        TractPoint::new(self.tongue_index, self.tongue_diameter)
    }
}

/// Reference vowels of the surface, openness in `[0, 1]`.
pub static VOWEL_ANCHORS: [VowelAnchor; 10] = [
    VowelAnchor::new(15.0, 0.6, "æ"),   // pat
    VowelAnchor::new(13.0, 0.27, "a"),  // part
    VowelAnchor::new(12.0, 0.0, "ɒ"),   // pot
    VowelAnchor::new(17.7, 0.05, "(ɔ)"), // port (rounded)
    VowelAnchor::new(27.0, 0.65, "ɪ"),  // pit
    VowelAnchor::new(27.4, 0.21, "i"),  // peat
    VowelAnchor::new(20.0, 1.0, "e"),   // pet
    VowelAnchor::new(18.1, 0.37, "ʌ"),  // putt
    VowelAnchor::new(23.0, 0.1, "(u)"), // poot (rounded)
    VowelAnchor::new(21.0, 0.6, "ə"),   // pert
];

/// One anchor's distance and normalized blend weight for a query point.
#[derive(Clone, Copy, Debug)]
pub struct AnchorScore {
    pub anchor: &'static VowelAnchor,
    pub distance: f32,
    pub weight: f32,
}

pub type AnchorScores = SmallVec<[AnchorScore; 10]>;

/// Score every anchor against a tract-space point: Euclidean distance in the
/// anchor table's units, then a softmax over negative scaled distance.
///
/// The minimum distance is subtracted before exponentiating, so the weights
/// are finite, non-negative, and sum to 1 for any finite distance vector
/// (uniform when all distances tie, including the all-zero case).
pub fn score_anchors(point: TractPoint, anchors: &'static [VowelAnchor]) -> AnchorScores {
    let mut scores: AnchorScores = anchors
        .iter()
        .map(|anchor| {
            let da = anchor.angle - point.index;
            let dr = anchor.radius - point.diameter;
            AnchorScore {
                anchor,
                distance: (da * da + dr * dr).sqrt(),
                weight: 0.0,
            }
        })
        .collect();

    let min_distance = scores
        .iter()
        .map(|s| s.distance)
        .fold(f32::INFINITY, f32::min);
    let mut sum = 0.0;
    for score in scores.iter_mut() {
        score.weight = (-SOFTMAX_SHARPNESS * (score.distance - min_distance)).exp();
        sum += score.weight;
    }
    for score in scores.iter_mut() {
        score.weight /= sum;
    }
    scores
}

/// Weighted average of the tongue targets over all anchors. Softmax already
/// down-weights far anchors, so every anchor participates.
pub fn blend_tongue(scores: &[AnchorScore]) -> TractPoint {
    let mut index = 0.0;
    let mut diameter = 0.0;
    for score in scores {
        index += score.anchor.tongue_index * score.weight;
        diameter += score.anchor.tongue_diameter * score.weight;
    }
    TractPoint { index, diameter }
}

/// True when the closest anchor is within the snapping gate.
pub fn is_near_vowel(scores: &[AnchorScore]) -> bool {
    min_distance(scores) < SNAP_DISTANCE_THRESHOLD
}

pub fn min_distance(scores: &[AnchorScore]) -> f32 {
    scores
        .iter()
        .map(|s| s.distance)
        .fold(f32::INFINITY, f32::min)
}
