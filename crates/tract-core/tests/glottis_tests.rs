// Host-side tests for the glottis mapping curves and the pad state machine.

use tract_core::glottis::{
    normalize_axis, pad_input, stick_input, tenseness_curve, tenseness_interpolation,
    FrequencyRange, PadState,
};
use tract_core::{ScalarParam, TractEvent};

fn intensity_writes(out: &[TractEvent]) -> Vec<f32> {
    out.iter()
        .filter_map(|e| match e {
            TractEvent::SetScalar {
                param: ScalarParam::Intensity,
                value,
            } => Some(*value),
            _ => None,
        })
        .collect()
}

#[test]
fn frequency_range_interpolation_round_trips() {
    let range = FrequencyRange::default();
    assert_eq!(range.min, 20.0);
    assert_eq!(range.max, 1000.0);
    assert!((range.interpolate(0.0) - 20.0).abs() < 1e-4);
    assert!((range.interpolate(1.0) - 1000.0).abs() < 1e-4);
    for t in [0.0, 0.25, 0.5, 0.9] {
        assert!((range.normalize(range.interpolate(t)) - t).abs() < 1e-5);
    }
    assert_eq!(range.normalize(5.0), 0.0);
    assert_eq!(range.normalize(2000.0), 1.0);
}

#[test]
fn tenseness_curve_endpoints_and_inverse() {
    // bottom of the pad is fully tense, top fully breathy
    assert!((tenseness_curve(0.0) - 1.0).abs() < 1e-6);
    assert!(tenseness_curve(1.0).abs() < 1e-6);
    for v in [0.0, 0.2, 0.5, 0.8, 1.0] {
        let back = tenseness_interpolation(tenseness_curve(v));
        assert!((back - v).abs() < 1e-4, "v {} -> {}", v, back);
    }
}

#[test]
fn tenseness_curve_is_monotonically_decreasing() {
    let mut prev = tenseness_curve(0.0);
    for i in 1..=20 {
        let t = tenseness_curve(i as f32 / 20.0);
        assert!(t < prev);
        prev = t;
    }
}

#[test]
fn pad_input_clamps_to_just_inside_the_pad() {
    let (f_low, t_low) = pad_input(-0.5, -0.5);
    assert!((f_low - 20.0).abs() < 1e-4);
    assert!((t_low - 1.0).abs() < 1e-6);

    let (f_high, t_high) = pad_input(1.5, 1.5);
    // clamped to 0.99, never quite the edge
    assert!((f_high - (20.0 + 980.0 * 0.99)).abs() < 1e-2);
    assert!((t_high - tenseness_curve(0.99)).abs() < 1e-6);
}

#[test]
fn stick_input_uses_per_axis_calibration() {
    // mechanical extremes of the right stick
    let (f, t) = stick_input(-1.0, -0.94);
    assert!((f - 20.0).abs() < 1e-3);
    assert!((t - 1.0).abs() < 1e-5);

    let (f, t) = stick_input(1.0, 0.95);
    assert!((f - 1000.0).abs() < 1e-3);
    assert!(t.abs() < 1e-5);

    // overshoot past the calibrated range clamps
    let (f, _) = stick_input(2.0, 0.0);
    assert!((f - 1000.0).abs() < 1e-3);
}

#[test]
fn latched_pad_never_touches_intensity() {
    // always-voice is the default: press and release leave intensity alone
    let mut pad = PadState::default();
    assert!(pad.always_voice());
    let mut out = Vec::new();
    pad.press(None, 0.5, 0.5, &mut out);
    assert!(pad.is_active());
    pad.release(&mut out);
    assert!(!pad.is_active());
    assert!(intensity_writes(&out).is_empty());
    // frequency and tenseness were still written by the press
    assert!(out
        .iter()
        .any(|e| matches!(e, TractEvent::SetScalar { param: ScalarParam::Frequency, .. })));
}

#[test]
fn unlatched_pad_gates_intensity_on_press_and_release() {
    let mut pad = PadState::default();
    let mut out = Vec::new();
    pad.set_always_voice(false, &mut out);
    assert_eq!(intensity_writes(&out), vec![0.0]);

    out.clear();
    pad.press(Some(3), 0.2, 0.8, &mut out);
    assert_eq!(pad.touch_id(), Some(3));
    assert_eq!(intensity_writes(&out), vec![1.0]);

    out.clear();
    pad.release(&mut out);
    assert_eq!(pad.touch_id(), None);
    assert_eq!(intensity_writes(&out), vec![0.0]);
}

#[test]
fn relatching_voices_immediately() {
    let mut pad = PadState::default();
    let mut out = Vec::new();
    pad.set_always_voice(false, &mut out);
    out.clear();
    pad.set_always_voice(true, &mut out);
    assert_eq!(intensity_writes(&out), vec![1.0]);
    // no-op when the latch already holds the requested value
    out.clear();
    pad.set_always_voice(true, &mut out);
    assert!(out.is_empty());
}

#[test]
fn clearing_the_latch_mid_press_keeps_the_voice_until_release() {
    let mut pad = PadState::default();
    let mut out = Vec::new();
    pad.press(None, 0.5, 0.5, &mut out);
    out.clear();
    pad.set_always_voice(false, &mut out);
    assert!(intensity_writes(&out).is_empty());
    pad.release(&mut out);
    assert_eq!(intensity_writes(&out), vec![0.0]);
}

#[test]
fn pad_slide_writes_both_glottis_scalars() {
    let pad = PadState::default();
    let mut out = Vec::new();
    pad.slide(0.0, 0.0, &mut out);
    assert_eq!(out.len(), 2);
    let (f, t) = pad_input(0.0, 0.0);
    assert!(matches!(
        out[0],
        TractEvent::SetScalar { param: ScalarParam::Frequency, value } if value == f
    ));
    assert!(matches!(
        out[1],
        TractEvent::SetScalar { param: ScalarParam::Tenseness, value } if value == t
    ));
}

#[test]
fn axis_normalization_clamps_both_ends() {
    assert_eq!(normalize_axis(-2.0, -1.0, 1.0), 0.0);
    assert_eq!(normalize_axis(2.0, -1.0, 1.0), 1.0);
    assert!((normalize_axis(0.0, -1.0, 1.0) - 0.5).abs() < 1e-6);
}
