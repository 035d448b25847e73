// Host-side tests for the tongue controller and gamepad poller.

use tract_core::{
    AssistMode, ControlOwner, GamepadPoller, GamepadSnapshot, TongueController, TractEvent,
    TractPoint,
};

#[test]
fn pointer_input_adopts_raw_point_away_from_vowels() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    assert!(tongue.pointer_input(TractPoint::new(35.0, 1.0), &mut out));
    assert_eq!(out.len(), 1);
    match out[0] {
        TractEvent::SetTongue { index, diameter } => {
            assert!((index - 35.0).abs() < 1e-5);
            assert!((diameter - 1.0).abs() < 1e-5);
        }
        ref other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn pointer_input_snaps_onto_a_nearby_vowel() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    // a hair off the "æ" anchor at (15, 2.9)
    assert!(tongue.pointer_input(TractPoint::new(15.02, 2.9), &mut out));
    let pos = tongue.position();
    assert!((pos.index - 15.0).abs() < 0.05);
    assert!((pos.diameter - 2.9).abs() < 0.05);
}

#[test]
fn pointer_input_clamps_out_of_range_points() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    tongue.pointer_input(TractPoint::new(60.0, -2.0), &mut out);
    let pos = tongue.position();
    assert_eq!(pos.index, 44.0);
    assert_eq!(pos.diameter, 0.0);
}

#[test]
fn pointer_input_is_suppressed_while_gamepad_owns_control() {
    let mut tongue = TongueController::new();
    tongue.set_owner(ControlOwner::Gamepad);
    let before = tongue.position();
    let mut out = Vec::new();
    assert!(!tongue.pointer_input(TractPoint::new(35.0, 1.0), &mut out));
    assert!(out.is_empty());
    assert_eq!(tongue.position(), before);
}

#[test]
fn assisted_stick_inside_deadzone_does_nothing() {
    let mut tongue = TongueController::new();
    let before = tongue.position();
    let mut out = Vec::new();
    assert!(!tongue.gamepad_input(0.05, -0.05, AssistMode::Assisted, &mut out));
    assert!(out.is_empty());
    assert_eq!(tongue.position(), before);
}

#[test]
fn assisted_stick_integrates_velocity_away_from_vowels() {
    let mut tongue = TongueController::new();
    let start = tongue.position();
    let mut out = Vec::new();
    assert!(tongue.gamepad_input(1.0, 0.0, AssistMode::Assisted, &mut out));
    let pos = tongue.position();
    // one full-deflection sample moves the index by 1% of the tract length
    assert!((pos.index - (start.index + 0.44)).abs() < 1e-4);
    assert!((pos.diameter - start.diameter).abs() < 1e-5);
    // SetTongue plus the gamepad notification
    assert_eq!(out.len(), 2);
    assert!(matches!(out[1], TractEvent::GamepadTongue { .. }));
}

#[test]
fn assisted_stick_integration_saturates_at_the_tract_end() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    for _ in 0..200 {
        tongue.gamepad_input(1.0, 0.0, AssistMode::Assisted, &mut out);
    }
    assert_eq!(tongue.position().index, 44.0);
}

#[test]
fn direct_stick_center_rests_at_the_tract_midpoint() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    tongue.gamepad_input(0.0, 0.0, AssistMode::Direct, &mut out);
    let pos = tongue.position();
    assert!((pos.index - 22.0).abs() < 1e-5);
    assert!((pos.diameter - 2.0).abs() < 1e-5);
}

#[test]
fn direct_stick_extremes_cover_the_full_ranges() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    tongue.gamepad_input(1.0, 1.0, AssistMode::Direct, &mut out);
    assert_eq!(tongue.position(), TractPoint::new(44.0, 4.0));
    tongue.gamepad_input(-1.0, -1.0, AssistMode::Direct, &mut out);
    assert_eq!(tongue.position(), TractPoint::new(0.0, 0.0));
}

#[test]
fn direct_stick_response_is_finer_near_center() {
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    tongue.gamepad_input(0.25, 0.0, AssistMode::Direct, &mut out);
    let near = tongue.position().index - 22.0;
    tongue.gamepad_input(0.75, 0.0, AssistMode::Direct, &mut out);
    let far = tongue.position().index - 22.0;
    // equal stick steps cover more index range away from center
    assert!(far - near > near);
}

#[test]
fn poller_rate_limits_to_the_update_interval() {
    let mut poller = GamepadPoller::new();
    poller.connect(0);
    let snapshot = GamepadSnapshot {
        axes: [1.0, 0.0, 0.5, 0.5],
    };
    let mut tongue = TongueController::new();
    let mut out = Vec::new();

    assert!(poller.poll(20.0, Some(&snapshot), AssistMode::Assisted, &mut tongue, &mut out));
    let after_first = out.len();
    assert!(after_first > 0);

    // 10 ms later: below the 16 ms interval, skipped
    assert!(!poller.poll(30.0, Some(&snapshot), AssistMode::Assisted, &mut tongue, &mut out));
    assert_eq!(out.len(), after_first);

    assert!(poller.poll(40.0, Some(&snapshot), AssistMode::Assisted, &mut tongue, &mut out));
    assert!(out.len() > after_first);
}

#[test]
fn poller_skips_when_inactive_or_without_a_snapshot() {
    let mut poller = GamepadPoller::new();
    let snapshot = GamepadSnapshot::default();
    let mut tongue = TongueController::new();
    let mut out = Vec::new();

    assert!(!poller.poll(100.0, Some(&snapshot), AssistMode::Assisted, &mut tongue, &mut out));

    poller.connect(2);
    assert_eq!(poller.device_index(), Some(2));
    assert!(!poller.poll(100.0, None, AssistMode::Assisted, &mut tongue, &mut out));
    assert!(out.is_empty());

    poller.disconnect();
    assert!(!poller.is_active());
}

#[test]
fn every_consumed_sample_reports_glottis_state() {
    let mut poller = GamepadPoller::new();
    poller.connect(0);
    // sticks centered: tongue sample falls in the deadzone, glottis still maps
    let snapshot = GamepadSnapshot::default();
    let mut tongue = TongueController::new();
    let mut out = Vec::new();
    assert!(poller.poll(20.0, Some(&snapshot), AssistMode::Assisted, &mut tongue, &mut out));
    assert!(out
        .iter()
        .any(|e| matches!(e, TractEvent::GamepadGlottis { .. })));
}
