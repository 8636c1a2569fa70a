//! Integration tests for the nx-core translation tables.
//!
//! These tests exercise the public API end-to-end: key codes through the
//! gamepad table and text rules, and view points through the screen transform.

use nx_core::{
    DeviceEvent, GamepadButton, KeyMapper, PadIndex, ScreenTransform, ViewPoint, ViewSize,
    WindowSize,
};

#[test]
fn test_every_key_code_press_then_release_yields_at_most_one_edge_each() {
    for code in 0..=u16::MAX {
        let down = KeyMapper::key_down(code, "");
        let up = KeyMapper::key_up(code);
        match (down, up) {
            (
                Some(DeviceEvent::GamepadPressed { pad: p1, button: b1 }),
                Some(DeviceEvent::GamepadReleased { pad: p2, button: b2 }),
            ) => {
                assert_eq!((p1, b1), (p2, b2), "code {code} must release what it pressed");
            }
            (None, None) => {}
            other => panic!("code {code} produced an unbalanced pair: {other:?}"),
        }
    }
}

#[test]
fn test_left_arrow_scenario_touches_only_gamepad_zero() {
    // Arrange
    let left_arrow = 123;

    // Act
    let events: Vec<DeviceEvent> = [KeyMapper::key_down(left_arrow, ""), KeyMapper::key_up(left_arrow)]
        .into_iter()
        .flatten()
        .collect();

    // Assert
    assert_eq!(
        events,
        vec![
            DeviceEvent::GamepadPressed { pad: PadIndex::FIRST, button: GamepadButton::Left },
            DeviceEvent::GamepadReleased { pad: PadIndex::FIRST, button: GamepadButton::Left },
        ]
    );
    assert!(events.iter().all(|e| !matches!(
        e,
        DeviceEvent::GamepadPressed { pad, .. } | DeviceEvent::GamepadReleased { pad, .. }
            if *pad == PadIndex::SECOND
    )));
}

#[test]
fn test_each_gamepad_has_all_six_buttons_bound() {
    let buttons = [
        GamepadButton::Left,
        GamepadButton::Right,
        GamepadButton::Up,
        GamepadButton::Down,
        GamepadButton::A,
        GamepadButton::B,
    ];
    for pad in [PadIndex::FIRST, PadIndex::SECOND] {
        for button in buttons {
            let bound = (0..=u16::MAX).any(|c| KeyMapper::binding(c) == Some((pad, button)));
            assert!(bound, "pad {} button {button:?} has no key", pad.get());
        }
    }
}

#[test]
fn test_pointer_sampled_across_a_scaled_view_stays_inside_virtual_screen() {
    // Arrange
    let transform = ScreenTransform::default();
    let fit = transform.fit(WindowSize::new(800.0, 600.0));
    let view = ViewSize::new(f64::from(fit.width), f64::from(fit.height));

    // Act / Assert
    for x in (0..fit.width).step_by(7) {
        for y in (0..fit.height).step_by(5) {
            let p = transform
                .to_virtual(ViewPoint::new(f64::from(x), f64::from(y)), view)
                .expect("view has area");
            let (vx, vy) = p.to_pixels();
            assert!(p.is_below_top_edge());
            assert!((0..160).contains(&vx), "x {vx}");
            assert!((0..=128).contains(&vy), "y {vy}");
        }
    }
}
