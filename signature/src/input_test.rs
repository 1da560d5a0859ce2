use super::*;

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_drawing());
}

#[test]
fn drawing_state_exposes_start() {
    let state = InputState::Drawing { start: Point::new(4.0, 2.0) };
    assert!(state.is_drawing());
    assert_eq!(state.start(), Some(Point::new(4.0, 2.0)));
    assert_eq!(InputState::Idle.start(), None);
}

#[test]
fn pointer_event_point_for_every_variant() {
    let events = [
        PointerEvent::Down { x: 1.0, y: 2.0 },
        PointerEvent::Move { x: 1.0, y: 2.0 },
        PointerEvent::Up { x: 1.0, y: 2.0 },
        PointerEvent::Leave { x: 1.0, y: 2.0 },
    ];
    for event in events {
        assert_eq!(event.point(), Point::new(1.0, 2.0));
    }
}

#[test]
fn only_up_and_leave_are_releases() {
    assert!(!PointerEvent::Down { x: 0.0, y: 0.0 }.is_release());
    assert!(!PointerEvent::Move { x: 0.0, y: 0.0 }.is_release());
    assert!(PointerEvent::Up { x: 0.0, y: 0.0 }.is_release());
    assert!(PointerEvent::Leave { x: 0.0, y: 0.0 }.is_release());
}

#[test]
fn pointer_event_json_uses_type_tag() {
    let event: PointerEvent = serde_json::from_str(r#"{"type":"down","x":3,"y":4}"#).unwrap();
    assert_eq!(event, PointerEvent::Down { x: 3.0, y: 4.0 });

    let json = serde_json::to_value(PointerEvent::Leave { x: 1.5, y: 0.0 }).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "leave", "x": 1.5, "y": 0.0 }));
}
