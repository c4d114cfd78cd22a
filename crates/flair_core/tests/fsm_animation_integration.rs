//! Integration tests for FSM + animation
//!
//! These tests verify that:
//! - FSM transitions can retarget property tweens and springs
//! - Events with no transition from the current state are ignored
//! - Event-driven state changes compose with time-driven animation

use flair_animation::{Easing, KeyframeProperties, PropertyTween, Spring, SpringConfig};
use flair_core::fsm::StateMachine;

const IDLE: u32 = 0;
const HOVERED: u32 = 1;
const PRESSED: u32 = 2;

const POINTER_ENTER: u32 = 1;
const POINTER_LEAVE: u32 = 2;
const POINTER_DOWN: u32 = 3;
const POINTER_UP: u32 = 4;

fn button_fsm() -> StateMachine {
    StateMachine::builder(IDLE)
        .on(IDLE, POINTER_ENTER, HOVERED)
        .on(HOVERED, POINTER_LEAVE, IDLE)
        .on(HOVERED, POINTER_DOWN, PRESSED)
        .on(PRESSED, POINTER_UP, HOVERED)
        .on(PRESSED, POINTER_LEAVE, IDLE)
        .build()
}

fn scale_for(state: u32) -> f32 {
    match state {
        HOVERED => 1.02,
        PRESSED => 0.98,
        _ => 1.0,
    }
}

/// Each state change retargets a spring that animates the button scale
#[test]
fn test_fsm_drives_spring_target() {
    let mut fsm = button_fsm();
    let mut spring = Spring::new(SpringConfig::stiff(), 1.0);

    for event in [POINTER_ENTER, POINTER_DOWN] {
        let state = fsm.send(event);
        spring.set_target(scale_for(state));
    }
    assert_eq!(fsm.current_state(), PRESSED);

    for _ in 0..120 {
        spring.step(1.0 / 60.0);
    }
    assert!((spring.value() - 0.98).abs() < 1e-3);

    let state = fsm.send(POINTER_LEAVE);
    assert_eq!(state, IDLE);
    spring.set_target(scale_for(state));
    for _ in 0..120 {
        spring.step(1.0 / 60.0);
    }
    assert!((spring.value() - 1.0).abs() < 1e-3);
}

/// A tween retargeted mid-flight continues from where it is
#[test]
fn test_fsm_retargets_tween_mid_flight() {
    let mut fsm = button_fsm();
    let mut tween = PropertyTween::new(KeyframeProperties::opacity(0.0), 200.0, Easing::Linear);

    fsm.send(POINTER_ENTER);
    tween.retarget(KeyframeProperties::opacity(1.0));
    tween.tick(100.0);
    assert!((tween.current().resolved_opacity() - 0.5).abs() < 1e-5);

    fsm.send(POINTER_LEAVE);
    tween.retarget(KeyframeProperties::opacity(0.0));
    assert!((tween.current().resolved_opacity() - 0.5).abs() < 1e-5);
    tween.tick(200.0);
    assert_eq!(tween.current().resolved_opacity(), 0.0);
}

/// Events that are invalid in the current state change neither the FSM nor the animation
#[test]
fn test_invalid_events_leave_animation_alone() {
    let mut fsm = button_fsm();
    let mut spring = Spring::new(SpringConfig::stiff(), 1.0);

    assert!(!fsm.can_send(POINTER_DOWN));
    let state = fsm.send(POINTER_DOWN);
    assert_eq!(state, IDLE);
    spring.set_target(scale_for(state));
    spring.step(1.0 / 60.0);
    assert_eq!(spring.value(), 1.0);
    assert!(spring.is_settled());
}

/// Resetting mid-press returns to idle so the next hover starts fresh
#[test]
fn test_reset_returns_to_idle() {
    let mut fsm = button_fsm();
    fsm.send(POINTER_ENTER);
    fsm.send(POINTER_DOWN);
    assert!(fsm.is_in(PRESSED));

    fsm.reset();
    assert!(fsm.is_in(IDLE));
    assert!(fsm.can_send(POINTER_ENTER));
    assert_eq!(fsm.send(POINTER_UP), IDLE);
}
