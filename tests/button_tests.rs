mod common;

use common::{MockPin, MockTimeSource, PinLevel, TestInstant};
use ramzan_alarm::button::{CONFIDENCE_THRESHOLD, DebouncedButton};
use ramzan_alarm::{ButtonEvent, PinState};

type Button<'a, 't> = DebouncedButton<'t, TestInstant, MockPin<'a>, MockTimeSource>;

/// Advances time by one sample interval and ticks.
fn sample(timer: &MockTimeSource, button: &mut Button) {
    timer.advance_ms(2);
    button.tick();
}

#[test]
fn startup_seeds_stable_level_without_event() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Pressed);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    assert!(button.is_pressed());
    assert_eq!(button.consume_event(), None);

    // A few samples at the seeded level produce no edge.
    for _ in 0..10 {
        sample(&timer, &mut button);
        assert_eq!(button.consume_event(), None);
        assert!(button.is_pressed());
    }
}

#[test]
fn short_glitch_does_not_flip_stable_level() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    // 49 contrary samples: one short of the threshold.
    level.set(PinState::Pressed);
    for _ in 0..(CONFIDENCE_THRESHOLD - 1) {
        sample(&timer, &mut button);
        assert!(!button.is_pressed());
        assert_eq!(button.consume_event(), None);
    }

    // Glitch ends; the level never flipped.
    level.set(PinState::Released);
    for _ in 0..200 {
        sample(&timer, &mut button);
        assert_eq!(button.consume_event(), None);
    }
    assert!(!button.is_pressed());
}

#[test]
fn sustained_press_flips_exactly_once() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    level.set(PinState::Pressed);
    let mut presses = 0;
    for _ in 0..200 {
        sample(&timer, &mut button);
        if button.consume_event() == Some(ButtonEvent::Pressed) {
            presses += 1;
        }
    }

    assert_eq!(presses, 1);
    assert!(button.is_pressed());
}

#[test]
fn press_declared_at_exactly_threshold_samples() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    level.set(PinState::Pressed);
    for i in 1..=CONFIDENCE_THRESHOLD {
        sample(&timer, &mut button);
        if i < CONFIDENCE_THRESHOLD {
            assert!(!button.is_pressed(), "flipped early at sample {i}");
        }
    }
    assert!(button.is_pressed());
    assert!(button.changed());
}

#[test]
fn release_emits_released_event() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Pressed);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    level.set(PinState::Released);
    let mut releases = 0;
    for _ in 0..200 {
        sample(&timer, &mut button);
        if button.consume_event() == Some(ButtonEvent::Released) {
            releases += 1;
        }
    }

    assert_eq!(releases, 1);
    assert!(!button.is_pressed());
    assert_eq!(button.state(), PinState::Released);
}

#[test]
fn long_hold_emits_held_exactly_once() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    level.set(PinState::Pressed);

    // 2500 ms of continuous 2 ms sampling: one Pressed, one Held.
    let mut presses = 0;
    let mut holds = 0;
    for _ in 0..1250 {
        sample(&timer, &mut button);
        match button.consume_event() {
            Some(ButtonEvent::Pressed) => presses += 1,
            Some(ButtonEvent::Held) => holds += 1,
            _ => {}
        }
    }

    assert_eq!(presses, 1);
    assert_eq!(holds, 1);

    // Release and press again: Held can fire again for the new press.
    level.set(PinState::Released);
    for _ in 0..200 {
        sample(&timer, &mut button);
        button.consume_event();
    }
    level.set(PinState::Pressed);
    holds = 0;
    for _ in 0..1250 {
        sample(&timer, &mut button);
        if button.consume_event() == Some(ButtonEvent::Held) {
            holds += 1;
        }
    }
    assert_eq!(holds, 1);
}

#[test]
fn ticks_within_sample_interval_are_no_ops() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    // Flood with ticks without advancing time: no samples are taken, so a
    // pressed pin gains no confidence.
    level.set(PinState::Pressed);
    for _ in 0..500 {
        button.tick();
    }
    assert!(!button.is_pressed());

    // Real time passing makes the same ticking count.
    for _ in 0..CONFIDENCE_THRESHOLD {
        sample(&timer, &mut button);
    }
    assert!(button.is_pressed());
}

#[test]
fn consume_event_is_one_shot() {
    let timer = MockTimeSource::new();
    let level = PinLevel::new(PinState::Released);
    let mut button = DebouncedButton::new(MockPin(&level), &timer);

    level.set(PinState::Pressed);
    for _ in 0..CONFIDENCE_THRESHOLD {
        sample(&timer, &mut button);
    }

    assert_eq!(button.consume_event(), Some(ButtonEvent::Pressed));
    assert_eq!(button.consume_event(), None);
}
