use eframe::egui;
use gilrs::{Axis, Button, EventType, Gilrs};
use log::{info, warn};
use std::time::{Duration, Instant};

use crate::launcher::view_state::{LauncherEvent, Step};

/// Decode this frame's key presses
pub fn keyboard_events(input: &egui::InputState) -> Vec<LauncherEvent> {
    let bindings = [
        (egui::Key::ArrowLeft, LauncherEvent::Navigate(Step::Previous)),
        (egui::Key::ArrowUp, LauncherEvent::Navigate(Step::Previous)),
        (egui::Key::ArrowRight, LauncherEvent::Navigate(Step::Next)),
        (egui::Key::ArrowDown, LauncherEvent::Navigate(Step::Next)),
        (egui::Key::Enter, LauncherEvent::Confirm),
        (egui::Key::Space, LauncherEvent::Confirm),
        (egui::Key::Escape, LauncherEvent::Quit),
    ];

    bindings
        .iter()
        .filter(|(key, _)| input.key_pressed(*key))
        .map(|(_, event)| *event)
        .collect()
}

/// Rate limit for analog navigation
///
/// A stick held past the threshold keeps reporting motion; only one step is
/// accepted per `delay`.
#[derive(Debug, Clone)]
pub struct AxisGate {
    threshold: f32,
    delay: Duration,
    last_step: Option<Instant>,
}

impl AxisGate {
    pub fn new(threshold: f32, delay: Duration) -> Self {
        Self {
            threshold,
            delay,
            last_step: None,
        }
    }

    /// Turn an axis reading into a navigation step, if one is due
    pub fn step(&mut self, value: f32, now: Instant) -> Option<Step> {
        let step = if value > self.threshold {
            Step::Next
        } else if value < -self.threshold {
            Step::Previous
        } else {
            return None;
        };

        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.delay {
                return None;
            }
        }

        self.last_step = Some(now);
        Some(step)
    }
}

/// Joystick and gamepad input
pub struct GamepadInput {
    gilrs: Gilrs,
    gate: AxisGate,
}

impl GamepadInput {
    /// Open the gamepad subsystem; `None` if the platform has none
    pub fn open(gate: AxisGate) -> Option<Self> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(e) => {
                warn!("Gamepad support unavailable: {}", e);
                return None;
            }
        };

        for (_id, gamepad) in gilrs.gamepads() {
            info!("Gamepad '{}' detected", gamepad.name());
        }

        Some(Self { gilrs, gate })
    }

    /// Drain pending pad events
    pub fn poll(&mut self) -> Vec<LauncherEvent> {
        let mut events = Vec::new();
        let now = Instant::now();

        while let Some(gilrs::Event { event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::AxisChanged(axis, value, _) => {
                    // Stick up reads positive, but "up" means previous like the arrow keys
                    let value = match axis {
                        Axis::LeftStickX | Axis::DPadX => value,
                        Axis::LeftStickY | Axis::DPadY => -value,
                        _ => continue,
                    };
                    if let Some(step) = self.gate.step(value, now) {
                        events.push(LauncherEvent::Navigate(step));
                    }
                }
                EventType::ButtonPressed(button, _) => match button {
                    Button::South => events.push(LauncherEvent::Confirm),
                    Button::DPadLeft | Button::DPadUp => events.push(LauncherEvent::Navigate(Step::Previous)),
                    Button::DPadRight | Button::DPadDown => events.push(LauncherEvent::Navigate(Step::Next)),
                    _ => {}
                },
                EventType::Connected => info!("Gamepad connected"),
                EventType::Disconnected => info!("Gamepad disconnected"),
                _ => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AxisGate {
        AxisGate::new(0.5, Duration::from_millis(150))
    }

    #[test]
    fn small_deflection_is_ignored() {
        let mut gate = gate();
        let now = Instant::now();
        assert_eq!(gate.step(0.3, now), None);
        assert_eq!(gate.step(-0.5, now), None);
    }

    #[test]
    fn deflection_maps_to_direction() {
        let now = Instant::now();
        assert_eq!(gate().step(0.9, now), Some(Step::Next));
        assert_eq!(gate().step(-0.9, now), Some(Step::Previous));
    }

    #[test]
    fn repeated_motion_within_delay_is_dropped() {
        let mut gate = gate();
        let start = Instant::now();

        assert_eq!(gate.step(0.8, start), Some(Step::Next));
        assert_eq!(gate.step(0.9, start + Duration::from_millis(40)), None);
        assert_eq!(gate.step(1.0, start + Duration::from_millis(149)), None);
        assert_eq!(gate.step(1.0, start + Duration::from_millis(150)), Some(Step::Next));
    }

    #[test]
    fn centred_stick_does_not_reset_the_delay() {
        let mut gate = gate();
        let start = Instant::now();

        assert_eq!(gate.step(0.8, start), Some(Step::Next));
        assert_eq!(gate.step(0.0, start + Duration::from_millis(50)), None);
        assert_eq!(gate.step(-0.8, start + Duration::from_millis(100)), None);
        assert_eq!(gate.step(-0.8, start + Duration::from_millis(200)), Some(Step::Previous));
    }
}
