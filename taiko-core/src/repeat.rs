//! Hold-to-repeat edge detection for menu navigation buttons.
//!
//! Menu input runs on pulses, not levels: a button that is simply held must
//! not scroll once per tick. Each navigation button gets its own little
//! machine that pulses on the initial press and then, once a delay has
//! passed, at a fixed interval for as long as the button stays down.
//! Releasing the button rearms it immediately.

use crate::types::ControllerState;

/// Hold time before a held button starts auto-repeating, in milliseconds.
pub const REPEAT_DELAY_MS: u32 = 1000;

/// Pulse spacing once auto-repeat is active, in milliseconds.
pub const REPEAT_INTERVAL_MS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RepeatPhase {
    /// Button is up.
    Idle,
    /// Button is down, initial pulse sent, waiting out the repeat delay.
    Holding { pressed_at: u32 },
    /// Auto-repeat active.
    Repeating { last_pulse: u32 },
}

/// Repeat machine for one button.
///
/// Comparisons are strictly greater-than, so a pulse fires on the first tick
/// *after* the delay or interval has fully elapsed. Timestamps are wrapping
/// millisecond counts; elapsed times stay correct across `u32` rollover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct RepeatTimer {
    phase: RepeatPhase,
}

impl RepeatTimer {
    const fn new() -> Self {
        Self {
            phase: RepeatPhase::Idle,
        }
    }

    /// Advance one tick. Returns `true` when the button pulses this tick.
    fn check(&mut self, held: bool, now_ms: u32) -> bool {
        if !held {
            self.phase = RepeatPhase::Idle;
            return false;
        }
        match self.phase {
            RepeatPhase::Idle => {
                self.phase = RepeatPhase::Holding { pressed_at: now_ms };
                true
            }
            RepeatPhase::Holding { pressed_at } => {
                if now_ms.wrapping_sub(pressed_at) > REPEAT_DELAY_MS {
                    self.phase = RepeatPhase::Repeating { last_pulse: now_ms };
                    true
                } else {
                    false
                }
            }
            RepeatPhase::Repeating { last_pulse } => {
                if now_ms.wrapping_sub(last_pulse) > REPEAT_INTERVAL_MS {
                    self.phase = RepeatPhase::Repeating { last_pulse: now_ms };
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// One tick worth of navigation pulses.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulses {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

/// Repeat machines for all eight navigation buttons.
///
/// Owned by the menu engine; one instance carries the complete hold state,
/// so two menus (or a menu recreated after deactivation) never share timing.
#[derive(Clone, Copy, Debug)]
pub struct ButtonRepeater {
    up: RepeatTimer,
    down: RepeatTimer,
    left: RepeatTimer,
    right: RepeatTimer,
    north: RepeatTimer,
    east: RepeatTimer,
    south: RepeatTimer,
    west: RepeatTimer,
}

impl ButtonRepeater {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            up: RepeatTimer::new(),
            down: RepeatTimer::new(),
            left: RepeatTimer::new(),
            right: RepeatTimer::new(),
            north: RepeatTimer::new(),
            east: RepeatTimer::new(),
            south: RepeatTimer::new(),
            west: RepeatTimer::new(),
        }
    }

    /// Advance every machine one tick against the current button levels.
    pub fn check(&mut self, controller: &ControllerState, now_ms: u32) -> Pulses {
        Pulses {
            up: self.up.check(controller.dpad.up, now_ms),
            down: self.down.check(controller.dpad.down, now_ms),
            left: self.left.check(controller.dpad.left, now_ms),
            right: self.right.check(controller.dpad.right, now_ms),
            north: self.north.check(controller.buttons.north, now_ms),
            east: self.east.check(controller.buttons.east, now_ms),
            south: self.south.check(controller.buttons.south, now_ms),
            west: self.west.check(controller.buttons.west, now_ms),
        }
    }
}

impl Default for ButtonRepeater {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_pulses_immediately() {
        let mut timer = RepeatTimer::new();
        assert!(timer.check(true, 0));
        assert!(!timer.check(true, 1));
    }

    #[test]
    fn test_delay_boundary_is_strict() {
        let mut timer = RepeatTimer::new();
        assert!(timer.check(true, 100));
        // Exactly REPEAT_DELAY_MS elapsed: not yet.
        assert!(!timer.check(true, 100 + REPEAT_DELAY_MS));
        assert!(timer.check(true, 101 + REPEAT_DELAY_MS));
    }

    #[test]
    fn test_interval_boundary_is_strict() {
        let mut timer = RepeatTimer::new();
        assert!(timer.check(true, 0));
        assert!(timer.check(true, REPEAT_DELAY_MS + 1));
        let repeat_start = REPEAT_DELAY_MS + 1;
        assert!(!timer.check(true, repeat_start + REPEAT_INTERVAL_MS));
        assert!(timer.check(true, repeat_start + REPEAT_INTERVAL_MS + 1));
    }

    #[test]
    fn test_release_rearms() {
        let mut timer = RepeatTimer::new();
        assert!(timer.check(true, 0));
        assert!(!timer.check(false, 1));
        assert!(timer.check(true, 2));
    }

    #[test]
    fn test_hold_through_delay_and_five_intervals_pulses_six_times() {
        let mut timer = RepeatTimer::new();
        let end = REPEAT_DELAY_MS + 5 * REPEAT_INTERVAL_MS;
        let mut times = [0u32; 8];
        let mut pulses = 0;
        for now in 0..=end {
            if timer.check(true, now) {
                times[pulses] = now;
                pulses += 1;
            }
        }
        // Initial press plus five repeats. Strict comparisons put each pulse
        // one tick past its boundary.
        assert_eq!(pulses, 6);
        let mut expected = [0u32; 6];
        expected[1] = REPEAT_DELAY_MS + 1;
        for i in 2..6 {
            expected[i] = expected[i - 1] + REPEAT_INTERVAL_MS + 1;
        }
        assert_eq!(&times[..6], &expected);
    }

    #[test]
    fn test_elapsed_survives_clock_wraparound() {
        let mut timer = RepeatTimer::new();
        let pressed_at = u32::MAX - 100;
        assert!(timer.check(true, pressed_at));
        // 1000 ms later the counter has wrapped; still short of the delay.
        assert!(!timer.check(true, pressed_at.wrapping_add(REPEAT_DELAY_MS)));
        assert!(timer.check(true, pressed_at.wrapping_add(REPEAT_DELAY_MS + 1)));
    }

    #[test]
    fn test_machines_are_independent() {
        let mut repeater = ButtonRepeater::new();
        let mut controller = ControllerState::neutral();
        controller.dpad.left = true;
        let pulses = repeater.check(&controller, 0);
        assert!(pulses.left);
        assert!(!pulses.right);

        // Left now waits out its delay while east starts fresh.
        controller.buttons.east = true;
        let pulses = repeater.check(&controller, 10);
        assert!(!pulses.left);
        assert!(pulses.east);
    }
}
