//! Shared conversions between sensor values and protocol fields.
//!
//! Drum pads report a raw 12-bit sensor reading (0-4095). The protocols
//! express hit strength in different units, so the scaling helpers here are
//! shared by every report builder.

/// Maximum raw pad value (12-bit ADC).
pub const RAW_MAX: u16 = 4095;

/// Hat switch value for "no direction pressed".
pub const HAT_NEUTRAL: u8 = 8;

/// Encode a four-way directional pad as a HID hat switch value.
///
/// Returns 0-7 clockwise from north, or [`HAT_NEUTRAL`] when nothing (or a
/// contradictory combination) is pressed.
#[inline]
#[must_use]
pub fn hat_from_dpad(up: bool, down: bool, left: bool, right: bool) -> u8 {
    match (up, down, left, right) {
        (true, false, false, false) => 0,
        (true, false, false, true) => 1,
        (false, false, false, true) => 2,
        (false, true, false, true) => 3,
        (false, true, false, false) => 4,
        (false, true, true, false) => 5,
        (false, false, true, false) => 6,
        (true, false, true, false) => 7,
        _ => HAT_NEUTRAL,
    }
}

/// Scale a raw pad value (0-4095) to a pressure byte (0-255).
#[inline]
#[must_use]
pub fn pressure_from_raw(raw: u16) -> u8 {
    let clamped = if raw > RAW_MAX { RAW_MAX } else { raw };
    (clamped >> 4) as u8
}

/// Scale a raw pad value (0-4095) to a positive stick deflection (0-32767).
#[inline]
#[must_use]
pub fn axis_from_raw(raw: u16) -> i16 {
    let clamped = if raw > RAW_MAX { RAW_MAX } else { raw };
    (clamped << 3) as i16
}

/// Scale a raw pad value (0-4095) to a MIDI velocity (1-127).
///
/// The floor of 1 keeps a triggered note audible even when the sensor
/// reading has already decayed; velocity 0 would be a note-off.
#[inline]
#[must_use]
pub fn velocity_from_raw(raw: u16) -> u8 {
    let clamped = if raw > RAW_MAX { RAW_MAX } else { raw };
    let velocity = (clamped >> 5) as u8;
    if velocity == 0 {
        1
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hat_cardinal_directions() {
        assert_eq!(hat_from_dpad(true, false, false, false), 0);
        assert_eq!(hat_from_dpad(false, false, false, true), 2);
        assert_eq!(hat_from_dpad(false, true, false, false), 4);
        assert_eq!(hat_from_dpad(false, false, true, false), 6);
    }

    #[test]
    fn test_hat_diagonals() {
        assert_eq!(hat_from_dpad(true, false, false, true), 1);
        assert_eq!(hat_from_dpad(false, true, false, true), 3);
        assert_eq!(hat_from_dpad(false, true, true, false), 5);
        assert_eq!(hat_from_dpad(true, false, true, false), 7);
    }

    #[test]
    fn test_hat_neutral_and_contradictions() {
        assert_eq!(hat_from_dpad(false, false, false, false), HAT_NEUTRAL);
        assert_eq!(hat_from_dpad(true, true, false, false), HAT_NEUTRAL);
        assert_eq!(hat_from_dpad(false, false, true, true), HAT_NEUTRAL);
        assert_eq!(hat_from_dpad(true, true, true, true), HAT_NEUTRAL);
    }

    #[test]
    fn test_pressure_endpoints() {
        assert_eq!(pressure_from_raw(0), 0);
        assert_eq!(pressure_from_raw(RAW_MAX), 255);
        // Out-of-range input clamps instead of wrapping.
        assert_eq!(pressure_from_raw(u16::MAX), 255);
    }

    #[test]
    fn test_axis_endpoints() {
        assert_eq!(axis_from_raw(0), 0);
        assert_eq!(axis_from_raw(RAW_MAX), 32760);
        assert_eq!(axis_from_raw(u16::MAX), 32760);
    }

    #[test]
    fn test_velocity_endpoints_and_floor() {
        assert_eq!(velocity_from_raw(RAW_MAX), 127);
        // A decayed reading still produces an audible note.
        assert_eq!(velocity_from_raw(0), 1);
        assert_eq!(velocity_from_raw(31), 1);
        assert_eq!(velocity_from_raw(32), 1);
        assert_eq!(velocity_from_raw(64), 2);
    }
}
