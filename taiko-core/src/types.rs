//! Core input types: PadState, DrumState, ControllerState, InputSnapshot.

/// One of the four drum strike zones.
///
/// A taiko drum has two hit flavors (don = center, ka = rim) on two sides,
/// giving four independently sensed zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    DonLeft,
    KaLeft,
    DonRight,
    KaRight,
}

impl Zone {
    /// All zones in sensor channel order.
    pub const ALL: [Zone; 4] = [Zone::DonLeft, Zone::KaLeft, Zone::DonRight, Zone::KaRight];
}

/// State of a single drum pad zone for one tick.
///
/// `raw` is the latest sensor amplitude in the 12-bit range `[0, 4095]`.
/// `triggered` is the debounced hit decision derived from it; protocol
/// rendering treats `triggered` as the button press and `raw` as the
/// analog strength.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadState {
    pub triggered: bool,
    pub raw: u16,
}

impl PadState {
    /// Pad at rest: not triggered, zero amplitude.
    pub const IDLE: Self = Self {
        triggered: false,
        raw: 0,
    };

    /// A triggered pad with the given amplitude.
    #[inline]
    #[must_use]
    pub const fn struck(raw: u16) -> Self {
        Self {
            triggered: true,
            raw,
        }
    }
}

/// All four drum zones for one tick.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrumState {
    pub don_left: PadState,
    pub ka_left: PadState,
    pub don_right: PadState,
    pub ka_right: PadState,
}

impl DrumState {
    /// All pads at rest.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            don_left: PadState::IDLE,
            ka_left: PadState::IDLE,
            don_right: PadState::IDLE,
            ka_right: PadState::IDLE,
        }
    }

    /// Access a pad by zone.
    #[inline]
    #[must_use]
    pub const fn pad(&self, zone: Zone) -> PadState {
        match zone {
            Zone::DonLeft => self.don_left,
            Zone::KaLeft => self.ka_left,
            Zone::DonRight => self.don_right,
            Zone::KaRight => self.ka_right,
        }
    }
}

/// Directional pad state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dpad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Dpad {
    /// No direction pressed.
    pub const NEUTRAL: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };
}

/// Face and system buttons on the control panel.
///
/// Directions use compass names so the same field maps cleanly onto hosts
/// that label the diamond differently (Switch Y/X/B/A vs. PS square/
/// triangle/cross/circle).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
    pub l: bool,
    pub r: bool,
    pub start: bool,
    pub select: bool,
    pub home: bool,
    pub share: bool,
}

impl Buttons {
    /// No buttons pressed.
    pub const NEUTRAL: Self = Self {
        north: false,
        east: false,
        south: false,
        west: false,
        l: false,
        r: false,
        start: false,
        select: false,
        home: false,
        share: false,
    };
}

/// Control panel state: dpad plus buttons.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub dpad: Dpad,
    pub buttons: Buttons,
}

impl ControllerState {
    /// Nothing pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            dpad: Dpad::NEUTRAL,
            buttons: Buttons::NEUTRAL,
        }
    }
}

/// Complete input snapshot for one tick.
///
/// This is the latest-value contract between sampling and rendering: the
/// sampler overwrites the snapshot each tick and the renderer reads whatever
/// is current. Snapshots are never queued.
///
/// # Example
///
/// ```
/// use taiko_core::{InputSnapshot, PadState};
///
/// let mut snapshot = InputSnapshot::neutral();
/// snapshot.drum.don_left = PadState::struck(3000);
/// assert!(snapshot.drum.don_left.triggered);
/// assert!(!snapshot.drum.ka_left.triggered);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub drum: DrumState,
    pub controller: ControllerState,
}

impl InputSnapshot {
    /// Everything at rest: no pads triggered, no buttons pressed, raws zero.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            drum: DrumState::neutral(),
            controller: ControllerState::neutral(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_snapshot_is_all_at_rest() {
        let snapshot = InputSnapshot::neutral();
        for zone in Zone::ALL {
            assert_eq!(snapshot.drum.pad(zone), PadState::IDLE);
        }
        assert_eq!(snapshot.controller, ControllerState::neutral());
    }

    #[test]
    fn test_pad_struck_carries_amplitude() {
        let pad = PadState::struck(1234);
        assert!(pad.triggered);
        assert_eq!(pad.raw, 1234);
    }

    #[test]
    fn test_drum_pad_accessor_matches_fields() {
        let mut drum = DrumState::neutral();
        drum.ka_right = PadState::struck(99);
        assert_eq!(drum.pad(Zone::KaRight), drum.ka_right);
        assert_eq!(drum.pad(Zone::DonLeft), PadState::IDLE);
    }
}
