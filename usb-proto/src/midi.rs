//! Percussion note state and USB-MIDI event packets.
//!
//! The MIDI mode renders each drum zone as a note on the General MIDI
//! percussion channel with velocity scaled from the raw hit strength.
//! [`MidiReport`] is pure state; the transport compares consecutive reports
//! and emits note-on/note-off packets for the edges, so re-rendering the
//! same state produces no traffic.

use crate::mapping::velocity_from_raw;

/// MIDI channel 10 (0-based), the General MIDI percussion channel.
pub const PERCUSSION_CHANNEL: u8 = 9;

/// General MIDI percussion notes, one per drum zone.
pub mod note {
    /// Acoustic snare.
    pub const DON_LEFT: u8 = 38;
    /// Electric snare.
    pub const DON_RIGHT: u8 = 40;
    /// Closed hi-hat.
    pub const KA_LEFT: u8 = 42;
    /// Open hi-hat.
    pub const KA_RIGHT: u8 = 46;
}

/// Sounding state of a single note.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteState {
    pub on: bool,
    /// Velocity 1-127 while on, 0 otherwise.
    pub velocity: u8,
}

impl NoteState {
    /// Note not sounding.
    pub const OFF: Self = Self {
        on: false,
        velocity: 0,
    };

    /// Sounding note with velocity scaled from a raw pad value.
    #[inline]
    #[must_use]
    pub fn struck(raw: u16) -> Self {
        Self {
            on: true,
            velocity: velocity_from_raw(raw),
        }
    }
}

/// Note state for all four drum zones.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiReport {
    pub don_left: NoteState,
    pub ka_left: NoteState,
    pub don_right: NoteState,
    pub ka_right: NoteState,
}

impl MidiReport {
    /// Size of the state image in bytes.
    pub const SIZE: usize = 4;

    /// Neutral report: all notes off.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            don_left: NoteState::OFF,
            ka_left: NoteState::OFF,
            don_right: NoteState::OFF,
            ka_right: NoteState::OFF,
        }
    }

    /// Zone states paired with their note numbers, in zone order.
    #[must_use]
    pub fn notes(&self) -> [(u8, NoteState); 4] {
        [
            (note::DON_LEFT, self.don_left),
            (note::KA_LEFT, self.ka_left),
            (note::DON_RIGHT, self.don_right),
            (note::KA_RIGHT, self.ka_right),
        ]
    }

    /// Convert the report to a state image: one velocity byte per zone,
    /// 0 meaning off. Lossless because sounding notes always have
    /// velocity at least 1.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let byte = |state: NoteState| if state.on { state.velocity } else { 0 };
        [
            byte(self.don_left),
            byte(self.ka_left),
            byte(self.don_right),
            byte(self.ka_right),
        ]
    }
}

/// USB-MIDI event packet for a note-on (cable 0).
#[inline]
#[must_use]
pub fn note_on_packet(note: u8, velocity: u8) -> [u8; 4] {
    [0x09, 0x90 | PERCUSSION_CHANNEL, note & 0x7F, velocity & 0x7F]
}

/// USB-MIDI event packet for a note-off (cable 0).
#[inline]
#[must_use]
pub fn note_off_packet(note: u8) -> [u8; 4] {
    [0x08, 0x80 | PERCUSSION_CHANNEL, note & 0x7F, 0x00]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struck_velocity_floor() {
        let state = NoteState::struck(0);
        assert!(state.on);
        assert_eq!(state.velocity, 1);
    }

    #[test]
    fn test_state_image_zero_means_off() {
        let mut report = MidiReport::neutral();
        assert_eq!(report.as_bytes(), [0, 0, 0, 0]);

        report.don_right = NoteState::struck(4095);
        assert_eq!(report.as_bytes(), [0, 0, 127, 0]);
    }

    #[test]
    fn test_note_on_packet() {
        assert_eq!(note_on_packet(note::DON_LEFT, 100), [0x09, 0x99, 38, 100]);
    }

    #[test]
    fn test_note_off_packet() {
        assert_eq!(note_off_packet(note::KA_RIGHT), [0x08, 0x89, 46, 0]);
    }

    #[test]
    fn test_packet_data_bytes_masked() {
        // Data bytes must stay below 0x80 even for bogus inputs.
        let packet = note_on_packet(0xFF, 0xFF);
        assert!(packet[2] < 0x80);
        assert!(packet[3] < 0x80);
    }
}
