//! The closed set of emulated USB devices.

/// Output mode: which device the adapter currently emulates.
///
/// Exactly one mode is active at a time. The set is closed so that report
/// rendering can match exhaustively; adding a mode is a compile-time change
/// that forces every dispatch site to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Switch taiko drum controller.
    SwitchTatacon,
    /// Switch wired pro-style pad.
    SwitchHoripad,
    /// PS3 pad with per-button pressure.
    Dualshock3,
    /// PS4 taiko drum controller.
    Ps4Tatacon,
    /// PS4 pad.
    Dualshock4,
    /// NKRO keyboard, player 1 key set (D F J K).
    KeyboardP1,
    /// NKRO keyboard, player 2 key set (C V B N).
    KeyboardP2,
    /// XInput pad.
    Xbox360,
    /// XInput pad with hit strength on the left stick.
    Xbox360AnalogP1,
    /// XInput pad with hit strength on the right stick.
    Xbox360AnalogP2,
    /// USB-MIDI percussion instrument.
    Midi,
    /// Plain-text sensor readout over CDC.
    Debug,
}

impl OutputMode {
    /// Number of modes.
    pub const COUNT: usize = 12;

    /// All modes, in menu order.
    pub const ALL: [OutputMode; Self::COUNT] = [
        OutputMode::SwitchTatacon,
        OutputMode::SwitchHoripad,
        OutputMode::Dualshock3,
        OutputMode::Ps4Tatacon,
        OutputMode::Dualshock4,
        OutputMode::KeyboardP1,
        OutputMode::KeyboardP2,
        OutputMode::Xbox360,
        OutputMode::Xbox360AnalogP1,
        OutputMode::Xbox360AnalogP2,
        OutputMode::Midi,
        OutputMode::Debug,
    ];

    /// Position of this mode in [`Self::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            OutputMode::SwitchTatacon => 0,
            OutputMode::SwitchHoripad => 1,
            OutputMode::Dualshock3 => 2,
            OutputMode::Ps4Tatacon => 3,
            OutputMode::Dualshock4 => 4,
            OutputMode::KeyboardP1 => 5,
            OutputMode::KeyboardP2 => 6,
            OutputMode::Xbox360 => 7,
            OutputMode::Xbox360AnalogP1 => 8,
            OutputMode::Xbox360AnalogP2 => 9,
            OutputMode::Midi => 10,
            OutputMode::Debug => 11,
        }
    }

    /// Inverse of [`Self::index`]. Returns `None` for out-of-range values,
    /// which keeps decoding persisted bytes total.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<OutputMode> {
        match index {
            0 => Some(OutputMode::SwitchTatacon),
            1 => Some(OutputMode::SwitchHoripad),
            2 => Some(OutputMode::Dualshock3),
            3 => Some(OutputMode::Ps4Tatacon),
            4 => Some(OutputMode::Dualshock4),
            5 => Some(OutputMode::KeyboardP1),
            6 => Some(OutputMode::KeyboardP2),
            7 => Some(OutputMode::Xbox360),
            8 => Some(OutputMode::Xbox360AnalogP1),
            9 => Some(OutputMode::Xbox360AnalogP2),
            10 => Some(OutputMode::Midi),
            11 => Some(OutputMode::Debug),
            _ => None,
        }
    }
}
