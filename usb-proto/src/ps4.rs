//! Dualshock 4 / PS4 taiko report.
//!
//! One report layout serves both PS4 modes:
//!
//! - **Tatacon**: don left/right on square/circle, ka left/right on L1/R1.
//! - **Dualshock 4**: don left/right on cross/circle, ka left/right on
//!   L2/R2 with the trigger axes carrying hit strength.

use crate::mapping::HAT_NEUTRAL;

/// PS4-style input report.
///
/// Matches the report descriptor below. Total size: 9 bytes. The hat and the
/// first four buttons share a byte on the wire; [`Self::as_bytes`] does the
/// packing so the struct can stay field-per-control.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ps4Report {
    /// Left stick X (0x80 center).
    pub lx: u8,
    /// Left stick Y (0x80 center).
    pub ly: u8,
    /// Right stick X (0x80 center).
    pub rx: u8,
    /// Right stick Y (0x80 center).
    pub ry: u8,
    /// Hat switch (0-7 clockwise from north, 8 = released).
    pub hat: u8,
    /// Button bitfield (14 buttons).
    pub buttons: u16,
    /// Left trigger axis.
    pub lt: u8,
    /// Right trigger axis.
    pub rt: u8,
}

impl Ps4Report {
    pub const BUTTON_SQUARE: u16 = 1 << 0;
    pub const BUTTON_CROSS: u16 = 1 << 1;
    pub const BUTTON_CIRCLE: u16 = 1 << 2;
    pub const BUTTON_TRIANGLE: u16 = 1 << 3;
    pub const BUTTON_L1: u16 = 1 << 4;
    pub const BUTTON_R1: u16 = 1 << 5;
    pub const BUTTON_L2: u16 = 1 << 6;
    pub const BUTTON_R2: u16 = 1 << 7;
    pub const BUTTON_SHARE: u16 = 1 << 8;
    pub const BUTTON_OPTIONS: u16 = 1 << 9;
    pub const BUTTON_L3: u16 = 1 << 10;
    pub const BUTTON_R3: u16 = 1 << 11;
    pub const BUTTON_PS: u16 = 1 << 12;
    pub const BUTTON_TPAD: u16 = 1 << 13;

    /// Size of the report in bytes.
    pub const SIZE: usize = 9;

    /// Stick rest position.
    pub const STICK_CENTER: u8 = 0x80;

    /// Neutral report: no buttons, hat released, sticks centered,
    /// triggers at rest.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            lx: Self::STICK_CENTER,
            ly: Self::STICK_CENTER,
            rx: Self::STICK_CENTER,
            ry: Self::STICK_CENTER,
            hat: HAT_NEUTRAL,
            buttons: 0,
            lt: 0,
            rt: 0,
        }
    }

    /// Convert the report to bytes.
    ///
    /// Byte 4 packs the hat into the low nibble and buttons 1-4 into the
    /// high nibble; byte 6 carries buttons 13-14 with the counter bits
    /// left at zero.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.lx,
            self.ly,
            self.rx,
            self.ry,
            (self.hat & 0x0F) | (((self.buttons & 0x000F) << 4) as u8),
            ((self.buttons >> 4) & 0x00FF) as u8,
            ((self.buttons >> 12) & 0x0003) as u8,
            self.lt,
            self.rt,
        ]
    }
}

/// PS4-style report descriptor.
///
/// Four 8-bit axes, a hat switch, 14 buttons, a 6-bit pad where the report
/// counter would sit, and two 8-bit trigger axes.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Sticks (4 axes, 8-bit) ---
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch ---
    0x09, 0x39, //   Usage (Hat Switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x35, 0x00, //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    //
    // --- Buttons (14 buttons + 6 bits padding) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0E, //   Report Count (14)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x75, 0x06, //   Report Size (6)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant) - padding
    //
    // --- Triggers (2 axes, 8-bit) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x33, //   Usage (Rx)
    0x09, 0x34, //   Usage (Ry)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];
