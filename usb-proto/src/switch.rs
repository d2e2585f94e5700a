//! Switch-compatible gamepad report.
//!
//! One report layout serves both Switch modes. They differ only in how drum
//! hits are mapped onto it:
//!
//! - **Tatacon**: don left/right on Y/A, ka left/right on L/R, the inputs
//!   the taiko titles read.
//! - **Horipad**: don left/right on B/A, ka left/right on ZL/ZR, so confirm
//!   and cancel land on the drum for navigating system menus.

use crate::mapping::HAT_NEUTRAL;

/// Switch gamepad input report.
///
/// Matches the report descriptor below. Total size: 8 bytes
/// (buttons: 2, hat: 1, sticks: 4x1, vendor: 1).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct SwitchReport {
    /// Button bitfield (14 buttons).
    pub buttons: u16,
    /// Hat switch (0-7 clockwise from north, 8 = released).
    pub hat: u8,
    /// Left stick X (0x80 center).
    pub lx: u8,
    /// Left stick Y (0x80 center).
    pub ly: u8,
    /// Right stick X (0x80 center).
    pub rx: u8,
    /// Right stick Y (0x80 center).
    pub ry: u8,
    /// Vendor-defined byte, always zero.
    pub vendor: u8,
}

impl SwitchReport {
    pub const BUTTON_Y: u16 = 1 << 0;
    pub const BUTTON_B: u16 = 1 << 1;
    pub const BUTTON_A: u16 = 1 << 2;
    pub const BUTTON_X: u16 = 1 << 3;
    pub const BUTTON_L: u16 = 1 << 4;
    pub const BUTTON_R: u16 = 1 << 5;
    pub const BUTTON_ZL: u16 = 1 << 6;
    pub const BUTTON_ZR: u16 = 1 << 7;
    pub const BUTTON_MINUS: u16 = 1 << 8;
    pub const BUTTON_PLUS: u16 = 1 << 9;
    pub const BUTTON_L3: u16 = 1 << 10;
    pub const BUTTON_R3: u16 = 1 << 11;
    pub const BUTTON_HOME: u16 = 1 << 12;
    pub const BUTTON_CAPTURE: u16 = 1 << 13;

    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Stick rest position.
    pub const STICK_CENTER: u8 = 0x80;

    /// Neutral report: no buttons, hat released, sticks centered.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            hat: HAT_NEUTRAL,
            lx: Self::STICK_CENTER,
            ly: Self::STICK_CENTER,
            rx: Self::STICK_CENTER,
            ry: Self::STICK_CENTER,
            vendor: 0,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        [
            buttons[0], buttons[1], self.hat, self.lx, self.ly, self.rx, self.ry, self.vendor,
        ]
    }
}

/// Switch gamepad report descriptor.
///
/// 14 buttons, one hat switch, four 8-bit axes and a vendor byte, the layout
/// Switch-compatible pads present.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (14 buttons + 2 bits padding) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0E, //   Report Count (14)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x01, //   Input (Constant) - padding
    //
    // --- Hat switch (4 bits + 4 bits padding) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant) - padding
    //
    // --- Sticks (4 axes, 8-bit) ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Vendor byte ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_bytes() {
        let bytes = SwitchReport::neutral().as_bytes();
        assert_eq!(bytes, [0x00, 0x00, 0x08, 0x80, 0x80, 0x80, 0x80, 0x00]);
    }

    #[test]
    fn test_buttons_little_endian() {
        let mut report = SwitchReport::neutral();
        report.buttons = SwitchReport::BUTTON_PLUS | SwitchReport::BUTTON_A;
        let bytes = report.as_bytes();
        assert_eq!(bytes[0], 0x04);
        assert_eq!(bytes[1], 0x02);
    }
}
