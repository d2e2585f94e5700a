//! Dualshock 3 report with per-button pressure.
//!
//! Drum mapping: don left/right on cross/circle, ka left/right on L1/R1.
//! The matching pressure slots carry the raw hit strength scaled to a byte,
//! so titles that read analog pressure get real dynamics instead of a
//! constant full press.

use crate::mapping::HAT_NEUTRAL;

/// Dualshock 3 input report.
///
/// Matches the report descriptor below. Total size: 19 bytes
/// (buttons: 2, hat: 1, sticks: 4x1, pressure: 12x1).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct Ps3Report {
    /// Button bitfield (13 buttons).
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
    /// Analog pressure bytes, indexed by the `PRESSURE_*` constants.
    pub pressure: [u8; Self::PRESSURE_COUNT],
}

impl Ps3Report {
    pub const BUTTON_SQUARE: u16 = 1 << 0;
    pub const BUTTON_CROSS: u16 = 1 << 1;
    pub const BUTTON_CIRCLE: u16 = 1 << 2;
    pub const BUTTON_TRIANGLE: u16 = 1 << 3;
    pub const BUTTON_L1: u16 = 1 << 4;
    pub const BUTTON_R1: u16 = 1 << 5;
    pub const BUTTON_L2: u16 = 1 << 6;
    pub const BUTTON_R2: u16 = 1 << 7;
    pub const BUTTON_SELECT: u16 = 1 << 8;
    pub const BUTTON_START: u16 = 1 << 9;
    pub const BUTTON_L3: u16 = 1 << 10;
    pub const BUTTON_R3: u16 = 1 << 11;
    pub const BUTTON_PS: u16 = 1 << 12;

    // Pressure slot indices, Dualshock 3 order.
    pub const PRESSURE_UP: usize = 0;
    pub const PRESSURE_RIGHT: usize = 1;
    pub const PRESSURE_DOWN: usize = 2;
    pub const PRESSURE_LEFT: usize = 3;
    pub const PRESSURE_L2: usize = 4;
    pub const PRESSURE_R2: usize = 5;
    pub const PRESSURE_L1: usize = 6;
    pub const PRESSURE_R1: usize = 7;
    pub const PRESSURE_TRIANGLE: usize = 8;
    pub const PRESSURE_CIRCLE: usize = 9;
    pub const PRESSURE_CROSS: usize = 10;
    pub const PRESSURE_SQUARE: usize = 11;
    pub const PRESSURE_COUNT: usize = 12;

    /// Size of the report in bytes.
    pub const SIZE: usize = 19;

    /// Stick rest position.
    pub const STICK_CENTER: u8 = 0x80;

    /// Neutral report: no buttons, hat released, sticks centered, no pressure.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            hat: HAT_NEUTRAL,
            lx: Self::STICK_CENTER,
            ly: Self::STICK_CENTER,
            rx: Self::STICK_CENTER,
            ry: Self::STICK_CENTER,
            pressure: [0; Self::PRESSURE_COUNT],
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = buttons[0];
        bytes[1] = buttons[1];
        bytes[2] = self.hat;
        bytes[3] = self.lx;
        bytes[4] = self.ly;
        bytes[5] = self.rx;
        bytes[6] = self.ry;
        bytes[7..].copy_from_slice(&self.pressure);
        bytes
    }
}

/// Dualshock 3 report descriptor.
///
/// 13 buttons, one hat switch, four 8-bit axes and a vendor-defined block of
/// 12 pressure bytes.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (13 buttons + 3 bits padding) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0D, //   Usage Maximum (Button 13)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0D, //   Report Count (13)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x03, //   Report Count (3)
    0x81, 0x01, //   Input (Constant) - padding
    //
    // --- Hat switch (4 bits + 4 bits padding) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x39, //   Usage (Hat Switch)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant) - padding
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
    // --- Pressure bytes ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined)
    0x09, 0x21, //   Usage (0x21)
    0x95, 0x0C, //   Report Count (12)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_bytes() {
        let bytes = Ps3Report::neutral().as_bytes();
        assert_eq!(&bytes[..7], &[0x00, 0x00, 0x08, 0x80, 0x80, 0x80, 0x80]);
        assert!(bytes[7..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pressure_slots_serialize_in_order() {
        let mut report = Ps3Report::neutral();
        report.pressure[Ps3Report::PRESSURE_CROSS] = 0xAB;
        report.pressure[Ps3Report::PRESSURE_L1] = 0x42;
        let bytes = report.as_bytes();
        assert_eq!(bytes[7 + Ps3Report::PRESSURE_CROSS], 0xAB);
        assert_eq!(bytes[7 + Ps3Report::PRESSURE_L1], 0x42);
    }
}
