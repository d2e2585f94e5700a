//! XInput wire report.
//!
//! Drum mapping: don left/right on A/B, ka left/right on LB/RB. The analog
//! variants additionally spread hit strength across one stick, left zones
//! deflecting negative and right zones positive:
//!
//! - X axis: don left (-) to don right (+)
//! - Y axis: ka left (-) to ka right (+)
//!
//! Player 1 uses the left stick, player 2 the right, so two adapters can
//! share one host without their axes colliding.

/// XInput input report (endpoint message 0x00, 20 bytes).
///
/// This is the native XInput wire layout, not a HID report, so the interface
/// carrying it is vendor-class and has no report descriptor.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct XinputReport {
    /// Digital buttons, dpad in the low byte.
    pub buttons: u16,
    /// Left trigger axis.
    pub lt: u8,
    /// Right trigger axis.
    pub rt: u8,
    /// Left stick X (signed, 0 center).
    pub lx: i16,
    /// Left stick Y (signed, 0 center).
    pub ly: i16,
    /// Right stick X (signed, 0 center).
    pub rx: i16,
    /// Right stick Y (signed, 0 center).
    pub ry: i16,
}

impl XinputReport {
    pub const DPAD_UP: u16 = 1 << 0;
    pub const DPAD_DOWN: u16 = 1 << 1;
    pub const DPAD_LEFT: u16 = 1 << 2;
    pub const DPAD_RIGHT: u16 = 1 << 3;
    pub const BUTTON_START: u16 = 1 << 4;
    pub const BUTTON_BACK: u16 = 1 << 5;
    pub const BUTTON_L3: u16 = 1 << 6;
    pub const BUTTON_R3: u16 = 1 << 7;
    pub const BUTTON_LB: u16 = 1 << 8;
    pub const BUTTON_RB: u16 = 1 << 9;
    pub const BUTTON_GUIDE: u16 = 1 << 10;
    pub const BUTTON_A: u16 = 1 << 12;
    pub const BUTTON_B: u16 = 1 << 13;
    pub const BUTTON_X: u16 = 1 << 14;
    pub const BUTTON_Y: u16 = 1 << 15;

    /// Size of the report in bytes.
    pub const SIZE: usize = 20;

    /// Neutral report: no buttons, sticks centered, triggers at rest.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: 0,
            lt: 0,
            rt: 0,
            lx: 0,
            ly: 0,
            rx: 0,
            ry: 0,
        }
    }

    /// Convert the report to bytes.
    ///
    /// The first two bytes are the message type (0x00) and length (0x14)
    /// the XInput protocol prefixes every input report with.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        let lx = self.lx.to_le_bytes();
        let ly = self.ly.to_le_bytes();
        let rx = self.rx.to_le_bytes();
        let ry = self.ry.to_le_bytes();
        [
            0x00,
            Self::SIZE as u8,
            buttons[0],
            buttons[1],
            self.lt,
            self.rt,
            lx[0],
            lx[1],
            ly[0],
            ly[1],
            rx[0],
            rx[1],
            ry[0],
            ry[1],
            0x00,
            0x00,
            0x00,
            0x00,
            0x00,
            0x00,
        ]
    }
}
