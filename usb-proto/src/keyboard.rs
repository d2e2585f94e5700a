//! NKRO keyboard bitmap report.
//!
//! Both keyboard modes emit the canonical taiko PC key layout:
//!
//! | Zone      | Player 1 | Player 2 |
//! |-----------|----------|----------|
//! | ka left   | D        | C        |
//! | don left  | F        | V        |
//! | don right | J        | B        |
//! | ka right  | K        | N        |
//!
//! The control panel dpad maps to the arrow keys, start to Enter and select
//! to Escape. The remaining panel buttons stay unmapped; the on-device menu
//! reads them directly and the host has no use for them.

/// HID keyboard usage IDs used by the key-set tables.
pub mod usage {
    pub const KEY_B: u8 = 0x05;
    pub const KEY_C: u8 = 0x06;
    pub const KEY_D: u8 = 0x07;
    pub const KEY_F: u8 = 0x09;
    pub const KEY_J: u8 = 0x0D;
    pub const KEY_K: u8 = 0x0E;
    pub const KEY_N: u8 = 0x11;
    pub const KEY_V: u8 = 0x19;
    pub const KEY_ENTER: u8 = 0x28;
    pub const KEY_ESCAPE: u8 = 0x29;
    pub const KEY_RIGHT_ARROW: u8 = 0x4F;
    pub const KEY_LEFT_ARROW: u8 = 0x50;
    pub const KEY_DOWN_ARROW: u8 = 0x51;
    pub const KEY_UP_ARROW: u8 = 0x52;
}

/// Per-zone key assignments for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet {
    pub ka_left: u8,
    pub don_left: u8,
    pub don_right: u8,
    pub ka_right: u8,
}

/// Player 1 keys (D F J K).
pub const KEY_SET_P1: KeySet = KeySet {
    ka_left: usage::KEY_D,
    don_left: usage::KEY_F,
    don_right: usage::KEY_J,
    ka_right: usage::KEY_K,
};

/// Player 2 keys (C V B N).
pub const KEY_SET_P2: KeySet = KeySet {
    ka_left: usage::KEY_C,
    don_left: usage::KEY_V,
    don_right: usage::KEY_B,
    ka_right: usage::KEY_N,
};

/// NKRO keyboard input report.
///
/// A modifier byte followed by a 120-key bitmap (usage IDs 0x00-0x77, one
/// bit each), so any number of keys can be down at once. Total size: 16
/// bytes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct NkroKeyboardReport {
    /// Modifier bitfield (left ctrl through right GUI), unused here.
    pub modifier: u8,
    /// Key bitmap, bit `n` = usage ID `n` pressed.
    pub keys: [u8; Self::BITMAP_BYTES],
}

impl NkroKeyboardReport {
    /// Bytes in the key bitmap (120 usage IDs).
    pub const BITMAP_BYTES: usize = 15;

    /// Highest usage ID the bitmap can carry.
    pub const MAX_USAGE: u8 = 0x77;

    /// Size of the report in bytes.
    pub const SIZE: usize = 16;

    /// Neutral report: no keys pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            modifier: 0,
            keys: [0; Self::BITMAP_BYTES],
        }
    }

    /// Set or clear a key by usage ID. IDs above [`Self::MAX_USAGE`] are
    /// ignored.
    #[inline]
    pub fn set_key(&mut self, usage_id: u8, pressed: bool) {
        if usage_id > Self::MAX_USAGE {
            return;
        }
        let byte = (usage_id / 8) as usize;
        let bit = usage_id % 8;
        if pressed {
            self.keys[byte] |= 1 << bit;
        } else {
            self.keys[byte] &= !(1 << bit);
        }
    }

    /// Check whether a key is set in the bitmap.
    #[inline]
    #[must_use]
    pub fn key(&self, usage_id: u8) -> bool {
        if usage_id > Self::MAX_USAGE {
            return false;
        }
        let byte = (usage_id / 8) as usize;
        let bit = usage_id % 8;
        (self.keys[byte] >> bit) & 1 == 1
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.modifier;
        bytes[1..].copy_from_slice(&self.keys);
        bytes
    }
}

/// NKRO keyboard report descriptor.
///
/// Eight modifier bits followed by a 120-bit key bitmap.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Modifiers ---
    0x05, 0x07, //   Usage Page (Keyboard)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Key bitmap (120 keys) ---
    0x05, 0x07, //   Usage Page (Keyboard)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0x77, //   Usage Maximum (0x77)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x78, //   Report Count (120)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_key() {
        let mut report = NkroKeyboardReport::neutral();
        report.set_key(usage::KEY_F, true);
        assert!(report.key(usage::KEY_F));
        assert!(!report.key(usage::KEY_D));

        report.set_key(usage::KEY_F, false);
        assert!(!report.key(usage::KEY_F));
    }

    #[test]
    fn test_bitmap_position() {
        let mut report = NkroKeyboardReport::neutral();
        // Usage 0x0D = byte 1, bit 5.
        report.set_key(usage::KEY_J, true);
        assert_eq!(report.keys[1], 1 << 5);
    }

    #[test]
    fn test_out_of_range_usage_is_ignored() {
        let mut report = NkroKeyboardReport::neutral();
        report.set_key(0x78, true);
        assert_eq!(report, NkroKeyboardReport::neutral());
        assert!(!report.key(0xFF));
    }

    #[test]
    fn test_many_keys_at_once() {
        let mut report = NkroKeyboardReport::neutral();
        for set in [KEY_SET_P1, KEY_SET_P2] {
            for key in [set.ka_left, set.don_left, set.don_right, set.ka_right] {
                report.set_key(key, true);
            }
        }
        for set in [KEY_SET_P1, KEY_SET_P2] {
            assert!(report.key(set.ka_left));
            assert!(report.key(set.don_left));
            assert!(report.key(set.don_right));
            assert!(report.key(set.ka_right));
        }
    }

    #[test]
    fn test_as_bytes_layout() {
        let mut report = NkroKeyboardReport::neutral();
        report.set_key(usage::KEY_UP_ARROW, true); // 0x52 = byte 10, bit 2
        let bytes = report.as_bytes();
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1 + 10], 1 << 2);
    }
}
