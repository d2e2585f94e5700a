//! Plain-text sensor readout.
//!
//! The debug mode replaces the gamepad with a CDC serial line printing one
//! line per render: the four raw pad values in zone order, a `*` marking
//! zones currently triggered. Handy for tuning thresholds without flashing
//! anything.

use core::fmt::Write;

use heapless::String;

const LINE_CAPACITY: usize = 64;

/// A single formatted readout line.
///
/// Fixed capacity, no heap. Formatting truncates silently if the line would
/// overflow, which cannot happen with the format below (worst case is 36
/// bytes).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DebugReport {
    line: String<LINE_CAPACITY>,
}

impl DebugReport {
    /// Line buffer capacity in bytes.
    pub const CAPACITY: usize = LINE_CAPACITY;

    /// Empty line.
    #[must_use]
    pub const fn neutral() -> Self {
        Self { line: String::new() }
    }

    /// Format a readout from the four zone readings, zone order
    /// don-left, ka-left, don-right, ka-right.
    #[must_use]
    pub fn from_readings(readings: [(u16, bool); 4]) -> Self {
        let mut report = Self::neutral();
        let labels = ["dl", "kl", "dr", "kr"];
        for (label, (raw, triggered)) in labels.iter().zip(readings) {
            let mark = if triggered { "*" } else { " " };
            // Capacity is sized for the worst case; a full buffer just
            // truncates the line.
            let _ = write!(report.line, "{label}:{raw:4}{mark} ");
        }
        report
    }

    /// The formatted line.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The formatted line as bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_empty() {
        assert_eq!(DebugReport::neutral().as_str(), "");
    }

    #[test]
    fn test_formats_all_zones() {
        let report = DebugReport::from_readings([(123, true), (0, false), (4095, false), (7, true)]);
        assert_eq!(report.as_str(), "dl: 123* kl:   0  dr:4095  kr:   7* ");
    }

    #[test]
    fn test_fits_capacity_at_maximum_values() {
        let report = DebugReport::from_readings([(4095, true); 4]);
        assert!(report.as_str().len() <= DebugReport::CAPACITY);
        assert!(report.as_str().contains("dl:4095*"));
    }
}
