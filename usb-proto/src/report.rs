//! Rendered-report carrier.

use crate::debug::DebugReport;
use crate::keyboard::NkroKeyboardReport;
use crate::midi::MidiReport;
use crate::ps3::Ps3Report;
use crate::ps4::Ps4Report;
use crate::switch::SwitchReport;
use crate::xinput::XinputReport;

/// A rendered input report, one variant per protocol family.
///
/// This is what a render pass hands to the transport. The enum is closed, so
/// transports match exhaustively and a new protocol cannot be forgotten at
/// the send site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Switch(SwitchReport),
    Ps3(Ps3Report),
    Ps4(Ps4Report),
    Keyboard(NkroKeyboardReport),
    Xinput(XinputReport),
    Midi(MidiReport),
    Debug(DebugReport),
}

impl Report {
    /// Largest serialized report across all variants ([`DebugReport`] with a
    /// full line).
    pub const MAX_SIZE: usize = 64;

    /// Serialize the report into `buf`, returning the number of bytes
    /// written. Writes at most `buf.len()` bytes; a buffer of
    /// [`Self::MAX_SIZE`] always fits every variant.
    pub fn write_to(&self, buf: &mut [u8]) -> usize {
        match self {
            Report::Switch(report) => copy_into(buf, &report.as_bytes()),
            Report::Ps3(report) => copy_into(buf, &report.as_bytes()),
            Report::Ps4(report) => copy_into(buf, &report.as_bytes()),
            Report::Keyboard(report) => copy_into(buf, &report.as_bytes()),
            Report::Xinput(report) => copy_into(buf, &report.as_bytes()),
            Report::Midi(report) => copy_into(buf, &report.as_bytes()),
            Report::Debug(report) => copy_into(buf, report.as_bytes()),
        }
    }
}

fn copy_into(buf: &mut [u8], bytes: &[u8]) -> usize {
    let n = bytes.len().min(buf.len());
    buf[..n].copy_from_slice(&bytes[..n]);
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_returns_wire_size() {
        let mut buf = [0u8; Report::MAX_SIZE];
        assert_eq!(
            Report::Switch(SwitchReport::neutral()).write_to(&mut buf),
            SwitchReport::SIZE
        );
        assert_eq!(
            Report::Xinput(XinputReport::neutral()).write_to(&mut buf),
            XinputReport::SIZE
        );
        assert_eq!(
            Report::Keyboard(NkroKeyboardReport::neutral()).write_to(&mut buf),
            NkroKeyboardReport::SIZE
        );
    }

    #[test]
    fn test_write_to_truncates_to_buffer() {
        let mut buf = [0u8; 4];
        let n = Report::Ps3(Ps3Report::neutral()).write_to(&mut buf);
        assert_eq!(n, 4);
    }

    #[test]
    fn test_every_variant_fits_max_size() {
        let mut buf = [0u8; Report::MAX_SIZE];
        let reports = [
            Report::Switch(SwitchReport::neutral()),
            Report::Ps3(Ps3Report::neutral()),
            Report::Ps4(Ps4Report::neutral()),
            Report::Keyboard(NkroKeyboardReport::neutral()),
            Report::Xinput(XinputReport::neutral()),
            Report::Midi(MidiReport::neutral()),
            Report::Debug(DebugReport::neutral()),
        ];
        for report in reports {
            assert!(report.write_to(&mut buf) <= Report::MAX_SIZE);
        }
    }
}
