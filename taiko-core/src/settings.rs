//! Adapter settings and the persistence seam ([`SettingsStore`]).

use usb_proto::OutputMode;

use crate::types::Zone;

/// Per-zone trigger thresholds in raw sensor units `[0, 4095]`.
///
/// A pad counts as hit when its raw amplitude exceeds the zone threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerThresholds {
    pub don_left: u16,
    pub ka_left: u16,
    pub don_right: u16,
    pub ka_right: u16,
}

impl TriggerThresholds {
    pub const DEFAULT: Self = Self {
        don_left: 16,
        ka_left: 16,
        don_right: 16,
        ka_right: 16,
    };

    /// Threshold for a zone.
    #[inline]
    #[must_use]
    pub const fn get(&self, zone: Zone) -> u16 {
        match zone {
            Zone::DonLeft => self.don_left,
            Zone::KaLeft => self.ka_left,
            Zone::DonRight => self.don_right,
            Zone::KaRight => self.ka_right,
        }
    }

    /// Set the threshold for a zone.
    #[inline]
    pub fn set(&mut self, zone: Zone, value: u16) {
        match zone {
            Zone::DonLeft => self.don_left = value,
            Zone::KaLeft => self.ka_left = value,
            Zone::DonRight => self.don_right = value,
            Zone::KaRight => self.ka_right = value,
        }
    }
}

impl Default for TriggerThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Live adapter configuration behind the menu engine.
///
/// The menu reads current values to seed cursors and writes every change
/// back immediately; how (and whether) the values survive a power cycle is
/// the implementor's business. [`Settings`] is the plain in-memory
/// implementation used for host tests; firmware wraps it with flash-backed
/// persistence.
pub trait SettingsStore {
    /// Currently configured USB output mode.
    fn output_mode(&self) -> OutputMode;
    fn set_output_mode(&mut self, mode: OutputMode);

    fn trigger_thresholds(&self) -> TriggerThresholds;
    fn set_trigger_thresholds(&mut self, thresholds: TriggerThresholds);

    /// How long a pad stays held after a hit, in milliseconds.
    fn debounce_delay_ms(&self) -> u16;
    fn set_debounce_delay_ms(&mut self, delay: u16);

    /// Hit-flash LED brightness, `0` (off) to `255` (full).
    fn led_brightness(&self) -> u8;
    fn set_led_brightness(&mut self, brightness: u8);

    /// Request a reboot into the mass-storage flash loader once the menu
    /// closes.
    fn schedule_reboot(&mut self);
    fn reboot_scheduled(&self) -> bool;

    /// Restore every setting to its default.
    fn reset(&mut self);
}

/// In-memory settings with factory defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub output_mode: OutputMode,
    pub trigger_thresholds: TriggerThresholds,
    pub debounce_delay_ms: u16,
    pub led_brightness: u8,
    reboot_scheduled: bool,
}

impl Settings {
    pub const DEFAULT: Self = Self {
        output_mode: OutputMode::SwitchTatacon,
        trigger_thresholds: TriggerThresholds::DEFAULT,
        debounce_delay_ms: 25,
        led_brightness: 255,
        reboot_scheduled: false,
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SettingsStore for Settings {
    fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    fn trigger_thresholds(&self) -> TriggerThresholds {
        self.trigger_thresholds
    }

    fn set_trigger_thresholds(&mut self, thresholds: TriggerThresholds) {
        self.trigger_thresholds = thresholds;
    }

    fn debounce_delay_ms(&self) -> u16 {
        self.debounce_delay_ms
    }

    fn set_debounce_delay_ms(&mut self, delay: u16) {
        self.debounce_delay_ms = delay;
    }

    fn led_brightness(&self) -> u8 {
        self.led_brightness
    }

    fn set_led_brightness(&mut self, brightness: u8) {
        self.led_brightness = brightness;
    }

    fn schedule_reboot(&mut self) {
        self.reboot_scheduled = true;
    }

    fn reboot_scheduled(&self) -> bool {
        self.reboot_scheduled
    }

    fn reset(&mut self) {
        // A pending reboot survives the reset so the loader request made
        // from the menu still happens.
        let reboot_scheduled = self.reboot_scheduled;
        *self = Self::DEFAULT;
        self.reboot_scheduled = reboot_scheduled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_zone_accessors() {
        let mut thresholds = TriggerThresholds::DEFAULT;
        thresholds.set(Zone::DonRight, 500);
        assert_eq!(thresholds.get(Zone::DonRight), 500);
        assert_eq!(thresholds.get(Zone::DonLeft), TriggerThresholds::DEFAULT.don_left);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = Settings::new();
        settings.set_output_mode(OutputMode::Midi);
        settings.set_led_brightness(10);
        settings.reset();
        assert_eq!(settings, Settings::DEFAULT);
    }

    #[test]
    fn test_reset_keeps_scheduled_reboot() {
        let mut settings = Settings::new();
        settings.schedule_reboot();
        settings.reset();
        assert!(settings.reboot_scheduled());
    }

    #[test]
    fn test_reboot_not_scheduled_by_default() {
        assert!(!Settings::new().reboot_scheduled());
    }
}
