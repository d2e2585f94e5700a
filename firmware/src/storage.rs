//! Flash-backed settings persistence.
//!
//! The last flash sector holds a single settings record. It is read
//! once at boot; the menu works on an in-memory copy and the sector is
//! only rewritten when the menu closes with actual changes, keeping
//! erase cycles off the hot path.
//!
//! Record layout, 16 bytes:
//!
//! | offset | content                        |
//! |--------|--------------------------------|
//! | 0      | magic `0x54`                   |
//! | 1      | layout revision                |
//! | 2      | output mode index              |
//! | 3      | LED brightness                 |
//! | 4..6   | debounce delay ms, LE          |
//! | 6..14  | trigger thresholds, 4x u16 LE  |
//! | 14     | reserved                       |
//! | 15     | XOR checksum of bytes 0..15    |

use defmt::warn;
use embassy_rp::flash::{Async, Error, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use taiko_core::{OutputMode, Settings, TriggerThresholds, Zone};

/// Total flash size of the board.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// The record lives in the last sector, well clear of the program image.
const RECORD_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

const MAGIC: u8 = 0x54;
const REVISION: u8 = 1;
const RECORD_LEN: usize = 16;

/// Settings record in the last flash sector.
pub struct SettingsFlash {
    flash: Flash<'static, FLASH, Async, FLASH_SIZE>,
    persisted: Settings,
}

impl SettingsFlash {
    pub fn new(flash: Flash<'static, FLASH, Async, FLASH_SIZE>) -> Self {
        Self {
            flash,
            persisted: Settings::DEFAULT,
        }
    }

    /// Loads the stored settings, falling back to defaults when the
    /// record is missing or damaged. The fallback is written back so
    /// the sector holds a valid record from then on.
    pub fn load(&mut self) -> Settings {
        let mut bytes = [0u8; RECORD_LEN];
        let stored = match self.flash.blocking_read(RECORD_OFFSET, &mut bytes) {
            Ok(()) => decode(&bytes),
            Err(e) => {
                warn!("settings read failed: {:?}", e);
                None
            }
        };
        match stored {
            Some(settings) => {
                self.persisted = settings;
                settings
            }
            None => {
                warn!("no valid settings record, using defaults");
                self.persisted = Settings::DEFAULT;
                if let Err(e) = self.write_record(&Settings::DEFAULT) {
                    warn!("writing default settings failed: {:?}", e);
                }
                Settings::DEFAULT
            }
        }
    }

    /// Writes `settings` out if they differ from what flash already
    /// holds. Returns whether a write happened.
    pub fn persist(&mut self, settings: &Settings) -> Result<bool, Error> {
        if encode(settings) == encode(&self.persisted) {
            return Ok(false);
        }
        self.write_record(settings)?;
        self.persisted = *settings;
        Ok(true)
    }

    fn write_record(&mut self, settings: &Settings) -> Result<(), Error> {
        self.flash
            .blocking_erase(RECORD_OFFSET, RECORD_OFFSET + ERASE_SIZE as u32)?;
        self.flash.blocking_write(RECORD_OFFSET, &encode(settings))
    }
}

fn encode(settings: &Settings) -> [u8; RECORD_LEN] {
    let mut bytes = [0u8; RECORD_LEN];
    bytes[0] = MAGIC;
    bytes[1] = REVISION;
    bytes[2] = settings.output_mode.index() as u8;
    bytes[3] = settings.led_brightness;
    bytes[4..6].copy_from_slice(&settings.debounce_delay_ms.to_le_bytes());
    for (i, zone) in Zone::ALL.iter().enumerate() {
        let offset = 6 + i * 2;
        let threshold = settings.trigger_thresholds.get(*zone);
        bytes[offset..offset + 2].copy_from_slice(&threshold.to_le_bytes());
    }
    bytes[RECORD_LEN - 1] = checksum(&bytes);
    bytes
}

fn decode(bytes: &[u8; RECORD_LEN]) -> Option<Settings> {
    if bytes[0] != MAGIC || bytes[1] != REVISION || bytes[RECORD_LEN - 1] != checksum(bytes) {
        return None;
    }
    let mut thresholds = TriggerThresholds::DEFAULT;
    for (i, zone) in Zone::ALL.iter().enumerate() {
        let offset = 6 + i * 2;
        thresholds.set(*zone, u16::from_le_bytes([bytes[offset], bytes[offset + 1]]));
    }
    let mut settings = Settings::new();
    settings.output_mode = OutputMode::from_index(bytes[2] as usize)?;
    settings.led_brightness = bytes[3];
    settings.debounce_delay_ms = u16::from_le_bytes([bytes[4], bytes[5]]);
    settings.trigger_thresholds = thresholds;
    Some(settings)
}

// An erased sector reads as 0xFF everywhere, so the magic check alone
// already rejects it.
fn checksum(bytes: &[u8; RECORD_LEN]) -> u8 {
    bytes[..RECORD_LEN - 1].iter().fold(0, |acc, b| acc ^ b)
}
