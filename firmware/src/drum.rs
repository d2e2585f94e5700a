//! Piezo drum pad sampling.
//!
//! Reads the four pad sensors through the ADC and folds the raw values
//! into a debounced [`DrumState`]. A pad that crossed its threshold
//! keeps its trigger state for at least the configured hold time, so a
//! single strike does not rattle on and off while the piezo rings out.

use defmt::warn;
use embassy_rp::adc::{Adc, Async, Channel};
use taiko_core::{DrumState, PadState, TriggerThresholds, Zone};

/// Minimum-time-between-changes filter for one pad.
#[derive(Clone, Copy, Debug, Default)]
struct PadFilter {
    triggered: bool,
    last_change_ms: u32,
}

impl PadFilter {
    /// Feeds one threshold comparison. The trigger state only flips
    /// when more than `hold_ms` milliseconds have passed since the
    /// last flip, in either direction.
    fn update(&mut self, hit: bool, hold_ms: u16, now_ms: u32) -> bool {
        if hit != self.triggered && now_ms.wrapping_sub(self.last_change_ms) > u32::from(hold_ms) {
            self.triggered = hit;
            self.last_change_ms = now_ms;
        }
        self.triggered
    }
}

/// The four drum pads behind the on-chip ADC.
pub struct DrumSampler {
    adc: Adc<'static, Async>,
    channels: [Channel<'static>; 4],
    filters: [PadFilter; 4],
}

impl DrumSampler {
    /// Channels must be handed over in [`Zone::ALL`] order: don left,
    /// ka left, don right, ka right.
    pub fn new(adc: Adc<'static, Async>, channels: [Channel<'static>; 4]) -> Self {
        Self {
            adc,
            channels,
            filters: [PadFilter::default(); 4],
        }
    }

    /// Samples every pad once and applies thresholds and debouncing.
    pub async fn sample(
        &mut self,
        thresholds: &TriggerThresholds,
        hold_ms: u16,
        now_ms: u32,
    ) -> DrumState {
        DrumState {
            don_left: self.sample_pad(0, Zone::DonLeft, thresholds, hold_ms, now_ms).await,
            ka_left: self.sample_pad(1, Zone::KaLeft, thresholds, hold_ms, now_ms).await,
            don_right: self.sample_pad(2, Zone::DonRight, thresholds, hold_ms, now_ms).await,
            ka_right: self.sample_pad(3, Zone::KaRight, thresholds, hold_ms, now_ms).await,
        }
    }

    async fn sample_pad(
        &mut self,
        index: usize,
        zone: Zone,
        thresholds: &TriggerThresholds,
        hold_ms: u16,
        now_ms: u32,
    ) -> PadState {
        let raw = match self.adc.read(&mut self.channels[index]).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("ADC read on {} failed: {:?}", zone, e);
                0
            }
        };
        let hit = raw > thresholds.get(zone);
        PadState {
            triggered: self.filters[index].update(hit, hold_ms, now_ms),
            raw,
        }
    }
}
