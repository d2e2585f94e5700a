//! USB output protocol data for the taiko drum adapter.
//!
//! This crate defines everything the adapter can say over USB without any
//! platform-specific dependencies: the set of emulated device types, the
//! input report each one sends, and the HID report descriptors that describe
//! those reports to the host. It can be used both in embedded `no_std`
//! environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`mode`]: The closed set of emulated devices ([`OutputMode`])
//! - [`report`]: The rendered-report carrier ([`Report`])
//! - [`switch`]: Switch-compatible gamepad report ([`SwitchReport`])
//! - [`ps3`]: Dualshock 3 report with pressure bytes ([`Ps3Report`])
//! - [`ps4`]: Dualshock 4 / PS4 taiko report ([`Ps4Report`])
//! - [`keyboard`]: NKRO keyboard bitmap report ([`NkroKeyboardReport`])
//! - [`xinput`]: XInput wire report ([`XinputReport`])
//! - [`midi`]: Percussion note state and USB-MIDI packets ([`MidiReport`])
//! - [`debug`]: Plain-text sensor readout ([`DebugReport`])
//! - [`mapping`]: Shared conversions (hat encoding, raw-value scaling)
//!
//! # Report contract
//!
//! Every report type provides a `const fn neutral()` with nothing pressed and
//! all analog fields at rest, plus a byte serialization matching its wire
//! layout. A neutral report is what the adapter sends whenever inputs must be
//! released wholesale, so hosts never see a stuck control.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod debug;
pub mod keyboard;
pub mod mapping;
pub mod midi;
pub mod mode;
pub mod ps3;
pub mod ps4;
pub mod report;
pub mod switch;
pub mod xinput;

// Re-export main types at crate root
pub use debug::DebugReport;
pub use keyboard::NkroKeyboardReport;
pub use mapping::{axis_from_raw, hat_from_dpad, pressure_from_raw, velocity_from_raw, HAT_NEUTRAL};
pub use midi::MidiReport;
pub use mode::OutputMode;
pub use ps3::Ps3Report;
pub use ps4::Ps4Report;
pub use report::Report;
pub use switch::SwitchReport;
pub use xinput::XinputReport;
