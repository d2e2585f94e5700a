//! Platform-agnostic control core for the taiko drum USB adapter.
//!
//! This crate provides the input model, protocol dispatch, and configuration
//! menu of the adapter without any platform-specific dependencies. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Input model ([`InputSnapshot`], [`DrumState`], [`ControllerState`])
//! - [`dispatcher`]: Snapshot-to-report rendering and the menu hotkey ([`InputDispatcher`])
//! - [`menu`]: Stack-based configuration menu ([`Menu`], [`MenuPage`], [`Action`])
//! - [`repeat`]: Press-and-hold repeat timing for menu navigation ([`ButtonRepeater`])
//! - [`settings`]: Runtime settings and the persistence trait ([`Settings`], [`SettingsStore`])
//!
//! # Tick model
//!
//! Everything here advances on a millisecond tick driven by the firmware:
//!
//! 1. The sampler overwrites the dispatcher's [`InputSnapshot`] (latest wins,
//!    nothing is queued).
//! 2. [`InputDispatcher::check_hotkey`] watches for the start+select hold
//!    that opens the menu.
//! 3. While the menu is active it consumes the controller via
//!    [`Menu::update`] and the host sees neutral reports; otherwise
//!    [`InputDispatcher::render`] turns the snapshot into the report for the
//!    active [`OutputMode`].
//!
//! # Example
//!
//! ```rust
//! use taiko_core::{InputDispatcher, InputSnapshot, OutputMode, PadState, Report};
//! use usb_proto::SwitchReport;
//!
//! let mut dispatcher = InputDispatcher::new();
//! let mut snapshot = InputSnapshot::neutral();
//! snapshot.drum.don_left = PadState::struck(3000);
//! dispatcher.set_snapshot(snapshot);
//!
//! // One strike, rendered for whichever device the host expects.
//! let Report::Switch(report) = dispatcher.render(OutputMode::SwitchTatacon) else {
//!     unreachable!()
//! };
//! assert_eq!(report.buttons, SwitchReport::BUTTON_Y);
//!
//! dispatcher.release_all();
//! assert_eq!(
//!     dispatcher.render(OutputMode::SwitchTatacon),
//!     Report::Switch(SwitchReport::neutral())
//! );
//! ```
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

pub mod dispatcher;
pub mod menu;
pub mod repeat;
pub mod settings;
pub mod types;

// Re-export main types at crate root
pub use dispatcher::{InputDispatcher, HOTKEY_HOLD_MS};
pub use menu::{Action, Menu, MenuItem, MenuPage, NavigationFrame, PageDescriptor, PageKind};
pub use repeat::{ButtonRepeater, Pulses, REPEAT_DELAY_MS, REPEAT_INTERVAL_MS};
pub use settings::{Settings, SettingsStore, TriggerThresholds};
pub use types::{Buttons, ControllerState, Dpad, DrumState, InputSnapshot, PadState, Zone};

// The protocol surface travels with the core: settings store the active
// output mode and the dispatcher produces reports.
pub use usb_proto::{OutputMode, Report};
