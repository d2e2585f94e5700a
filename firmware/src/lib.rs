//! Taiko drum USB adapter firmware for RP2040.
//!
//! This crate provides the embedded implementation of a taiko drum
//! controller: it samples piezo sensors and panel buttons, feeds them
//! through the platform-agnostic core and presents the result to the
//! host under the configured USB personality.

#![no_std]

// Re-export core types for convenience
pub use taiko_core::{
    Buttons, ControllerState, Dpad, DrumState, InputDispatcher, InputSnapshot, Menu, OutputMode,
    PadState, Report, Settings, SettingsStore, Zone,
};

pub mod buttons;
pub mod drum;
pub mod storage;
pub mod usb;

pub use buttons::ControlPanel;
pub use drum::DrumSampler;
pub use storage::SettingsFlash;
pub use usb::{configure_output, device_config, UsbSender};
