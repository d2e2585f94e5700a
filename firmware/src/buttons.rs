//! Control panel buttons.
//!
//! One GPIO input per button, active low against the internal pull-up.
//! The panel is read as a plain level snapshot every tick; hold and
//! repeat behaviour is handled downstream by the menu engine.

use embassy_rp::gpio::Input;
use taiko_core::{Buttons, ControllerState, Dpad};

/// The wired panel buttons, all active low.
pub struct ControlPanel {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub north: Input<'static>,
    pub east: Input<'static>,
    pub south: Input<'static>,
    pub west: Input<'static>,
    pub l: Input<'static>,
    pub r: Input<'static>,
    pub start: Input<'static>,
    pub select: Input<'static>,
    pub home: Input<'static>,
    pub share: Input<'static>,
}

impl ControlPanel {
    /// Reads every pin into a [`ControllerState`] snapshot.
    pub fn read(&self) -> ControllerState {
        ControllerState {
            dpad: Dpad {
                up: self.up.is_low(),
                down: self.down.is_low(),
                left: self.left.is_low(),
                right: self.right.is_low(),
            },
            buttons: Buttons {
                north: self.north.is_low(),
                east: self.east.is_low(),
                south: self.south.is_low(),
                west: self.west.is_low(),
                l: self.l.is_low(),
                r: self.r.is_low(),
                start: self.start.is_low(),
                select: self.select.is_low(),
                home: self.home.is_low(),
                share: self.share.is_low(),
            },
        }
    }
}
