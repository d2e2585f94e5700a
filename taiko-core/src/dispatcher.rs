//! Input-to-protocol dispatcher and the menu hotkey detector.
//!
//! The dispatcher holds the latest [`InputSnapshot`] and renders it into the
//! report of whichever [`OutputMode`] is active. Rendering is a pure function
//! of the held snapshot, exhaustive over every mode, so the mapping contract
//! lives in one place and a new mode cannot ship unmapped.
//!
//! It also runs the one gesture that exists outside the menu: holding
//! start+select for [`HOTKEY_HOLD_MS`] opens the configuration menu. The
//! surrounding system calls [`InputDispatcher::release_all`] at that moment
//! (and on menu exit) so the host never sees the buttons the menu borrows.

use usb_proto::keyboard::{self, usage, KeySet};
use usb_proto::mapping::{axis_from_raw, hat_from_dpad, pressure_from_raw};
use usb_proto::midi::NoteState;
use usb_proto::{
    DebugReport, MidiReport, NkroKeyboardReport, OutputMode, Ps3Report, Ps4Report, Report,
    SwitchReport, XinputReport,
};

use crate::types::{InputSnapshot, PadState};

/// How long start+select must be held before the menu hotkey fires.
pub const HOTKEY_HOLD_MS: u32 = 2000;

/// Which stick carries hit strength in the analog XInput modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnalogStick {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum HotkeyPhase {
    /// Combo not held.
    Idle,
    /// Combo held, waiting out the hold duration.
    Held { since: u32 },
    /// Fired for this hold; rearms on release.
    Fired,
}

/// Holds the live input snapshot and renders it per output protocol.
#[derive(Clone, Debug)]
pub struct InputDispatcher {
    snapshot: InputSnapshot,
    hotkey: HotkeyPhase,
}

impl InputDispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot: InputSnapshot::neutral(),
            hotkey: HotkeyPhase::Idle,
        }
    }

    /// Replace the held snapshot wholesale. Called once per tick by the
    /// sampler; snapshots are never queued, the latest always wins.
    #[inline]
    pub fn set_snapshot(&mut self, snapshot: InputSnapshot) {
        self.snapshot = snapshot;
    }

    /// The currently held snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Reset the held snapshot to all-neutral so the next [`Self::render`]
    /// of any mode reports nothing pressed. Called on menu entry/exit and
    /// on mode changes to avoid latching a stale "held" report on the host.
    pub fn release_all(&mut self) {
        self.snapshot = InputSnapshot::neutral();
    }

    /// Advance the menu hotkey detector one tick.
    ///
    /// Returns `true` exactly once per continuous start+select hold, on the
    /// first tick where the hold has lasted [`HOTKEY_HOLD_MS`]. Releasing
    /// either button resets the timer, even if re-pressed on the next tick.
    pub fn check_hotkey(&mut self, now_ms: u32) -> bool {
        let buttons = &self.snapshot.controller.buttons;
        let held = buttons.start && buttons.select;
        match self.hotkey {
            HotkeyPhase::Idle => {
                if held {
                    self.hotkey = HotkeyPhase::Held { since: now_ms };
                }
                false
            }
            HotkeyPhase::Held { since } => {
                if !held {
                    self.hotkey = HotkeyPhase::Idle;
                    false
                } else if now_ms.wrapping_sub(since) >= HOTKEY_HOLD_MS {
                    self.hotkey = HotkeyPhase::Fired;
                    true
                } else {
                    false
                }
            }
            HotkeyPhase::Fired => {
                if !held {
                    self.hotkey = HotkeyPhase::Idle;
                }
                false
            }
        }
    }

    /// Render the held snapshot as a report for the given mode.
    #[must_use]
    pub fn render(&self, mode: OutputMode) -> Report {
        match mode {
            OutputMode::SwitchTatacon => Report::Switch(self.switch_report(true)),
            OutputMode::SwitchHoripad => Report::Switch(self.switch_report(false)),
            OutputMode::Dualshock3 => Report::Ps3(self.ps3_report()),
            OutputMode::Ps4Tatacon => Report::Ps4(self.ps4_report(true)),
            OutputMode::Dualshock4 => Report::Ps4(self.ps4_report(false)),
            OutputMode::KeyboardP1 => Report::Keyboard(self.keyboard_report(&keyboard::KEY_SET_P1)),
            OutputMode::KeyboardP2 => Report::Keyboard(self.keyboard_report(&keyboard::KEY_SET_P2)),
            OutputMode::Xbox360 => Report::Xinput(self.xinput_report(None)),
            OutputMode::Xbox360AnalogP1 => {
                Report::Xinput(self.xinput_report(Some(AnalogStick::Left)))
            }
            OutputMode::Xbox360AnalogP2 => {
                Report::Xinput(self.xinput_report(Some(AnalogStick::Right)))
            }
            OutputMode::Midi => Report::Midi(self.midi_report()),
            OutputMode::Debug => Report::Debug(self.debug_report()),
        }
    }

    fn switch_report(&self, tatacon: bool) -> SwitchReport {
        let controller = &self.snapshot.controller;
        let b = &controller.buttons;
        let mut buttons = 0u16;
        if b.west {
            buttons |= SwitchReport::BUTTON_Y;
        }
        if b.south {
            buttons |= SwitchReport::BUTTON_B;
        }
        if b.east {
            buttons |= SwitchReport::BUTTON_A;
        }
        if b.north {
            buttons |= SwitchReport::BUTTON_X;
        }
        if b.l {
            buttons |= SwitchReport::BUTTON_L;
        }
        if b.r {
            buttons |= SwitchReport::BUTTON_R;
        }
        if b.select {
            buttons |= SwitchReport::BUTTON_MINUS;
        }
        if b.start {
            buttons |= SwitchReport::BUTTON_PLUS;
        }
        if b.home {
            buttons |= SwitchReport::BUTTON_HOME;
        }
        if b.share {
            buttons |= SwitchReport::BUTTON_CAPTURE;
        }

        let (don_left, don_right, ka_left, ka_right) = if tatacon {
            (
                SwitchReport::BUTTON_Y,
                SwitchReport::BUTTON_A,
                SwitchReport::BUTTON_L,
                SwitchReport::BUTTON_R,
            )
        } else {
            (
                SwitchReport::BUTTON_B,
                SwitchReport::BUTTON_A,
                SwitchReport::BUTTON_ZL,
                SwitchReport::BUTTON_ZR,
            )
        };
        let drum = &self.snapshot.drum;
        if drum.don_left.triggered {
            buttons |= don_left;
        }
        if drum.don_right.triggered {
            buttons |= don_right;
        }
        if drum.ka_left.triggered {
            buttons |= ka_left;
        }
        if drum.ka_right.triggered {
            buttons |= ka_right;
        }

        SwitchReport {
            buttons,
            hat: hat_from_dpad(
                controller.dpad.up,
                controller.dpad.down,
                controller.dpad.left,
                controller.dpad.right,
            ),
            ..SwitchReport::neutral()
        }
    }

    fn ps3_report(&self) -> Ps3Report {
        let controller = &self.snapshot.controller;
        let b = &controller.buttons;
        let mut buttons = 0u16;
        if b.west {
            buttons |= Ps3Report::BUTTON_SQUARE;
        }
        if b.south {
            buttons |= Ps3Report::BUTTON_CROSS;
        }
        if b.east {
            buttons |= Ps3Report::BUTTON_CIRCLE;
        }
        if b.north {
            buttons |= Ps3Report::BUTTON_TRIANGLE;
        }
        if b.l {
            buttons |= Ps3Report::BUTTON_L1;
        }
        if b.r {
            buttons |= Ps3Report::BUTTON_R1;
        }
        if b.select {
            buttons |= Ps3Report::BUTTON_SELECT;
        }
        if b.start {
            buttons |= Ps3Report::BUTTON_START;
        }
        if b.home {
            buttons |= Ps3Report::BUTTON_PS;
        }

        // Triggered pads press their button and put the scaled hit strength
        // into the matching pressure slot; idle pads leave both at rest.
        let drum = &self.snapshot.drum;
        let mut pressure = [0u8; Ps3Report::PRESSURE_COUNT];
        if drum.don_left.triggered {
            buttons |= Ps3Report::BUTTON_CROSS;
            pressure[Ps3Report::PRESSURE_CROSS] = pressure_from_raw(drum.don_left.raw);
        }
        if drum.don_right.triggered {
            buttons |= Ps3Report::BUTTON_CIRCLE;
            pressure[Ps3Report::PRESSURE_CIRCLE] = pressure_from_raw(drum.don_right.raw);
        }
        if drum.ka_left.triggered {
            buttons |= Ps3Report::BUTTON_L1;
            pressure[Ps3Report::PRESSURE_L1] = pressure_from_raw(drum.ka_left.raw);
        }
        if drum.ka_right.triggered {
            buttons |= Ps3Report::BUTTON_R1;
            pressure[Ps3Report::PRESSURE_R1] = pressure_from_raw(drum.ka_right.raw);
        }

        Ps3Report {
            buttons,
            hat: hat_from_dpad(
                controller.dpad.up,
                controller.dpad.down,
                controller.dpad.left,
                controller.dpad.right,
            ),
            pressure,
            ..Ps3Report::neutral()
        }
    }

    fn ps4_report(&self, tatacon: bool) -> Ps4Report {
        let controller = &self.snapshot.controller;
        let b = &controller.buttons;
        let mut buttons = 0u16;
        if b.west {
            buttons |= Ps4Report::BUTTON_SQUARE;
        }
        if b.south {
            buttons |= Ps4Report::BUTTON_CROSS;
        }
        if b.east {
            buttons |= Ps4Report::BUTTON_CIRCLE;
        }
        if b.north {
            buttons |= Ps4Report::BUTTON_TRIANGLE;
        }
        if b.l {
            buttons |= Ps4Report::BUTTON_L1;
        }
        if b.r {
            buttons |= Ps4Report::BUTTON_R1;
        }
        if b.select {
            buttons |= Ps4Report::BUTTON_SHARE;
        }
        if b.start {
            buttons |= Ps4Report::BUTTON_OPTIONS;
        }
        if b.home {
            buttons |= Ps4Report::BUTTON_PS;
        }
        if b.share {
            buttons |= Ps4Report::BUTTON_TPAD;
        }

        let drum = &self.snapshot.drum;
        let mut lt = 0u8;
        let mut rt = 0u8;
        if tatacon {
            if drum.don_left.triggered {
                buttons |= Ps4Report::BUTTON_SQUARE;
            }
            if drum.don_right.triggered {
                buttons |= Ps4Report::BUTTON_CIRCLE;
            }
            if drum.ka_left.triggered {
                buttons |= Ps4Report::BUTTON_L1;
            }
            if drum.ka_right.triggered {
                buttons |= Ps4Report::BUTTON_R1;
            }
        } else {
            if drum.don_left.triggered {
                buttons |= Ps4Report::BUTTON_CROSS;
            }
            if drum.don_right.triggered {
                buttons |= Ps4Report::BUTTON_CIRCLE;
            }
            if drum.ka_left.triggered {
                buttons |= Ps4Report::BUTTON_L2;
                lt = pressure_from_raw(drum.ka_left.raw);
            }
            if drum.ka_right.triggered {
                buttons |= Ps4Report::BUTTON_R2;
                rt = pressure_from_raw(drum.ka_right.raw);
            }
        }

        Ps4Report {
            buttons,
            hat: hat_from_dpad(
                controller.dpad.up,
                controller.dpad.down,
                controller.dpad.left,
                controller.dpad.right,
            ),
            lt,
            rt,
            ..Ps4Report::neutral()
        }
    }

    fn keyboard_report(&self, keys: &KeySet) -> NkroKeyboardReport {
        let mut report = NkroKeyboardReport::neutral();
        let drum = &self.snapshot.drum;
        if drum.ka_left.triggered {
            report.set_key(keys.ka_left, true);
        }
        if drum.don_left.triggered {
            report.set_key(keys.don_left, true);
        }
        if drum.don_right.triggered {
            report.set_key(keys.don_right, true);
        }
        if drum.ka_right.triggered {
            report.set_key(keys.ka_right, true);
        }

        let controller = &self.snapshot.controller;
        if controller.dpad.up {
            report.set_key(usage::KEY_UP_ARROW, true);
        }
        if controller.dpad.down {
            report.set_key(usage::KEY_DOWN_ARROW, true);
        }
        if controller.dpad.left {
            report.set_key(usage::KEY_LEFT_ARROW, true);
        }
        if controller.dpad.right {
            report.set_key(usage::KEY_RIGHT_ARROW, true);
        }
        if controller.buttons.start {
            report.set_key(usage::KEY_ENTER, true);
        }
        if controller.buttons.select {
            report.set_key(usage::KEY_ESCAPE, true);
        }
        report
    }

    fn xinput_report(&self, analog: Option<AnalogStick>) -> XinputReport {
        let controller = &self.snapshot.controller;
        let b = &controller.buttons;
        let mut buttons = 0u16;
        if controller.dpad.up {
            buttons |= XinputReport::DPAD_UP;
        }
        if controller.dpad.down {
            buttons |= XinputReport::DPAD_DOWN;
        }
        if controller.dpad.left {
            buttons |= XinputReport::DPAD_LEFT;
        }
        if controller.dpad.right {
            buttons |= XinputReport::DPAD_RIGHT;
        }
        if b.start {
            buttons |= XinputReport::BUTTON_START;
        }
        if b.select {
            buttons |= XinputReport::BUTTON_BACK;
        }
        if b.l {
            buttons |= XinputReport::BUTTON_LB;
        }
        if b.r {
            buttons |= XinputReport::BUTTON_RB;
        }
        if b.home {
            buttons |= XinputReport::BUTTON_GUIDE;
        }
        if b.south {
            buttons |= XinputReport::BUTTON_A;
        }
        if b.east {
            buttons |= XinputReport::BUTTON_B;
        }
        if b.west {
            buttons |= XinputReport::BUTTON_X;
        }
        if b.north {
            buttons |= XinputReport::BUTTON_Y;
        }

        let drum = &self.snapshot.drum;
        if drum.don_left.triggered {
            buttons |= XinputReport::BUTTON_A;
        }
        if drum.don_right.triggered {
            buttons |= XinputReport::BUTTON_B;
        }
        if drum.ka_left.triggered {
            buttons |= XinputReport::BUTTON_LB;
        }
        if drum.ka_right.triggered {
            buttons |= XinputReport::BUTTON_RB;
        }

        let mut report = XinputReport {
            buttons,
            ..XinputReport::neutral()
        };
        // Hit strength follows the raw readings continuously, left zones
        // deflecting negative and right zones positive.
        let x = axis_from_raw(drum.don_right.raw) - axis_from_raw(drum.don_left.raw);
        let y = axis_from_raw(drum.ka_right.raw) - axis_from_raw(drum.ka_left.raw);
        match analog {
            Some(AnalogStick::Left) => {
                report.lx = x;
                report.ly = y;
            }
            Some(AnalogStick::Right) => {
                report.rx = x;
                report.ry = y;
            }
            None => {}
        }
        report
    }

    fn midi_report(&self) -> MidiReport {
        let drum = &self.snapshot.drum;
        MidiReport {
            don_left: note_state(drum.don_left),
            ka_left: note_state(drum.ka_left),
            don_right: note_state(drum.don_right),
            ka_right: note_state(drum.ka_right),
        }
    }

    fn debug_report(&self) -> DebugReport {
        let drum = &self.snapshot.drum;
        DebugReport::from_readings([
            (drum.don_left.raw, drum.don_left.triggered),
            (drum.ka_left.raw, drum.ka_left.triggered),
            (drum.don_right.raw, drum.don_right.triggered),
            (drum.ka_right.raw, drum.ka_right.triggered),
        ])
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn note_state(pad: PadState) -> NoteState {
    if pad.triggered {
        NoteState::struck(pad.raw)
    } else {
        NoteState::OFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Menu, MenuPage, NavigationFrame};
    use crate::settings::Settings;
    use crate::types::ControllerState;

    fn busy_snapshot() -> InputSnapshot {
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(4095);
        snapshot.drum.ka_left = PadState::struck(1000);
        snapshot.drum.don_right = PadState::struck(2000);
        snapshot.drum.ka_right = PadState::struck(3000);
        snapshot.controller.dpad.up = true;
        snapshot.controller.buttons.south = true;
        snapshot.controller.buttons.start = true;
        snapshot
    }

    #[test]
    fn test_release_all_renders_neutral_for_every_mode() {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.set_snapshot(busy_snapshot());
        dispatcher.release_all();

        for mode in OutputMode::ALL {
            let expected = match mode {
                OutputMode::SwitchTatacon | OutputMode::SwitchHoripad => {
                    Report::Switch(SwitchReport::neutral())
                }
                OutputMode::Dualshock3 => Report::Ps3(Ps3Report::neutral()),
                OutputMode::Ps4Tatacon | OutputMode::Dualshock4 => {
                    Report::Ps4(Ps4Report::neutral())
                }
                OutputMode::KeyboardP1 | OutputMode::KeyboardP2 => {
                    Report::Keyboard(NkroKeyboardReport::neutral())
                }
                OutputMode::Xbox360 | OutputMode::Xbox360AnalogP1 | OutputMode::Xbox360AnalogP2 => {
                    Report::Xinput(XinputReport::neutral())
                }
                OutputMode::Midi => Report::Midi(MidiReport::neutral()),
                OutputMode::Debug => Report::Debug(DebugReport::from_readings([(0, false); 4])),
            };
            assert_eq!(dispatcher.render(mode), expected);
        }
    }

    #[test]
    fn test_switch_drum_mappings_differ_per_flavor() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(100);
        snapshot.drum.ka_right = PadState::struck(100);
        dispatcher.set_snapshot(snapshot);

        let Report::Switch(tatacon) = dispatcher.render(OutputMode::SwitchTatacon) else {
            panic!("wrong report family");
        };
        assert_eq!(
            tatacon.buttons,
            SwitchReport::BUTTON_Y | SwitchReport::BUTTON_R
        );

        let Report::Switch(horipad) = dispatcher.render(OutputMode::SwitchHoripad) else {
            panic!("wrong report family");
        };
        assert_eq!(
            horipad.buttons,
            SwitchReport::BUTTON_B | SwitchReport::BUTTON_ZR
        );
    }

    #[test]
    fn test_controller_buttons_and_dpad_reach_switch_report() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.controller.buttons.start = true;
        snapshot.controller.buttons.home = true;
        snapshot.controller.dpad.right = true;
        dispatcher.set_snapshot(snapshot);

        let Report::Switch(report) = dispatcher.render(OutputMode::SwitchTatacon) else {
            panic!("wrong report family");
        };
        assert_eq!(
            report.buttons,
            SwitchReport::BUTTON_PLUS | SwitchReport::BUTTON_HOME
        );
        assert_eq!(report.hat, 2);
    }

    #[test]
    fn test_ds3_pressure_follows_hit_strength() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(4095);
        snapshot.drum.ka_left = PadState::struck(2048);
        // Raw on an untriggered pad must not leak into the report.
        snapshot.drum.don_right.raw = 4095;
        dispatcher.set_snapshot(snapshot);

        let Report::Ps3(report) = dispatcher.render(OutputMode::Dualshock3) else {
            panic!("wrong report family");
        };
        assert_eq!(
            report.buttons,
            Ps3Report::BUTTON_CROSS | Ps3Report::BUTTON_L1
        );
        assert_eq!(report.pressure[Ps3Report::PRESSURE_CROSS], 255);
        assert_eq!(report.pressure[Ps3Report::PRESSURE_L1], 128);
        assert_eq!(report.pressure[Ps3Report::PRESSURE_CIRCLE], 0);
    }

    #[test]
    fn test_ps4_flavors_map_drum_differently() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(100);
        snapshot.drum.ka_left = PadState::struck(4095);
        dispatcher.set_snapshot(snapshot);

        let Report::Ps4(tatacon) = dispatcher.render(OutputMode::Ps4Tatacon) else {
            panic!("wrong report family");
        };
        assert_eq!(
            tatacon.buttons,
            Ps4Report::BUTTON_SQUARE | Ps4Report::BUTTON_L1
        );
        assert_eq!(tatacon.lt, 0);

        let Report::Ps4(ds4) = dispatcher.render(OutputMode::Dualshock4) else {
            panic!("wrong report family");
        };
        assert_eq!(ds4.buttons, Ps4Report::BUTTON_CROSS | Ps4Report::BUTTON_L2);
        assert_eq!(ds4.lt, 255);
        assert_eq!(ds4.rt, 0);
    }

    #[test]
    fn test_keyboard_key_sets_and_navigation_keys() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(100);
        snapshot.controller.dpad.up = true;
        snapshot.controller.buttons.select = true;
        dispatcher.set_snapshot(snapshot);

        let Report::Keyboard(p1) = dispatcher.render(OutputMode::KeyboardP1) else {
            panic!("wrong report family");
        };
        assert!(p1.key(usage::KEY_F));
        assert!(p1.key(usage::KEY_UP_ARROW));
        assert!(p1.key(usage::KEY_ESCAPE));
        assert!(!p1.key(usage::KEY_V));

        let Report::Keyboard(p2) = dispatcher.render(OutputMode::KeyboardP2) else {
            panic!("wrong report family");
        };
        assert!(p2.key(usage::KEY_V));
        assert!(!p2.key(usage::KEY_F));
    }

    #[test]
    fn test_xinput_analog_modes_put_strength_on_their_stick() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_right = PadState::struck(4095);
        snapshot.drum.ka_left = PadState::struck(4095);
        dispatcher.set_snapshot(snapshot);

        let Report::Xinput(plain) = dispatcher.render(OutputMode::Xbox360) else {
            panic!("wrong report family");
        };
        assert_eq!(
            plain.buttons,
            XinputReport::BUTTON_B | XinputReport::BUTTON_LB
        );
        assert_eq!((plain.lx, plain.ly, plain.rx, plain.ry), (0, 0, 0, 0));

        let Report::Xinput(p1) = dispatcher.render(OutputMode::Xbox360AnalogP1) else {
            panic!("wrong report family");
        };
        assert_eq!(p1.lx, 32760);
        assert_eq!(p1.ly, -32760);
        assert_eq!((p1.rx, p1.ry), (0, 0));

        let Report::Xinput(p2) = dispatcher.render(OutputMode::Xbox360AnalogP2) else {
            panic!("wrong report family");
        };
        assert_eq!((p2.lx, p2.ly), (0, 0));
        assert_eq!(p2.rx, 32760);
        assert_eq!(p2.ry, -32760);
    }

    #[test]
    fn test_midi_notes_follow_triggers() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(4095);
        dispatcher.set_snapshot(snapshot);

        let Report::Midi(report) = dispatcher.render(OutputMode::Midi) else {
            panic!("wrong report family");
        };
        assert!(report.don_left.on);
        assert_eq!(report.don_left.velocity, 127);
        assert_eq!(report.ka_left, NoteState::OFF);
    }

    #[test]
    fn test_debug_report_reflects_snapshot() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.drum.don_left = PadState::struck(123);
        snapshot.drum.ka_right.raw = 7;
        dispatcher.set_snapshot(snapshot);

        let expected = DebugReport::from_readings([(123, true), (0, false), (0, false), (7, false)]);
        assert_eq!(dispatcher.render(OutputMode::Debug), Report::Debug(expected));
    }

    #[test]
    fn test_hotkey_fires_exactly_at_threshold() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.controller.buttons.start = true;
        snapshot.controller.buttons.select = true;
        dispatcher.set_snapshot(snapshot);

        assert!(!dispatcher.check_hotkey(100));
        assert!(!dispatcher.check_hotkey(100 + HOTKEY_HOLD_MS - 1));
        assert!(dispatcher.check_hotkey(100 + HOTKEY_HOLD_MS));
        // Fires once per hold.
        assert!(!dispatcher.check_hotkey(100 + HOTKEY_HOLD_MS + 1));
        assert!(!dispatcher.check_hotkey(100 + 10 * HOTKEY_HOLD_MS));
    }

    #[test]
    fn test_hotkey_release_resets_timer() {
        let mut dispatcher = InputDispatcher::new();
        let mut combo = InputSnapshot::neutral();
        combo.controller.buttons.start = true;
        combo.controller.buttons.select = true;

        dispatcher.set_snapshot(combo);
        assert!(!dispatcher.check_hotkey(0));

        // Dropping one button mid-hold starts over, even with an immediate
        // re-press.
        let mut partial = combo;
        partial.controller.buttons.select = false;
        dispatcher.set_snapshot(partial);
        assert!(!dispatcher.check_hotkey(1000));

        dispatcher.set_snapshot(combo);
        assert!(!dispatcher.check_hotkey(1001));
        assert!(!dispatcher.check_hotkey(1001 + HOTKEY_HOLD_MS - 1));
        assert!(dispatcher.check_hotkey(1001 + HOTKEY_HOLD_MS));
    }

    #[test]
    fn test_hotkey_needs_both_buttons() {
        let mut dispatcher = InputDispatcher::new();
        let mut snapshot = InputSnapshot::neutral();
        snapshot.controller.buttons.start = true;
        dispatcher.set_snapshot(snapshot);

        for now in (0..5000).step_by(100) {
            assert!(!dispatcher.check_hotkey(now));
        }
    }

    /// Full menu session: hotkey opens the menu, navigation works against
    /// the real page table, south closes it from the root.
    #[test]
    fn test_menu_session_end_to_end() {
        let mut dispatcher = InputDispatcher::new();
        let mut menu = Menu::new();
        let mut store = Settings::new();

        // Hold start+select; the hotkey fires exactly once at the threshold.
        let mut combo = InputSnapshot::neutral();
        combo.controller.buttons.start = true;
        combo.controller.buttons.select = true;
        let mut fired = 0;
        for now in 0..=HOTKEY_HOLD_MS {
            dispatcher.set_snapshot(combo);
            if dispatcher.check_hotkey(now) {
                fired += 1;
                menu.activate();
                dispatcher.release_all();
            }
        }
        assert_eq!(fired, 1);
        assert!(menu.is_active());
        assert_eq!(menu.current_frame(), NavigationFrame::ROOT);
        assert_eq!(
            dispatcher.render(OutputMode::SwitchTatacon),
            Report::Switch(SwitchReport::neutral())
        );

        let mut now = HOTKEY_HOLD_MS + 1;
        let mut tap = |menu: &mut Menu, set: fn(&mut ControllerState), now: &mut u32| {
            let mut held = ControllerState::neutral();
            set(&mut held);
            menu.update(&held, *now, &mut store);
            *now += 1;
            menu.update(&ControllerState::neutral(), *now, &mut store);
            *now += 1;
        };

        // Five rights on the six-item root.
        for _ in 0..5 {
            tap(&mut menu, |c| c.dpad.right = true, &mut now);
        }
        assert_eq!(menu.current_frame().cursor, 5);

        // East enters the flash-reboot page, seeded at 0.
        tap(&mut menu, |c| c.buttons.east = true, &mut now);
        assert_eq!(
            menu.current_frame(),
            NavigationFrame {
                page: MenuPage::Bootsel,
                cursor: 0
            }
        );

        // South pops back to the root with the cursor preserved.
        tap(&mut menu, |c| c.buttons.south = true, &mut now);
        assert_eq!(menu.current_frame().page, MenuPage::Main);
        assert_eq!(menu.current_frame().cursor, 5);

        // South on the root closes the menu at depth one.
        tap(&mut menu, |c| c.buttons.south = true, &mut now);
        assert!(!menu.is_active());
        assert_eq!(menu.depth(), 1);
    }
}
