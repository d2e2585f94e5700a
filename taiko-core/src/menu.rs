//! On-device settings menu: page table, navigation stack, action dispatch.
//!
//! The menu is a stack of `{page, cursor}` frames over a fixed page table.
//! Pages come in four kinds: the root list, selection lists, single-value
//! editors, and a terminal reboot notice. Navigation pulses (already
//! rate-limited by [`ButtonRepeater`]) move the cursor, descend and ascend
//! the stack, and dispatch [`Action`]s against the settings store.
//!
//! Value edits are applied live: every cursor move on a value page writes
//! the new value to the store immediately, so backing out with south keeps
//! the edit and confirm with east merely finalizes it.

use usb_proto::OutputMode;

use crate::repeat::ButtonRepeater;
use crate::settings::SettingsStore;
use crate::types::{ControllerState, Zone};

/// Every page the menu can show. Closed set; each page has exactly one
/// descriptor in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuPage {
    Main,
    DeviceMode,
    TriggerThreshold,
    TriggerThresholdKaLeft,
    TriggerThresholdDonLeft,
    TriggerThresholdDonRight,
    TriggerThresholdKaRight,
    DebounceDelay,
    LedBrightness,
    Reset,
    Bootsel,
    BootselMsg,
}

/// How a page interprets the cursor and navigation pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageKind {
    /// Item list at the bottom of the stack; south here closes the menu.
    Root,
    /// Item list; left/right wrap the cursor, east runs the item action.
    Selection,
    /// Single numeric setting; cursor is the value, up/down edit it live.
    Value,
    /// Terminal notice shown once a reboot is pending; closes the menu on
    /// the next tick.
    RebootInfo,
}

/// Everything the menu can do, each variant carrying exactly the data its
/// dispatch needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Push the given page with its cursor seeded from the store.
    GotoPage(MenuPage),
    /// Store the given output mode and return to the parent page.
    ChangeMode(OutputMode),
    /// Commit the cursor as the trigger threshold for one zone.
    SetThreshold(Zone),
    /// Commit the cursor as the hit hold time.
    SetDebounceDelay,
    /// Commit the cursor as the LED brightness.
    SetLedBrightness,
    /// Restore factory defaults, staying on the current page.
    DoReset,
    /// Mark a reboot into the flash loader and show the reboot notice.
    DoRebootToBootsel,
    /// Return to the parent page.
    GotoParent,
    /// Display-only item.
    None,
}

/// One selectable line on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    pub label: &'static str,
    pub action: Action,
}

impl MenuItem {
    const fn new(label: &'static str, action: Action) -> Self {
        Self { label, action }
    }
}

/// Static description of one page: kind, display title, items, and the
/// upper cursor bound for value pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageDescriptor {
    pub kind: PageKind,
    pub title: &'static str,
    pub items: &'static [MenuItem],
    pub max_value: u16,
}

mod pages {
    use super::{Action, MenuItem, MenuPage, PageDescriptor, PageKind};
    use crate::types::Zone;
    use usb_proto::OutputMode;

    pub(super) const MAIN: PageDescriptor = PageDescriptor {
        kind: PageKind::Root,
        title: "Settings",
        items: &[
            MenuItem::new("Mode", Action::GotoPage(MenuPage::DeviceMode)),
            MenuItem::new("Brightness", Action::GotoPage(MenuPage::LedBrightness)),
            MenuItem::new("Sensitvty", Action::GotoPage(MenuPage::TriggerThreshold)),
            MenuItem::new("Hold Time", Action::GotoPage(MenuPage::DebounceDelay)),
            MenuItem::new("Reset", Action::GotoPage(MenuPage::Reset)),
            MenuItem::new("USB Flash", Action::GotoPage(MenuPage::Bootsel)),
        ],
        max_value: 0,
    };

    pub(super) const DEVICE_MODE: PageDescriptor = PageDescriptor {
        kind: PageKind::Selection,
        title: "Mode",
        items: &[
            MenuItem::new("Swtch Tata", Action::ChangeMode(OutputMode::SwitchTatacon)),
            MenuItem::new("Swtch Pro", Action::ChangeMode(OutputMode::SwitchHoripad)),
            MenuItem::new("Dualshock3", Action::ChangeMode(OutputMode::Dualshock3)),
            MenuItem::new("PS4 Tata", Action::ChangeMode(OutputMode::Ps4Tatacon)),
            MenuItem::new("Dualshock4", Action::ChangeMode(OutputMode::Dualshock4)),
            MenuItem::new("Keybrd P1", Action::ChangeMode(OutputMode::KeyboardP1)),
            MenuItem::new("Keybrd P2", Action::ChangeMode(OutputMode::KeyboardP2)),
            MenuItem::new("Xbox 360", Action::ChangeMode(OutputMode::Xbox360)),
            MenuItem::new("Analog P1", Action::ChangeMode(OutputMode::Xbox360AnalogP1)),
            MenuItem::new("Analog P2", Action::ChangeMode(OutputMode::Xbox360AnalogP2)),
            MenuItem::new("MIDI", Action::ChangeMode(OutputMode::Midi)),
            MenuItem::new("Debug", Action::ChangeMode(OutputMode::Debug)),
        ],
        max_value: 0,
    };

    pub(super) const TRIGGER_THRESHOLD: PageDescriptor = PageDescriptor {
        kind: PageKind::Selection,
        title: "Sensitivity",
        items: &[
            MenuItem::new("Ka Left", Action::GotoPage(MenuPage::TriggerThresholdKaLeft)),
            MenuItem::new("Don Left", Action::GotoPage(MenuPage::TriggerThresholdDonLeft)),
            MenuItem::new("Don Right", Action::GotoPage(MenuPage::TriggerThresholdDonRight)),
            MenuItem::new("Ka Right", Action::GotoPage(MenuPage::TriggerThresholdKaRight)),
        ],
        max_value: 0,
    };

    pub(super) const TRIGGER_THRESHOLD_KA_LEFT: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "Trg Level Ka Left",
        items: &[MenuItem::new("", Action::SetThreshold(Zone::KaLeft))],
        max_value: 4095,
    };

    pub(super) const TRIGGER_THRESHOLD_DON_LEFT: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "Trg Level Don Left",
        items: &[MenuItem::new("", Action::SetThreshold(Zone::DonLeft))],
        max_value: 4095,
    };

    pub(super) const TRIGGER_THRESHOLD_DON_RIGHT: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "Trg Level Don Right",
        items: &[MenuItem::new("", Action::SetThreshold(Zone::DonRight))],
        max_value: 4095,
    };

    pub(super) const TRIGGER_THRESHOLD_KA_RIGHT: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "Trg Level Ka Right",
        items: &[MenuItem::new("", Action::SetThreshold(Zone::KaRight))],
        max_value: 4095,
    };

    pub(super) const DEBOUNCE_DELAY: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "Hit Hold Time (ms)",
        items: &[MenuItem::new("", Action::SetDebounceDelay)],
        max_value: 255,
    };

    pub(super) const LED_BRIGHTNESS: PageDescriptor = PageDescriptor {
        kind: PageKind::Value,
        title: "LED Brightness",
        items: &[MenuItem::new("", Action::SetLedBrightness)],
        max_value: 255,
    };

    pub(super) const RESET: PageDescriptor = PageDescriptor {
        kind: PageKind::Selection,
        title: "Reset all Settings?",
        items: &[
            MenuItem::new("No", Action::GotoParent),
            MenuItem::new("Yes", Action::DoReset),
        ],
        max_value: 0,
    };

    pub(super) const BOOTSEL: PageDescriptor = PageDescriptor {
        kind: PageKind::Selection,
        title: "Reboot to Flash Mode",
        items: &[MenuItem::new("Reboot?", Action::DoRebootToBootsel)],
        max_value: 0,
    };

    pub(super) const BOOTSEL_MSG: PageDescriptor = PageDescriptor {
        kind: PageKind::RebootInfo,
        title: "Ready to Flash...",
        items: &[MenuItem::new("BOOTSEL", Action::None)],
        max_value: 0,
    };
}

impl MenuPage {
    /// Descriptor for this page. Exhaustive over the page set, so a page
    /// without a table entry cannot exist.
    #[must_use]
    pub const fn descriptor(self) -> &'static PageDescriptor {
        match self {
            MenuPage::Main => &pages::MAIN,
            MenuPage::DeviceMode => &pages::DEVICE_MODE,
            MenuPage::TriggerThreshold => &pages::TRIGGER_THRESHOLD,
            MenuPage::TriggerThresholdKaLeft => &pages::TRIGGER_THRESHOLD_KA_LEFT,
            MenuPage::TriggerThresholdDonLeft => &pages::TRIGGER_THRESHOLD_DON_LEFT,
            MenuPage::TriggerThresholdDonRight => &pages::TRIGGER_THRESHOLD_DON_RIGHT,
            MenuPage::TriggerThresholdKaRight => &pages::TRIGGER_THRESHOLD_KA_RIGHT,
            MenuPage::DebounceDelay => &pages::DEBOUNCE_DELAY,
            MenuPage::LedBrightness => &pages::LED_BRIGHTNESS,
            MenuPage::Reset => &pages::RESET,
            MenuPage::Bootsel => &pages::BOOTSEL,
            MenuPage::BootselMsg => &pages::BOOTSEL_MSG,
        }
    }
}

/// One level of menu navigation: the page and its cursor.
///
/// On item pages the cursor is the highlighted row; on value pages it is the
/// value being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationFrame {
    pub page: MenuPage,
    pub cursor: u16,
}

impl NavigationFrame {
    /// Root page with the cursor on the first item.
    pub const ROOT: Self = Self {
        page: MenuPage::Main,
        cursor: 0,
    };
}

// Deepest chains (root -> group -> value editor, root -> bootsel -> notice)
// bottom out at depth 3; one slot spare.
const MAX_DEPTH: usize = 4;

type NavigationStack = heapless::Vec<NavigationFrame, MAX_DEPTH>;

/// The settings menu engine.
///
/// Inactive by default; the surrounding system calls [`Menu::activate`] when
/// the menu hotkey fires and stops forwarding inputs to the host while
/// [`Menu::is_active`] holds. Per tick, pulses are evaluated in fixed
/// priority order left, right, up, down, south, east; the first that applies
/// to the current page wins.
#[derive(Clone, Debug)]
pub struct Menu {
    active: bool,
    stack: NavigationStack,
    repeater: ButtonRepeater,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        let mut stack = NavigationStack::new();
        // An empty stack always has room for the root frame.
        let _ = stack.push(NavigationFrame::ROOT);
        Self {
            active: false,
            stack,
            repeater: ButtonRepeater::new(),
        }
    }

    /// Open the menu at the root page with the cursor on the first item.
    ///
    /// Repeat timers are deliberately left alone: a button still held from
    /// before stays in its hold phase instead of pulsing again.
    pub fn activate(&mut self) {
        self.stack.clear();
        let _ = self.stack.push(NavigationFrame::ROOT);
        self.active = true;
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Top of the navigation stack, for the renderer.
    #[must_use]
    pub fn current_frame(&self) -> NavigationFrame {
        match self.stack.last() {
            Some(frame) => *frame,
            None => NavigationFrame::ROOT,
        }
    }

    /// Current navigation depth; the root frame counts as 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Advance the menu one tick.
    ///
    /// No-op while inactive. `now_ms` is a wrapping millisecond clock used
    /// only for hold-to-repeat timing.
    pub fn update<S: SettingsStore>(
        &mut self,
        controller: &ControllerState,
        now_ms: u32,
        store: &mut S,
    ) {
        if !self.active {
            return;
        }
        let pulses = self.repeater.check(controller, now_ms);
        let frame = match self.stack.last() {
            Some(frame) => *frame,
            None => {
                debug_assert!(false, "navigation stack lost its root frame");
                return;
            }
        };
        let desc = frame.page.descriptor();

        if matches!(desc.kind, PageKind::RebootInfo) {
            // Terminal notice; the reboot is already scheduled.
            self.active = false;
        } else if pulses.left {
            if matches!(desc.kind, PageKind::Root | PageKind::Selection) {
                let last_item = desc.items.len() as u16 - 1;
                if let Some(top) = self.stack.last_mut() {
                    top.cursor = if top.cursor == 0 {
                        last_item
                    } else {
                        top.cursor - 1
                    };
                }
            }
        } else if pulses.right {
            if matches!(desc.kind, PageKind::Root | PageKind::Selection) {
                let last_item = desc.items.len() as u16 - 1;
                if let Some(top) = self.stack.last_mut() {
                    top.cursor = if top.cursor == last_item {
                        0
                    } else {
                        top.cursor + 1
                    };
                }
            }
        } else if pulses.up {
            if matches!(desc.kind, PageKind::Value) && frame.cursor < desc.max_value {
                self.edit_value(frame.cursor + 1, desc, store);
            }
        } else if pulses.down {
            if matches!(desc.kind, PageKind::Value) && frame.cursor > 0 {
                self.edit_value(frame.cursor - 1, desc, store);
            }
        } else if pulses.south {
            match desc.kind {
                PageKind::Value | PageKind::Selection => self.goto_parent(),
                PageKind::Root => self.active = false,
                PageKind::RebootInfo => {}
            }
        } else if pulses.east {
            match desc.kind {
                PageKind::Value => {
                    // Edits were committed live; finalize and leave.
                    if let Some(item) = desc.items.first() {
                        apply_value(item.action, frame.cursor, store);
                    }
                    self.goto_parent();
                }
                PageKind::Root | PageKind::Selection => {
                    if let Some(item) = desc.items.get(frame.cursor as usize) {
                        self.perform_selection(item.action, store);
                    }
                }
                PageKind::RebootInfo => {}
            }
        }
    }

    /// Move the value cursor and commit the new value in the same tick.
    fn edit_value<S: SettingsStore>(
        &mut self,
        cursor: u16,
        desc: &PageDescriptor,
        store: &mut S,
    ) {
        if let Some(top) = self.stack.last_mut() {
            top.cursor = cursor;
        }
        if let Some(item) = desc.items.first() {
            apply_value(item.action, cursor, store);
        }
    }

    fn perform_selection<S: SettingsStore>(&mut self, action: Action, store: &mut S) {
        match action {
            Action::GotoPage(page) => self.goto_page(page, store),
            Action::ChangeMode(mode) => {
                store.set_output_mode(mode);
                self.goto_parent();
            }
            // Value commits never arrive here; value pages finalize through
            // their east handler.
            Action::SetThreshold(_) | Action::SetDebounceDelay | Action::SetLedBrightness => {}
            Action::DoReset => store.reset(),
            Action::DoRebootToBootsel => {
                store.schedule_reboot();
                self.goto_page(MenuPage::BootselMsg, store);
            }
            Action::GotoParent => self.goto_parent(),
            Action::None => {}
        }
    }

    fn goto_page<S: SettingsStore>(&mut self, page: MenuPage, store: &S) {
        let frame = NavigationFrame {
            page,
            cursor: current_selection(page, store),
        };
        if self.stack.push(frame).is_err() {
            debug_assert!(false, "navigation stack overflow");
        }
    }

    fn goto_parent(&mut self) {
        // Only reachable at depth >= 2; south on the root deactivates
        // instead of popping.
        debug_assert!(self.stack.len() > 1, "pop would empty the stack");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor seed when entering a page: the store's current value for value
/// pages, the stored mode's position for the mode list, 0 elsewhere.
fn current_selection<S: SettingsStore>(page: MenuPage, store: &S) -> u16 {
    match page {
        MenuPage::DeviceMode => store.output_mode().index() as u16,
        MenuPage::TriggerThresholdKaLeft => store.trigger_thresholds().ka_left,
        MenuPage::TriggerThresholdDonLeft => store.trigger_thresholds().don_left,
        MenuPage::TriggerThresholdDonRight => store.trigger_thresholds().don_right,
        MenuPage::TriggerThresholdKaRight => store.trigger_thresholds().ka_right,
        MenuPage::DebounceDelay => store.debounce_delay_ms(),
        MenuPage::LedBrightness => u16::from(store.led_brightness()),
        MenuPage::Main
        | MenuPage::TriggerThreshold
        | MenuPage::Reset
        | MenuPage::Bootsel
        | MenuPage::BootselMsg => 0,
    }
}

fn apply_value<S: SettingsStore>(action: Action, value: u16, store: &mut S) {
    match action {
        Action::SetThreshold(zone) => {
            let mut thresholds = store.trigger_thresholds();
            thresholds.set(zone, value);
            store.set_trigger_thresholds(thresholds);
        }
        Action::SetDebounceDelay => store.set_debounce_delay_ms(value),
        Action::SetLedBrightness => store.set_led_brightness(value as u8),
        // Only the three value commits above are bound to value pages.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::types::ControllerState;

    /// Menu plus store plus clock. `tap` presses and releases a button with
    /// enough idle time between taps that hold-repeat never kicks in.
    struct Rig {
        menu: Menu,
        store: Settings,
        now: u32,
    }

    impl Rig {
        fn new() -> Self {
            let mut menu = Menu::new();
            menu.activate();
            Self {
                menu,
                store: Settings::new(),
                now: 0,
            }
        }

        fn tap(&mut self, set: fn(&mut ControllerState)) {
            let mut held = ControllerState::neutral();
            set(&mut held);
            self.menu.update(&held, self.now, &mut self.store);
            self.now += 1;
            self.menu
                .update(&ControllerState::neutral(), self.now, &mut self.store);
            self.now += 1;
        }

        fn frame(&self) -> NavigationFrame {
            self.menu.current_frame()
        }
    }

    fn left(c: &mut ControllerState) {
        c.dpad.left = true;
    }
    fn right(c: &mut ControllerState) {
        c.dpad.right = true;
    }
    fn up(c: &mut ControllerState) {
        c.dpad.up = true;
    }
    fn down(c: &mut ControllerState) {
        c.dpad.down = true;
    }
    fn south(c: &mut ControllerState) {
        c.buttons.south = true;
    }
    fn east(c: &mut ControllerState) {
        c.buttons.east = true;
    }

    #[test]
    fn test_activate_opens_root_at_first_item() {
        let rig = Rig::new();
        assert!(rig.menu.is_active());
        assert_eq!(rig.frame(), NavigationFrame::ROOT);
        assert_eq!(rig.menu.depth(), 1);
    }

    #[test]
    fn test_root_cursor_wraps_both_directions() {
        let mut rig = Rig::new();
        let items = MenuPage::Main.descriptor().items.len() as u16;
        assert_eq!(items, 6);

        // 13 taps right from 0 lands on 13 mod 6.
        for _ in 0..13 {
            rig.tap(right);
        }
        assert_eq!(rig.frame().cursor, 13 % items);

        // Left from 0 wraps to the last item.
        let mut rig = Rig::new();
        rig.tap(left);
        assert_eq!(rig.frame().cursor, items - 1);
    }

    #[test]
    fn test_left_wins_over_right_when_both_pulse() {
        let mut rig = Rig::new();
        let mut both = ControllerState::neutral();
        both.dpad.left = true;
        both.dpad.right = true;
        rig.menu.update(&both, 0, &mut rig.store);
        assert_eq!(rig.frame().cursor, 5);
    }

    #[test]
    fn test_up_down_do_nothing_on_item_pages() {
        let mut rig = Rig::new();
        rig.tap(up);
        rig.tap(down);
        assert_eq!(rig.frame(), NavigationFrame::ROOT);
    }

    #[test]
    fn test_value_page_seeds_cursor_from_store() {
        let mut rig = Rig::new();
        rig.store.set_debounce_delay_ms(100);

        // Root item 3 is the hold time editor.
        for _ in 0..3 {
            rig.tap(right);
        }
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::DebounceDelay);
        assert_eq!(rig.frame().cursor, 100);

        // Leave and re-enter: still seeded from the store.
        rig.tap(south);
        rig.tap(east);
        assert_eq!(rig.frame().cursor, 100);
    }

    #[test]
    fn test_value_edits_commit_live_and_clamp() {
        let mut rig = Rig::new();
        rig.store.set_debounce_delay_ms(1);
        for _ in 0..3 {
            rig.tap(right);
        }
        rig.tap(east);

        rig.tap(up);
        assert_eq!(rig.frame().cursor, 2);
        assert_eq!(rig.store.debounce_delay_ms(), 2);

        // Down past zero clamps and stops committing.
        for _ in 0..5 {
            rig.tap(down);
        }
        assert_eq!(rig.frame().cursor, 0);
        assert_eq!(rig.store.debounce_delay_ms(), 0);

        // Left/right have no effect on a value page.
        rig.tap(left);
        rig.tap(right);
        assert_eq!(rig.frame().cursor, 0);
    }

    #[test]
    fn test_value_cursor_clamps_at_max() {
        let mut rig = Rig::new();
        rig.store.set_led_brightness(254);
        rig.tap(right);
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::LedBrightness);
        assert_eq!(rig.frame().cursor, 254);

        rig.tap(up);
        rig.tap(up);
        rig.tap(up);
        assert_eq!(rig.frame().cursor, 255);
        assert_eq!(rig.store.led_brightness(), 255);
    }

    #[test]
    fn test_east_on_value_page_finalizes_and_pops() {
        let mut rig = Rig::new();
        rig.store.set_led_brightness(100);
        rig.tap(right);
        rig.tap(east);
        rig.tap(up);
        assert_eq!(rig.frame().cursor, 101);
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::Main);
        assert_eq!(rig.store.led_brightness(), 101);
    }

    #[test]
    fn test_south_keeps_live_edits() {
        let mut rig = Rig::new();
        rig.store.set_led_brightness(10);
        rig.tap(right);
        rig.tap(east);
        rig.tap(up);
        rig.tap(south);
        assert_eq!(rig.frame().page, MenuPage::Main);
        assert_eq!(rig.store.led_brightness(), 11);
    }

    #[test]
    fn test_south_on_root_deactivates_without_popping() {
        let mut rig = Rig::new();
        rig.tap(south);
        assert!(!rig.menu.is_active());
        assert_eq!(rig.menu.depth(), 1);
        assert_eq!(rig.frame().page, MenuPage::Main);
    }

    #[test]
    fn test_inactive_menu_ignores_input() {
        let mut rig = Rig::new();
        rig.tap(south);
        assert!(!rig.menu.is_active());
        rig.tap(right);
        assert_eq!(rig.frame().cursor, 0);
    }

    #[test]
    fn test_mode_list_seeds_from_stored_mode_and_commits() {
        let mut rig = Rig::new();
        rig.store.set_output_mode(OutputMode::Midi);

        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::DeviceMode);
        assert_eq!(rig.frame().cursor, OutputMode::Midi.index() as u16);

        // Move to the next entry and confirm: mode stored, back at root.
        rig.tap(right);
        rig.tap(east);
        assert_eq!(rig.store.output_mode(), OutputMode::Debug);
        assert_eq!(rig.frame().page, MenuPage::Main);
    }

    #[test]
    fn test_reset_page_no_returns_yes_resets_in_place() {
        let mut rig = Rig::new();
        rig.store.set_led_brightness(1);

        for _ in 0..4 {
            rig.tap(right);
        }
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::Reset);

        // "No" goes back without touching anything.
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::Main);
        assert_eq!(rig.store.led_brightness(), 1);

        // "Yes" restores defaults and stays on the page.
        rig.tap(east);
        rig.tap(right);
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::Reset);
        assert_eq!(rig.store.led_brightness(), Settings::DEFAULT.led_brightness);
    }

    #[test]
    fn test_bootsel_schedules_reboot_and_closes_menu() {
        let mut rig = Rig::new();
        for _ in 0..5 {
            rig.tap(right);
        }
        rig.tap(east);
        assert_eq!(rig.frame().page, MenuPage::Bootsel);

        // Confirm pushes the notice; the tick after closes the menu with
        // the reboot request pending.
        rig.tap(east);
        assert!(rig.store.reboot_scheduled());
        assert!(!rig.menu.is_active());
        assert_eq!(rig.frame().page, MenuPage::BootselMsg);
    }

    #[test]
    fn test_held_direction_repeats_after_delay() {
        let mut rig = Rig::new();
        let mut held = ControllerState::neutral();
        held.dpad.right = true;

        // Initial pulse, then nothing until the repeat delay elapses.
        rig.menu.update(&held, 0, &mut rig.store);
        rig.menu.update(&held, 500, &mut rig.store);
        assert_eq!(rig.frame().cursor, 1);
        rig.menu.update(&held, 1001, &mut rig.store);
        assert_eq!(rig.frame().cursor, 2);
        rig.menu.update(&held, 1022, &mut rig.store);
        assert_eq!(rig.frame().cursor, 3);
    }
}
