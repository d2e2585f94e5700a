//! USB device setup for the configured output mode.
//!
//! The adapter presents a different USB personality depending on the
//! stored output mode: a HID gamepad or keyboard, an XInput vendor
//! interface, a USB-MIDI instrument, or a CDC-ACM serial port for the
//! debug readout. The personality is fixed for the lifetime of the
//! connection; changing the mode in the menu takes effect by reboot.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{self, CdcAcmClass};
use embassy_usb::class::hid::{self, HidWriter};
use embassy_usb::class::midi::MidiClass;
use embassy_usb::driver::{Endpoint, EndpointError, EndpointIn};
use embassy_usb::{Builder, Config as UsbConfig};
use taiko_core::{OutputMode, Report};
use usb_proto::midi::{self, MidiReport};
use usb_proto::{keyboard, ps3, ps4, switch};

type UsbDriver<'d> = Driver<'d, USB>;
type UsbEndpointIn<'d> = <UsbDriver<'d> as embassy_usb::driver::Driver<'d>>::EndpointIn;

/// Endpoint and write buffer size shared by every HID personality.
const HID_PACKET_LEN: usize = 64;

/// Device identity for one output mode.
///
/// Console modes impersonate the matching licensed controller, since
/// the hosts only talk to VID/PID pairs they know. The keyboard, MIDI
/// and debug personalities have no one to impersonate and use the
/// pid.codes test VID/PID like any other open hardware project.
pub fn device_config(mode: OutputMode) -> UsbConfig<'static> {
    let (vid, pid, product) = match mode {
        OutputMode::SwitchTatacon => (0x0f0d, 0x00f0, "Taiko Drum Controller (Switch)"),
        OutputMode::SwitchHoripad => (0x0f0d, 0x00c1, "Horipad (Switch)"),
        OutputMode::Dualshock3 => (0x054c, 0x0268, "Wireless Controller (PS3)"),
        OutputMode::Ps4Tatacon => (0x0f0d, 0x00ce, "Taiko Drum Controller (PS4)"),
        OutputMode::Dualshock4 => (0x054c, 0x05c4, "Wireless Controller (PS4)"),
        OutputMode::KeyboardP1 => (0x1209, 0x0001, "Taiko Keyboard P1"),
        OutputMode::KeyboardP2 => (0x1209, 0x0001, "Taiko Keyboard P2"),
        OutputMode::Xbox360 | OutputMode::Xbox360AnalogP1 | OutputMode::Xbox360AnalogP2 => {
            (0x045e, 0x028e, "Xbox 360 Controller")
        }
        OutputMode::Midi => (0x1209, 0x0001, "Taiko MIDI Drum"),
        OutputMode::Debug => (0x1209, 0x0001, "Taiko Debug Console"),
    };

    let mut config = UsbConfig::new(vid, pid);
    config.manufacturer = Some("Taiko Project");
    config.product = Some(product);
    config.serial_number = Some("001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    match mode {
        OutputMode::Xbox360 | OutputMode::Xbox360AnalogP1 | OutputMode::Xbox360AnalogP2 => {
            // XInput is recognised by the vendor class triple on the
            // device itself, not just the interface.
            config.device_class = 0xff;
            config.device_sub_class = 0xff;
            config.device_protocol = 0xff;
            config.device_release = 0x0114;
        }
        OutputMode::Debug => {
            // Composite device with IADs, required for CDC-ACM on
            // Windows.
            config.device_class = 0xef;
            config.device_sub_class = 0x02;
            config.device_protocol = 0x01;
            config.composite_with_iads = true;
        }
        _ => {}
    }

    config
}

/// XInput vendor interface.
///
/// There is no published descriptor format for XInput; hosts recognise
/// the vendor class triple 0xFF/0x5D/0x01 together with the
/// class-specific descriptor below. Reports go out over a plain
/// interrupt endpoint.
pub struct XinputOutput<'d> {
    ep_in: UsbEndpointIn<'d>,
}

impl XinputOutput<'_> {
    async fn wait_enabled(&mut self) {
        self.ep_in.wait_enabled().await;
    }

    async fn send(&mut self, bytes: &[u8]) -> Result<(), EndpointError> {
        self.ep_in.write(bytes).await
    }
}

fn configure_xinput<'d>(builder: &mut Builder<'d, UsbDriver<'d>>) -> XinputOutput<'d> {
    let mut function = builder.function(0xff, 0x5d, 0x01);
    let mut interface = function.interface();
    let mut alt = interface.alt_setting(0xff, 0x5d, 0x01, None);
    // Undocumented descriptor the Windows XInput driver probes for. It
    // names the report endpoints, so it has to match the allocation
    // order below: IN at 0x81, OUT at 0x01.
    alt.descriptor(
        0x21,
        &[
            0x00, 0x01, 0x01, 0x25, 0x81, 0x14, 0x00, 0x00, 0x00, 0x00, 0x13, 0x01, 0x08, 0x00,
            0x00,
        ],
    );
    let ep_in = alt.endpoint_interrupt_in(None, 32, 1);
    // Rumble comes in here; the adapter has nothing to shake, so the
    // endpoint only exists to satisfy the descriptor.
    let _ep_out = alt.endpoint_interrupt_out(None, 32, 8);
    drop(function);
    XinputOutput { ep_in }
}

/// USB-MIDI note stream.
///
/// Each report is diffed against the previous one and only the edges
/// become note-on/note-off events, so a held pad does not retrigger.
pub struct MidiOutput<'d> {
    class: MidiClass<'d, UsbDriver<'d>>,
    last: MidiReport,
}

impl<'d> MidiOutput<'d> {
    fn new(class: MidiClass<'d, UsbDriver<'d>>) -> Self {
        Self {
            class,
            last: MidiReport::neutral(),
        }
    }

    async fn wait_connection(&mut self) {
        self.class.wait_connection().await;
    }

    async fn send(&mut self, report: &MidiReport) -> Result<(), EndpointError> {
        let current = report.notes();
        let previous = self.last.notes();
        for (&(note, state), &(_, prev)) in current.iter().zip(previous.iter()) {
            if state.on && !prev.on {
                self.class
                    .write_packet(&midi::note_on_packet(note, state.velocity))
                    .await?;
            } else if !state.on && prev.on {
                self.class.write_packet(&midi::note_off_packet(note)).await?;
            }
        }
        self.last = *report;
        Ok(())
    }
}

/// The active USB output, one variant per transport family.
pub enum UsbSender<'d> {
    Hid(HidWriter<'d, UsbDriver<'d>, HID_PACKET_LEN>),
    Xinput(XinputOutput<'d>),
    Midi(MidiOutput<'d>),
    Cdc(CdcAcmClass<'d, UsbDriver<'d>>),
}

impl UsbSender<'_> {
    /// Waits until the host has enumerated the device and the output
    /// side is live.
    pub async fn wait_ready(&mut self) {
        match self {
            UsbSender::Hid(writer) => writer.ready().await,
            UsbSender::Xinput(xinput) => xinput.wait_enabled().await,
            UsbSender::Midi(midi) => midi.wait_connection().await,
            UsbSender::Cdc(cdc) => cdc.wait_connection().await,
        }
    }

    /// Sends one rendered report.
    pub async fn send(&mut self, report: &Report) -> Result<(), EndpointError> {
        match self {
            UsbSender::Hid(writer) => {
                let mut buf = [0u8; Report::MAX_SIZE];
                let len = report.write_to(&mut buf);
                writer.write(&buf[..len]).await
            }
            UsbSender::Xinput(xinput) => {
                let mut buf = [0u8; Report::MAX_SIZE];
                let len = report.write_to(&mut buf);
                xinput.send(&buf[..len]).await
            }
            // The sender and the report family are both fixed at boot
            // by the same mode, so the arms below never see a foreign
            // report.
            UsbSender::Midi(midi) => match report {
                Report::Midi(report) => midi.send(report).await,
                _ => Ok(()),
            },
            UsbSender::Cdc(cdc) => match report {
                Report::Debug(report) => {
                    cdc.write_packet(report.as_bytes()).await?;
                    cdc.write_packet(b"\r\n").await
                }
                _ => Ok(()),
            },
        }
    }
}

/// Adds the class matching `mode` to the builder and returns the
/// sender half.
pub fn configure_output<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    mode: OutputMode,
    hid_state: &'d mut hid::State<'d>,
    cdc_state: &'d mut cdc_acm::State<'d>,
) -> UsbSender<'d> {
    match mode {
        OutputMode::SwitchTatacon | OutputMode::SwitchHoripad => {
            hid_sender(builder, hid_state, switch::REPORT_DESCRIPTOR)
        }
        OutputMode::Dualshock3 => hid_sender(builder, hid_state, ps3::REPORT_DESCRIPTOR),
        OutputMode::Ps4Tatacon | OutputMode::Dualshock4 => {
            hid_sender(builder, hid_state, ps4::REPORT_DESCRIPTOR)
        }
        OutputMode::KeyboardP1 | OutputMode::KeyboardP2 => {
            hid_sender(builder, hid_state, keyboard::REPORT_DESCRIPTOR)
        }
        OutputMode::Xbox360 | OutputMode::Xbox360AnalogP1 | OutputMode::Xbox360AnalogP2 => {
            UsbSender::Xinput(configure_xinput(builder))
        }
        OutputMode::Midi => UsbSender::Midi(MidiOutput::new(MidiClass::new(builder, 1, 1, 64))),
        OutputMode::Debug => UsbSender::Cdc(CdcAcmClass::new(builder, cdc_state, 64)),
    }
}

fn hid_sender<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut hid::State<'d>,
    report_descriptor: &'static [u8],
) -> UsbSender<'d> {
    let config = hid::Config {
        report_descriptor,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: HID_PACKET_LEN as u16,
        hid_subclass: hid::HidSubclass::No,
        hid_boot_protocol: hid::HidBootProtocol::None,
    };
    UsbSender::Hid(HidWriter::new(builder, state, config))
}
