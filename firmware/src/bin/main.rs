#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};
use embassy_usb::class::cdc_acm;
use embassy_usb::class::hid;
use embassy_usb::Builder;
use static_cell::StaticCell;
use taiko_firmware::{
    configure_output, device_config, ControlPanel, DrumSampler, InputDispatcher, InputSnapshot,
    Menu, OutputMode, Report, Settings, SettingsFlash, SettingsStore, UsbSender,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Signal for passing rendered reports from the control loop to the
/// output task. Signal instead of Channel gives "latest value wins"
/// semantics, which is what a stream of input reports wants.
static REPORT_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, Report>> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Class state for whichever personality gets built.
static HID_STATE: StaticCell<hid::State> = StaticCell::new();
static CDC_STATE: StaticCell<cdc_acm::State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Taiko adapter starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = REPORT_SIGNAL.init(Signal::new());

    // Settings come up first; the stored mode decides the USB
    // personality for this whole power cycle.
    let mut store = SettingsFlash::new(Flash::new(p.FLASH, p.DMA_CH0));
    let settings = store.load();
    let mode = settings.output_mode;
    info!("output mode: {}", mode);

    // --- Drum and panel setup ---
    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let channels = [
        Channel::new_pin(p.PIN_26, Pull::None), // don left
        Channel::new_pin(p.PIN_27, Pull::None), // ka left
        Channel::new_pin(p.PIN_28, Pull::None), // don right
        Channel::new_pin(p.PIN_29, Pull::None), // ka right
    ];
    let drum = DrumSampler::new(adc, channels);

    let panel = ControlPanel {
        up: Input::new(p.PIN_0, Pull::Up),
        down: Input::new(p.PIN_1, Pull::Up),
        left: Input::new(p.PIN_2, Pull::Up),
        right: Input::new(p.PIN_3, Pull::Up),
        north: Input::new(p.PIN_4, Pull::Up),
        east: Input::new(p.PIN_5, Pull::Up),
        south: Input::new(p.PIN_6, Pull::Up),
        west: Input::new(p.PIN_7, Pull::Up),
        l: Input::new(p.PIN_8, Pull::Up),
        r: Input::new(p.PIN_9, Pull::Up),
        start: Input::new(p.PIN_10, Pull::Up),
        select: Input::new(p.PIN_11, Pull::Up),
        home: Input::new(p.PIN_12, Pull::Up),
        share: Input::new(p.PIN_13, Pull::Up),
    };

    // Hit flash on the on-board LED.
    let mut led_config = PwmConfig::default();
    led_config.top = 255;
    let led = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_25, led_config.clone());

    // --- USB setup ---
    let usb_driver = Driver::new(p.USB, Irqs);
    let usb_config = device_config(mode);

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    let sender = configure_output(
        &mut builder,
        mode,
        HID_STATE.init(hid::State::new()),
        CDC_STATE.init(cdc_acm::State::new()),
    );

    let usb_device = builder.build();

    spawner.must_spawn(usb_task(usb_device));
    spawner.must_spawn(control_task(drum, panel, store, settings, led, led_config, signal));
    spawner.must_spawn(output_task(sender, signal));

    info!("Taiko adapter initialized");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Control loop: samples the drum and panel at 1 kHz, runs hotkey and
/// menu handling and publishes the rendered report.
#[embassy_executor::task]
async fn control_task(
    mut drum: DrumSampler,
    panel: ControlPanel,
    mut store: SettingsFlash,
    mut settings: Settings,
    mut led: Pwm<'static>,
    mut led_config: PwmConfig,
    signal: &'static Signal<CriticalSectionRawMutex, Report>,
) {
    // The personality was built from these settings at boot; a mode
    // change in the menu only applies after the restart below.
    let boot_mode = settings.output_mode;
    let mut dispatcher = InputDispatcher::new();
    let mut menu = Menu::new();
    let mut ticker = Ticker::every(Duration::from_millis(1));

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis() as u32;

        let controller = panel.read();
        let drum_state = drum
            .sample(&settings.trigger_thresholds, settings.debounce_delay_ms, now_ms)
            .await;

        if menu.is_active() {
            // The menu consumes the panel; the host keeps seeing the
            // neutral snapshot left behind by release_all.
            menu.update(&controller, now_ms, &mut settings);
            if !menu.is_active() {
                finish_menu_session(&mut store, &settings, boot_mode);
            }
        } else {
            dispatcher.set_snapshot(InputSnapshot {
                drum: drum_state,
                controller,
            });
            if dispatcher.check_hotkey(now_ms) {
                info!("menu hotkey held, entering menu");
                menu.activate();
                dispatcher.release_all();
            }
        }

        let hit = drum_state.don_left.triggered
            || drum_state.ka_left.triggered
            || drum_state.don_right.triggered
            || drum_state.ka_right.triggered;
        led_config.compare_b = if hit {
            u16::from(settings.led_brightness)
        } else {
            0
        };
        led.set_config(&led_config);

        signal.signal(dispatcher.render(boot_mode));
    }
}

/// Output task - forwards rendered reports to the host.
#[embassy_executor::task]
async fn output_task(
    mut sender: UsbSender<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, Report>,
) {
    // Wait for USB to be ready
    sender.wait_ready().await;
    info!("USB ready, forwarding reports");

    loop {
        let report = signal.wait().await;
        if let Err(e) = sender.send(&report).await {
            error!("USB send failed: {:?}", e);
        }
    }
}

/// Persists changes and performs any restart the menu session asked
/// for.
fn finish_menu_session(store: &mut SettingsFlash, settings: &Settings, boot_mode: OutputMode) {
    match store.persist(settings) {
        Ok(true) => info!("settings saved"),
        Ok(false) => {}
        Err(e) => warn!("saving settings failed: {:?}", e),
    }
    if settings.reboot_scheduled() {
        info!("rebooting into the BOOTSEL loader");
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }
    if settings.output_mode != boot_mode {
        info!("output mode changed, restarting");
        cortex_m::peripheral::SCB::sys_reset();
    }
}
