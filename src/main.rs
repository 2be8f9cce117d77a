//! luxphase firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GPIO ISR ──▶ capture_edge ──▶ mask both, arm debounce timer │
//! │  esp_timer ─▶ validate_and_trigger ──▶ Signal(phase)         │
//! │                                                              │
//! │  listen task (pri 1)         read task (pri 2)               │
//! │   wait ─▶ green window        wait ─▶ 20 × MAX44009 sample   │
//! │   reenable                    reenable                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use luxphase::adapters::hardware::BoardLines;
use luxphase::adapters::log_sink::LogEventSink;
use luxphase::config::SystemConfig;
use luxphase::drivers::button::COORDINATOR;
use luxphase::drivers::indicator::Indicator;
use luxphase::drivers::task_pin::{spawn_on_core, Core};
use luxphase::drivers::{hw_init, hw_timer};
use luxphase::phase::reading::ReadingTiming;
use luxphase::phase::{run_phase_task, ListeningPhase, ReadingPhase};
use luxphase::pins;
use luxphase::sensors::max44009::LuxSensor;
use luxphase::trigger::Phase;

/// Period of the trigger statistics line on the console.
const STATS_PERIOD_MS: u32 = 60_000;

/// Fatal bring-up failure: log and idle forever.
fn halt(what: &str, e: impl core::fmt::Display) -> ! {
    error!("{}: {} — halting", what, e);
    loop {
        FreeRtos::delay_ms(1000);
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    // Console is best-effort; the phases run without it.
    if let Err(e) = esp_idf_logger::init() {
        // No log sink: stdout still reaches the UART.
        println!("luxphase: logger unavailable ({e:?}), running without log output");
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  luxphase v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Starting the MAX44009 sampler");

    // ── 2. Config ─────────────────────────────────────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        halt("config rejected", e);
    }
    info!("Config: {}", serde_json::to_string(&config)?);
    COORDINATOR.configure(config.debounce_params());

    // ── 3. GPIO ───────────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        halt("HAL init failed", e);
    }

    // ── 4. Sensor bus ─────────────────────────────────────────
    let peripherals = match Peripherals::take() {
        Ok(p) => p,
        Err(e) => halt("Error Initializing I2C", e),
    };
    let i2c_config = I2cConfig::new().baudrate(Hertz(config.i2c_baudrate_hz));
    // SDA/SCL must match pins::I2C_SDA_GPIO / pins::I2C_SCL_GPIO.
    let i2c = match I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &i2c_config,
    ) {
        Ok(d) => d,
        Err(e) => halt("Error Initializing I2C", e),
    };
    info!(
        "I2C Initialized! (sda={}, scl={}, {} Hz, addr=0x{:02X})",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        config.i2c_baudrate_hz,
        config.sensor_address
    );

    // ── 5. Debounce timer + button ISRs ───────────────────────
    if let Err(e) = hw_timer::create_debounce_timer() {
        halt("debounce timer", e);
    }
    if let Err(e) = hw_init::init_isr_service() {
        halt("ISR service", e);
    }

    // ── 6. Phase tasks ────────────────────────────────────────
    let listen = ListeningPhase::new(Indicator::green(), FreeRtos, config.listen_window_ms);
    let _listen_task = match spawn_on_core(
        Core::App,
        config.listen_task_priority,
        config.task_stack_kb,
        "listen\0",
        move || {
            run_phase_task(&COORDINATOR, listen, BoardLines, LogEventSink::new());
        },
    ) {
        Ok(h) => h,
        Err(e) => halt("listen task", e),
    };

    let sensor = LuxSensor::with_register(i2c, config.sensor_address, config.lux_register);
    let read = ReadingPhase::new(
        sensor,
        Indicator::red(),
        FreeRtos,
        ReadingTiming::from_config(&config),
    );
    let _read_task = match spawn_on_core(
        Core::App,
        config.read_task_priority,
        config.task_stack_kb,
        "read\0",
        move || {
            run_phase_task(&COORDINATOR, read, BoardLines, LogEventSink::new());
        },
    ) {
        Ok(h) => h,
        Err(e) => halt("read task", e),
    };

    info!("System initialised, waiting for buttons");

    // ── 7. Idle: periodic trigger statistics ──────────────────
    loop {
        FreeRtos::delay_ms(STATS_PERIOD_MS);
        let s = COORDINATOR.stats();
        info!(
            "STATS | edges={} dropped={} spurious={} | listen={}/{} read={}/{} | unmasks={}",
            s.edges_captured,
            s.edges_dropped,
            s.spurious_edges,
            s.consumed[Phase::Listening.index()],
            s.released(Phase::Listening),
            s.consumed[Phase::Reading.index()],
            s.released(Phase::Reading),
            s.unmask_transitions,
        );
    }
}
