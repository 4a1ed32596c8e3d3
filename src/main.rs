//! DoorGuard panel — host simulator entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  IndicatorBank<SimPin>  TerminalDisplay  LogEventSink          │
//! │  (IndicatorPort)        (DisplayPort)    (EventSink)           │
//! │  ConsoleCommands        SimJoystick      StdClock / StdDelay   │
//! │  (CommandPort)          (JoystickPort)   (ClockPort / DelayNs) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   SharedPanel ◀── console thread (button "IRQs")       │    │
//! │  │     AppService (pure logic) · FSM · presenter          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Coordinator (phase machine: poll · motion hold · buzzer)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Console keys: `1` door button, `2` owner button, `3` alarm button,
//! `m` joystick nudge, `A`/`F`/`L`/`D` debug commands.

use std::sync::Arc;

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use doorguard::adapters::config_file::JsonConfigFile;
use doorguard::adapters::console::{self, COMMAND_CHANNEL, ConsoleCommands, ConsoleInput};
use doorguard::adapters::log_sink::LogEventSink;
use doorguard::adapters::sim_board::{SimJoystick, SimPin};
use doorguard::adapters::terminal_display::TerminalDisplay;
use doorguard::adapters::time::{StdClock, StdDelay};
use doorguard::app::panel::{Panel, SharedPanel};
use doorguard::app::ports::{ClockPort, ConfigError, ConfigPort};
use doorguard::app::service::AppService;
use doorguard::config::SystemConfig;
use doorguard::coordinator::Coordinator;
use doorguard::drivers::indicator::IndicatorBank;
use doorguard::{Error, pins};

/// `RUST_LOG` wins; otherwise the configured filter.
fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    // ── 1. Config + logging ───────────────────────────────────
    let config_file = JsonConfigFile::from_env();
    let loaded = config_file.load();
    let config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => SystemConfig::default(),
    };
    init_logging(&config.log_filter);

    info!("╔══════════════════════════════════════╗");
    info!("║  DoorGuard v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    match loaded {
        Ok(_) => info!("Config loaded from {}", config_file.path().display()),
        Err(ConfigError::NotFound) => {
            warn!("No config at {}, using defaults", config_file.path().display());
        }
        Err(e) => return Err(Error::Config(e).into()),
    }

    // ── 2. Boot settle ────────────────────────────────────────
    let mut delay = StdDelay;
    delay.delay_ms(config.boot_settle_ms);

    // ── 3. Outputs low, boot frame ────────────────────────────
    let hw = IndicatorBank::new(
        SimPin::new("led_door", pins::LED_DOOR_GPIO),
        SimPin::new("led_motion", pins::LED_MOTION_GPIO),
        SimPin::new("led_alarm", pins::LED_ALARM_GPIO),
        SimPin::quiet("buzzer", pins::BUZZER_GPIO),
    );
    let panel = Arc::new(SharedPanel::new(
        Panel::new(
            AppService::new(&config),
            hw,
            TerminalDisplay::new(),
            LogEventSink::new(),
        ),
        config.debounce_ms,
    ));
    panel.with(|p| p.start());

    // ── 4. Enable inputs ──────────────────────────────────────
    let clock = StdClock::new();
    let mut joystick = SimJoystick::new();
    let nudger = joystick.nudger();
    let irq_panel = Arc::clone(&panel);
    let _console = console::spawn_stdin_reader(move |input| match input {
        ConsoleInput::Command(cmd) => {
            console::submit(&COMMAND_CHANNEL, cmd);
        }
        ConsoleInput::Press(gpio) => {
            irq_panel.on_gpio_irq(gpio, true, clock.now_ms());
        }
        ConsoleInput::Nudge => nudger.nudge(),
    })
    .map_err(|_| Error::Init("console reader thread"))?;
    info!("Keys: 1 door, 2 owner, 3 alarm, m motion, A/F/L/D commands");

    // ── 5. Loop forever ───────────────────────────────────────
    let mut commands = ConsoleCommands::new(&COMMAND_CHANNEL);
    let mut coordinator = Coordinator::new(&config);
    coordinator.run(&clock, &mut delay, panel.as_ref(), &mut commands, &mut joystick)
}
