//! Mock adapters for integration tests.
//!
//! Records every output call so tests can assert on the full history
//! without real GPIO or an OLED attached.

use std::collections::VecDeque;

use doorguard::app::commands::Command;
use doorguard::app::events::AppEvent;
use doorguard::app::panel::{Panel, SharedPanel};
use doorguard::app::ports::{
    Axis, CommandPort, DisplayPort, EventSink, IndicatorPort, JoystickPort,
};
use doorguard::app::service::AppService;
use doorguard::config::SystemConfig;
use doorguard::fsm::Led;

// ── Indicator call record ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCall {
    Led(Led, bool),
    Buzzer(bool),
}

#[derive(Default)]
pub struct MockIndicators {
    pub calls: Vec<IndicatorCall>,
}

#[allow(dead_code)]
impl MockIndicators {
    /// Last level written to `led` (low if never written).
    pub fn led(&self, led: Led) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                IndicatorCall::Led(l, on) if l == led => Some(on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                IndicatorCall::Buzzer(on) => Some(on),
                IndicatorCall::Led(..) => None,
            })
            .unwrap_or(false)
    }

    /// Number of high writes to the buzzer.
    pub fn buzzer_rises(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == IndicatorCall::Buzzer(true))
            .count()
    }
}

impl IndicatorPort for MockIndicators {
    fn set_led(&mut self, led: Led, on: bool) {
        self.calls.push(IndicatorCall::Led(led, on));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(IndicatorCall::Buzzer(on));
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    buffer: Vec<(u8, String)>,
    /// Every flushed frame, oldest first.
    pub frames: Vec<Vec<(u8, String)>>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn flushes(&self) -> usize {
        self.frames.len()
    }

    /// Texts of the most recent frame, top to bottom.
    pub fn last_frame(&self) -> Vec<String> {
        self.frames
            .last()
            .map(|f| f.iter().map(|(_, t)| t.clone()).collect())
            .unwrap_or_default()
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn draw_line(&mut self, text: &str, row: u8) {
        self.buffer.push((row, text.to_owned()));
    }

    fn flush(&mut self) {
        self.frames.push(self.buffer.clone());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Scripted inputs ───────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedCommands(pub VecDeque<Command>);

#[allow(dead_code)]
impl ScriptedCommands {
    pub fn push(&mut self, cmd: Command) {
        self.0.push_back(cmd);
    }
}

impl CommandPort for ScriptedCommands {
    fn poll_command(&mut self) -> Option<Command> {
        self.0.pop_front()
    }
}

pub const REST: (u16, u16) = (1975, 2100);

/// Replays queued (x, y) frames, then rests at the centre.
#[derive(Default)]
pub struct ScriptedJoystick {
    pub frames: VecDeque<(u16, u16)>,
    current: (u16, u16),
    pub samples: usize,
}

#[allow(dead_code)]
impl ScriptedJoystick {
    pub fn push(&mut self, x: u16, y: u16) {
        self.frames.push_back((x, y));
    }
}

impl JoystickPort for ScriptedJoystick {
    fn sample_axis(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => {
                self.samples += 1;
                self.current = self.frames.pop_front().unwrap_or(REST);
                self.current.0
            }
            Axis::Y => self.current.1,
        }
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub type TestPanel = SharedPanel<MockIndicators, MockDisplay, RecordingSink>;

/// A started panel with default config.
pub fn started_panel() -> TestPanel {
    started_panel_with(&SystemConfig::default())
}

pub fn started_panel_with(config: &SystemConfig) -> TestPanel {
    let panel = SharedPanel::new(
        Panel::new(
            AppService::new(config),
            MockIndicators::default(),
            MockDisplay::default(),
            RecordingSink::default(),
        ),
        config.debounce_ms,
    );
    panel.with(|p| p.start());
    panel
}
