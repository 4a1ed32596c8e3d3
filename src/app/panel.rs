//! The panel aggregate and its interrupt-safe wrapper.
//!
//! [`Panel`] bundles the [`AppService`] with the three output adapters it
//! drives.  Two contexts mutate it:
//!
//! ```text
//!  GPIO IRQ ──▶ SharedPanel::on_gpio_irq ─┐
//!                                         ├──▶ Mutex<CriticalSection, RefCell<Panel>>
//!  Coordinator::step ──▶ SharedPanel::with ┘
//! ```
//!
//! Both go through [`SharedPanel`], an `embassy-sync` blocking mutex over a
//! critical section.  A whole transition (state change, LED writes, display
//! render) runs inside one critical section, so neither side ever observes
//! a half-applied event.  Keep closures short: never sleep inside `with`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::debug;

use crate::drivers::button::ButtonInput;
use crate::fsm::{SecurityEvent, SecurityState};

use super::events::AppEvent;
use super::ports::{DisplayPort, EventSink, IndicatorPort};
use super::service::AppService;

/// Service plus the adapters it writes to.
pub struct Panel<H, D, S> {
    pub service: AppService,
    pub hw: H,
    pub display: D,
    pub sink: S,
}

impl<H, D, S> Panel<H, D, S>
where
    H: IndicatorPort,
    D: DisplayPort,
    S: EventSink,
{
    pub fn new(service: AppService, hw: H, display: D, sink: S) -> Self {
        Self {
            service,
            hw,
            display,
            sink,
        }
    }

    /// Outputs low, boot frame, `Started`.
    pub fn start(&mut self) {
        self.service
            .start(&mut self.hw, &mut self.display, &mut self.sink);
    }

    /// Apply one event; `true` if it changed anything.
    pub fn dispatch(&mut self, event: SecurityEvent) -> bool {
        self.service
            .handle(event, &mut self.hw, &mut self.display, &mut self.sink)
    }

    pub fn emit(&mut self, event: &AppEvent) {
        self.sink.emit(event);
    }

    pub fn state(&self) -> SecurityState {
        self.service.state()
    }
}

// ───────────────────────────────────────────────────────────────
// SharedPanel
// ───────────────────────────────────────────────────────────────

/// [`Panel`] behind a critical-section mutex, plus the button decoder that
/// feeds it from interrupt context.
pub struct SharedPanel<H, D, S> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Panel<H, D, S>>>,
    buttons: ButtonInput,
}

impl<H, D, S> SharedPanel<H, D, S>
where
    H: IndicatorPort,
    D: DisplayPort,
    S: EventSink,
{
    pub fn new(panel: Panel<H, D, S>, debounce_ms: u32) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(panel)),
            buttons: ButtonInput::new(debounce_ms),
        }
    }

    /// Run `f` with exclusive access to the panel.
    ///
    /// `f` must not call back into this `SharedPanel`.
    pub fn with<R>(&self, f: impl FnOnce(&mut Panel<H, D, S>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn dispatch(&self, event: SecurityEvent) -> bool {
        self.with(|panel| panel.dispatch(event))
    }

    pub fn state(&self) -> SecurityState {
        self.with(|panel| panel.state())
    }

    /// Falling-edge interrupt shared by every button line.
    ///
    /// Runs to completion: debounce, decode, transition, render.  Returns
    /// `true` if the edge changed the panel.
    pub fn on_gpio_irq(&self, gpio: i32, pin_low: bool, now_ms: u32) -> bool {
        let Some(edge) = self.buttons.on_falling_edge(gpio, pin_low, now_ms) else {
            return false;
        };
        debug!("{:?} pressed at {} ms", edge.button, edge.at_ms);
        self.dispatch(edge.event().into())
    }
}
