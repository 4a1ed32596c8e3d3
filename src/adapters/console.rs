//! Debug console adapter.
//!
//! A reader thread takes single bytes from stdin and routes them:
//!
//! ```text
//!  stdin ──▶ decode ──┬── 'A' 'F' 'L' 'D' ──▶ COMMAND_CHANNEL ──▶ ConsoleCommands (CommandPort)
//!                     ├── '1' '2' '3'     ──▶ button IRQ path (GPIO 5 / 6 / 22)
//!                     └── 'm'             ──▶ joystick nudge
//! ```
//!
//! Commands cross threads through a bounded `embassy-sync` channel so the
//! loop can poll without blocking.  When the channel is full the newest
//! command is dropped, like a UART FIFO overrun.

use std::io::Read;
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::app::commands::Command;
use crate::app::ports::CommandPort;
use crate::pins;

/// Depth of the pending-command queue.
pub const COMMAND_DEPTH: usize = 8;

pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, COMMAND_DEPTH>;

/// Console → control loop.
pub static COMMAND_CHANNEL: CommandChannel = Channel::new();

/// A decoded console byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(Command),
    /// Simulated falling edge on this GPIO.
    Press(i32),
    /// Deflect the joystick for one sample.
    Nudge,
}

pub fn decode(byte: u8) -> Option<ConsoleInput> {
    if let Some(cmd) = Command::from_byte(byte) {
        return Some(ConsoleInput::Command(cmd));
    }
    match byte {
        b'1' => Some(ConsoleInput::Press(pins::BUTTON_DOOR_GPIO)),
        b'2' => Some(ConsoleInput::Press(pins::BUTTON_PROXIMITY_GPIO)),
        b'3' => Some(ConsoleInput::Press(pins::BUTTON_ALARM_GPIO)),
        b'm' => Some(ConsoleInput::Nudge),
        _ => None,
    }
}

/// Queue `cmd` for the loop.  Returns `false` if the queue was full.
pub fn submit(channel: &CommandChannel, cmd: Command) -> bool {
    if channel.try_send(cmd).is_err() {
        warn!("console: command queue full, dropped {:?}", cmd);
        return false;
    }
    true
}

/// [`CommandPort`] over a command channel.
pub struct ConsoleCommands<'a> {
    channel: &'a CommandChannel,
}

impl<'a> ConsoleCommands<'a> {
    pub fn new(channel: &'a CommandChannel) -> Self {
        Self { channel }
    }
}

impl CommandPort for ConsoleCommands<'_> {
    fn poll_command(&mut self) -> Option<Command> {
        self.channel.try_receive().ok()
    }
}

/// Spawn the stdin reader.  `route` gets every decoded input; the thread
/// ends when stdin closes.
pub fn spawn_stdin_reader<F>(mut route: F) -> std::io::Result<JoinHandle<()>>
where
    F: FnMut(ConsoleInput) + Send + 'static,
{
    std::thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for byte in std::io::stdin().lock().bytes() {
                match byte {
                    Ok(b) => {
                        if let Some(input) = decode(b) {
                            route(input);
                        }
                    }
                    Err(e) => {
                        warn!("console: read failed: {}", e);
                        break;
                    }
                }
            }
            info!("console: stdin closed");
        })
}
