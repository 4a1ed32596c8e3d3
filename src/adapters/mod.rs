//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter            | Implements    | Connects to                   |
//! |--------------------|---------------|-------------------------------|
//! | `config_file`      | ConfigPort    | JSON file on disk             |
//! | `console`          | CommandPort   | stdin reader thread           |
//! | `log_sink`         | EventSink     | `log` facade                  |
//! | `sim_board`        | OutputPin     | logged virtual GPIO           |
//! |                    | JoystickPort  | centred stick + nudge         |
//! | `terminal_display` | DisplayPort   | logged 4-row frame buffer     |
//! | `time`             | ClockPort     | `std::time::Instant`          |
//! |                    | DelayNs       | `thread::sleep`               |

pub mod config_file;
pub mod console;
pub mod log_sink;
pub mod sim_board;
pub mod terminal_display;
pub mod time;
