//! Fuzz target: console byte decoding
//!
//! Feeds arbitrary bytes through the console decoder and checks that only
//! the documented keys decode, and that command bytes round-trip.
//!
//! cargo fuzz run fuzz_console_decoder

#![no_main]

use doorguard::adapters::console::{ConsoleInput, decode};
use doorguard::app::commands::Command;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for &byte in data {
        match decode(byte) {
            Some(ConsoleInput::Command(cmd)) => assert_eq!(cmd.as_byte(), byte),
            Some(ConsoleInput::Press(gpio)) => assert!(matches!(gpio, 5 | 6 | 22)),
            Some(ConsoleInput::Nudge) => assert_eq!(byte, b'm'),
            None => assert!(Command::from_byte(byte).is_none()),
        }
    }
});
