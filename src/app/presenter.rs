//! Display presenter: renders [`SecurityState`] as fixed text rows.
//!
//! | Row | Shown when          | Text                          |
//! |-----|---------------------|-------------------------------|
//! | 0   | always              | `Door Open` / `Door Closed`   |
//! | 1   | always              | `Owner Near` / `Owner Far`    |
//! | 2   | `motion_detected`   | `Motion`                      |
//! | 3   | `alarm_active`      | `Alarm Active!`               |
//!
//! Conditional rows are omitted, not blanked: the whole frame is cleared
//! first, so an absent row simply stays empty.

use super::ports::DisplayPort;
use crate::fsm::SecurityState;

pub const ROW_DOOR: u8 = 0;
pub const ROW_OWNER: u8 = 1;
pub const ROW_MOTION: u8 = 2;
pub const ROW_ALARM: u8 = 3;

/// One drawn row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub row: u8,
    pub text: &'static str,
}

/// The rows a frame for `state` contains, top to bottom.
pub fn lines(state: &SecurityState) -> heapless::Vec<Line, 4> {
    let mut out = heapless::Vec::new();
    let door = if state.door_open { "Door Open" } else { "Door Closed" };
    let owner = if state.owner_near { "Owner Near" } else { "Owner Far" };

    push(&mut out, ROW_DOOR, door);
    push(&mut out, ROW_OWNER, owner);
    if state.motion_detected {
        push(&mut out, ROW_MOTION, "Motion");
    }
    if state.alarm_active {
        push(&mut out, ROW_ALARM, "Alarm Active!");
    }
    out
}

fn push(out: &mut heapless::Vec<Line, 4>, row: u8, text: &'static str) {
    if out.push(Line { row, text }).is_err() {
        debug_assert!(false, "frame overflow at row {row}: {text}");
    }
}

/// Clear, draw, flush.  Synchronous: the frame is on the panel on return.
pub fn render(state: &SecurityState, display: &mut impl DisplayPort) {
    display.clear();
    for line in lines(state) {
        display.draw_line(line.text, line.row);
    }
    display.flush();
}
