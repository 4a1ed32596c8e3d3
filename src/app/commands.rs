//! Inbound commands from the debug / remote-control channel.
//!
//! Single-character intake: the coordinator polls the
//! [`CommandPort`](super::ports::CommandPort) once per loop iteration and
//! hands at most one decoded [`Command`] to the state machine.

/// Operator overrides accepted on the debug channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `A`: open the door, only if the owner is near.
    Open,
    /// `F`: close the door unconditionally.
    ForceClose,
    /// `L`: arm the alarm and sound the buzzer.
    ArmAlarm,
    /// `D`: disarm the alarm and silence the buzzer.
    DisarmAlarm,
}

impl Command {
    /// Decode one byte from the channel.  Unrecognised bytes (including
    /// lowercase letters) are ignored.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Self::Open),
            b'F' => Some(Self::ForceClose),
            b'L' => Some(Self::ArmAlarm),
            b'D' => Some(Self::DisarmAlarm),
            _ => None,
        }
    }

    /// The byte this command is sent as.
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Open => b'A',
            Self::ForceClose => b'F',
            Self::ArmAlarm => b'L',
            Self::DisarmAlarm => b'D',
        }
    }
}
