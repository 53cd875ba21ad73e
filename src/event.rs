//! Owned, decoded forms of MIDI messages.
//!
//! A [`MessageView`](../struct.MessageView.html) reads its fields out of a borrowed buffer on
//! every access.
//! When a message must outlive its buffer, decode it into a [`Message`] with
//! `MessageView::to_message`, and turn it back into bytes with `Message::encode`.

use crate::{message::MessageKind, prelude::*};

/// A decoded 3-byte MIDI message that owns its data.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Message {
    /// A message associated with a channel, carrying musical data.
    ///
    /// Status byte in the range `0x80 ..= 0xEF`.
    Channel {
        /// The MIDI channel that this message is associated with.
        channel: u4,
        /// The MIDI message type and associated data.
        message: ChannelMessage,
    },
    /// A system message, stored verbatim.
    ///
    /// Status byte in the range `0xF0 ..= 0xFF`.
    /// Only the two bytes that fit in the fixed 3-byte framing are kept; real System Exclusive
    /// dumps are longer, and are not supported.
    SystemExclusive {
        /// The full status byte.
        status: u8,
        /// The two raw data bytes.
        data: [u8; 2],
    },
}
impl Message {
    /// The kind of this message.
    #[inline]
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Channel { message, .. } => message.kind(),
            Message::SystemExclusive { .. } => MessageKind::SystemExclusive,
        }
    }

    /// Encode this message into the fixed 3-byte framing read by `MessageView`.
    ///
    /// Messages with a single data byte leave the unused byte as `0`.
    pub fn encode(&self) -> [u8; 3] {
        match self {
            Message::Channel { channel, message } => {
                let status = message.kind().status_nibble() << 4 | channel.as_int();
                let [data_0, data_1] = message.data();
                [status, data_0, data_1]
            }
            Message::SystemExclusive { status, data } => [*status, data[0], data[1]],
        }
    }
}

/// Represents a MIDI message associated to a MIDI channel.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChannelMessage {
    /// Stop playing a note.
    NoteOff {
        /// The MIDI key to stop playing.
        key: u7,
        /// The velocity with which to stop playing it.
        vel: u7,
    },
    /// Start playing a note.
    NoteOn {
        /// The key to start playing.
        key: u7,
        /// The velocity (strength) with which to press it.
        ///
        /// Note that by convention a `NoteOn` message with a velocity of 0 is equivalent to a
        /// `NoteOff`.
        vel: u7,
    },
    /// Modify the velocity of a note after it has been played.
    Aftertouch {
        /// The key for which to modify its velocity.
        key: u7,
        /// The new velocity for the key.
        vel: u7,
    },
    /// Modify the value of a MIDI controller.
    Controller {
        /// The controller to modify.
        ///
        /// See the MIDI spec for the meaning of each index.
        controller: u7,
        /// The value to set it to.
        value: u7,
    },
    /// Change the program (also known as instrument) for a channel.
    ProgramChange {
        /// The new program (instrument) to use for the channel.
        program: u7,
    },
    /// Change the note velocity of a whole channel at once, without starting new notes.
    ///
    /// In the 3-byte framing the velocity lives in the second data byte.
    ChannelAftertouch {
        /// The new velocity for all notes currently playing in the channel.
        vel: u7,
    },
    /// Set the pitch bend value for the entire channel.
    PitchBend {
        /// The new pitch-bend value.
        bend: PitchBend,
    },
}
impl ChannelMessage {
    /// The kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            ChannelMessage::NoteOff { .. } => MessageKind::NoteOff,
            ChannelMessage::NoteOn { .. } => MessageKind::NoteOn,
            ChannelMessage::Aftertouch { .. } => MessageKind::PolyAftertouch,
            ChannelMessage::Controller { .. } => MessageKind::ControlChange,
            ChannelMessage::ProgramChange { .. } => MessageKind::ProgramChange,
            ChannelMessage::ChannelAftertouch { .. } => MessageKind::ChannelAftertouch,
            ChannelMessage::PitchBend { .. } => MessageKind::PitchWheel,
        }
    }

    /// The two data bytes, laid out as `MessageView` reads them.
    fn data(&self) -> [u8; 2] {
        match self {
            ChannelMessage::NoteOff { key, vel } => [key.as_int(), vel.as_int()],
            ChannelMessage::NoteOn { key, vel } => [key.as_int(), vel.as_int()],
            ChannelMessage::Aftertouch { key, vel } => [key.as_int(), vel.as_int()],
            ChannelMessage::Controller { controller, value } => {
                [controller.as_int(), value.as_int()]
            }
            ChannelMessage::ProgramChange { program } => [program.as_int(), 0],
            ChannelMessage::ChannelAftertouch { vel } => [0, vel.as_int()],
            ChannelMessage::PitchBend { bend } => {
                //Note the little-endian order
                let raw = bend.0.as_int();
                [(raw & 0x7F) as u8, (raw >> 7) as u8]
            }
        }
    }
}

/// A 14-bit pitch bend, as carried by `PitchWheel` messages.
///
/// The raw value runs from `0x0000` (full bend down) through `0x2000` (centered) up to `0x3FFF`
/// (full bend up).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct PitchBend(pub u14);
impl PitchBend {
    /// Full bend down.
    #[inline]
    pub const fn min_raw_value() -> PitchBend {
        PitchBend(u14::new(0x0000))
    }

    /// No bend.
    #[inline]
    pub const fn mid_raw_value() -> PitchBend {
        PitchBend(u14::new(0x2000))
    }

    /// Full bend up.
    #[inline]
    pub const fn max_raw_value() -> PitchBend {
        PitchBend(u14::new(0x3FFF))
    }

    /// Build a bend from an offset around the center, clamped to `-0x2000 ..= 0x1FFF`.
    #[inline]
    pub fn from_int(int: i16) -> PitchBend {
        let centered = int.max(-0x2000).min(0x1FFF) + 0x2000;
        PitchBend(u14::new(centered as u16))
    }

    /// The offset of this bend around the center, in `-0x2000 ..= 0x1FFF`.
    #[inline]
    pub fn as_int(self) -> i16 {
        self.0.as_int() as i16 - 0x2000
    }
}
