//! Decoding of a single fixed-width MIDI message.

use crate::{
    event::{ChannelMessage, Message, PitchBend},
    prelude::*,
};

/// The kind of a MIDI message, as selected by the high nibble of its status byte.
///
/// The kind determines which of the semantic accessors on [`MessageView`] apply.
///
/// [`MessageView`]: struct.MessageView.html
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MessageKind {
    /// Stop playing a note. Status `0x8n`.
    NoteOff,
    /// Start playing a note. Status `0x9n`.
    NoteOn,
    /// Change the pressure on a single held note. Status `0xAn`.
    PolyAftertouch,
    /// Modify the value of a MIDI controller. Status `0xBn`.
    ControlChange,
    /// Change the program (instrument) of a channel. Status `0xCn`.
    ProgramChange,
    /// Change the pressure on all notes of a channel. Status `0xDn`.
    ChannelAftertouch,
    /// Bend the pitch of a whole channel. Status `0xEn`.
    PitchWheel,
    /// A System Exclusive (or other system) message. Status `0xFn`.
    ///
    /// These messages carry no channel.
    SystemExclusive,
}
impl MessageKind {
    /// Classify a raw status byte.
    ///
    /// Fails with `InvalidMidiData` if the top bit is not set, since then the byte is a data byte
    /// and not a status byte.
    pub fn from_status(status: u8) -> Result<MessageKind> {
        Ok(match status & 0xF0 {
            0x80 => MessageKind::NoteOff,
            0x90 => MessageKind::NoteOn,
            0xA0 => MessageKind::PolyAftertouch,
            0xB0 => MessageKind::ControlChange,
            0xC0 => MessageKind::ProgramChange,
            0xD0 => MessageKind::ChannelAftertouch,
            0xE0 => MessageKind::PitchWheel,
            0xF0 => MessageKind::SystemExclusive,
            _ => bail!(err_data!("status byte without top bit set")),
        })
    }

    /// The high nibble of the status bytes of this kind.
    #[inline]
    pub fn status_nibble(self) -> u8 {
        match self {
            MessageKind::NoteOff => 0x8,
            MessageKind::NoteOn => 0x9,
            MessageKind::PolyAftertouch => 0xA,
            MessageKind::ControlChange => 0xB,
            MessageKind::ProgramChange => 0xC,
            MessageKind::ChannelAftertouch => 0xD,
            MessageKind::PitchWheel => 0xE,
            MessageKind::SystemExclusive => 0xF,
        }
    }

    /// Whether messages of this kind are addressed to a channel.
    #[inline]
    pub fn is_channel_kind(self) -> bool {
        self != MessageKind::SystemExclusive
    }
}

/// A read-only view over exactly one 3-byte MIDI message: a status byte followed by two data
/// bytes.
///
/// The view borrows its bytes and owns nothing, so it is `Copy` and cannot outlive the buffer it
/// was taken from.
///
/// # Accessors
///
/// The raw accessors (`status`, `data_0` and `data_1`) are always valid.
/// The semantic accessors (`channel`, `note`, `velocity`, ...) only make sense for some message
/// kinds, so check [`kind()`](#method.kind) first.
/// Calling a semantic accessor on a message of the wrong kind is a bug: it panics in debug builds
/// and returns an unspecified value in release builds.
///
/// ```
/// use chrds::{MessageKind, MessageView};
///
/// let bytes: [u8; 3] = [0x91, 60, 100];
/// let msg = MessageView::new(&bytes);
/// assert_eq!(msg.kind(), Ok(MessageKind::NoteOn));
/// assert_eq!(msg.channel(), 1);
/// assert_eq!(msg.note(), 60);
/// assert_eq!(msg.velocity(), 100);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct MessageView<'a, T: ByteSized = u8> {
    /// Always exactly 3 elements long.
    raw: &'a [T],
}
impl<'a, T: ByteSized> MessageView<'a, T> {
    /// Create a view over 3 borrowed elements.
    #[inline]
    pub fn new(raw: &'a [T; 3]) -> MessageView<'a, T> {
        MessageView::from_chunk(&raw[..])
    }

    /// Create a view over a slice, if it is exactly 3 elements long.
    #[inline]
    pub fn from_slice(raw: &'a [T]) -> Option<MessageView<'a, T>> {
        if raw.len() == 3 {
            Some(MessageView::from_chunk(raw))
        } else {
            None
        }
    }

    /// The caller guarantees that `raw` has 3 elements.
    #[inline]
    pub(crate) fn from_chunk(raw: &'a [T]) -> MessageView<'a, T> {
        let () = OneByte::<T>::CHECK;
        debug_assert_eq!(raw.len(), 3, "message views span exactly 3 elements");
        MessageView { raw }
    }

    /// The 3 elements backing this view.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.raw
    }

    /// The status byte.
    #[inline]
    pub fn status(&self) -> T {
        self.raw[0]
    }

    /// The first data byte.
    #[inline]
    pub fn data_0(&self) -> T {
        self.raw[1]
    }

    /// The second data byte.
    #[inline]
    pub fn data_1(&self) -> T {
        self.raw[2]
    }

    /// Classify this message by the high nibble of its status byte.
    ///
    /// Fails with `ErrorKind::InvalidMidiData` if the status byte does not have its top bit set.
    #[inline]
    pub fn kind(&self) -> Result<MessageKind> {
        MessageKind::from_status(self.status().to_u8())
    }

    /// Whether this message is addressed to a channel, ie. it is not a system message.
    #[inline]
    pub fn is_channel_message(&self) -> Result<bool> {
        Ok(self.kind()?.is_channel_kind())
    }

    /// The channel this message is addressed to, in the range `0 ..= 15`.
    ///
    /// Must not be called on `SystemExclusive` messages.
    #[inline]
    pub fn channel(&self) -> u8 {
        debug_assert!(
            matches!(self.kind(), Ok(kind) if kind.is_channel_kind()),
            "channel() called on a message without a channel"
        );
        self.status().to_u8() & 0x0F
    }

    /// The note (key) number.
    ///
    /// Applies to `NoteOff`, `NoteOn` and `PolyAftertouch` messages.
    #[inline]
    pub fn note(&self) -> u8 {
        self.expect_kind(
            &[
                MessageKind::NoteOff,
                MessageKind::NoteOn,
                MessageKind::PolyAftertouch,
            ],
            "note",
        );
        self.data_0().to_u8()
    }

    /// The note velocity.
    ///
    /// Applies to `NoteOff` and `NoteOn` messages.
    #[inline]
    pub fn velocity(&self) -> u8 {
        self.expect_kind(&[MessageKind::NoteOff, MessageKind::NoteOn], "velocity");
        self.data_1().to_u8()
    }

    /// The aftertouch pressure.
    ///
    /// For `PolyAftertouch` this is the first data byte, for `ChannelAftertouch` the second.
    #[inline]
    pub fn pressure(&self) -> u8 {
        match self.kind() {
            Ok(MessageKind::PolyAftertouch) => self.data_0().to_u8(),
            Ok(MessageKind::ChannelAftertouch) => self.data_1().to_u8(),
            _ => {
                debug_assert!(false, "pressure() called on a non-aftertouch message");
                0
            }
        }
    }

    /// The controller number of a `ControlChange` message.
    #[inline]
    pub fn cc_controller(&self) -> u8 {
        self.expect_kind(&[MessageKind::ControlChange], "cc_controller");
        self.data_0().to_u8()
    }

    /// The new controller value of a `ControlChange` message.
    #[inline]
    pub fn cc_value(&self) -> u8 {
        self.expect_kind(&[MessageKind::ControlChange], "cc_value");
        self.data_1().to_u8()
    }

    /// The new program of a `ProgramChange` message.
    #[inline]
    pub fn program_number(&self) -> u8 {
        self.expect_kind(&[MessageKind::ProgramChange], "program_number");
        self.data_0().to_u8()
    }

    /// The raw pitch wheel word of a `PitchWheel` message.
    ///
    /// This is `(data_1 << 8) + data_0` reinterpreted as a signed 16-bit integer, so
    /// `[0xE0, 0x00, 0x40]` yields `0x4000`.
    /// Note that this is *not* the 7+7 bit packing the MIDI standard uses; see
    /// [`pitch_bend()`](#method.pitch_bend) for that.
    ///
    /// Applies to `PitchWheel` messages only, and like the other semantic accessors this is
    /// checked in debug builds.
    #[inline]
    pub fn pitch_wheel(&self) -> i16 {
        self.expect_kind(&[MessageKind::PitchWheel], "pitch_wheel");
        ((self.data_1().to_u16() << 8) + self.data_0().to_u16()) as i16
    }

    /// The 14-bit pitch bend of a `PitchWheel` message, as defined by the MIDI standard.
    ///
    /// The first data byte holds the low 7 bits and the second data byte the high 7 bits.
    #[inline]
    pub fn pitch_bend(&self) -> PitchBend {
        self.expect_kind(&[MessageKind::PitchWheel], "pitch_bend");
        let lsb = (self.data_0().to_u8() & 0x7F) as u16;
        let msb = (self.data_1().to_u8() & 0x7F) as u16;
        PitchBend(u14::new(msb << 7 | lsb))
    }

    /// Decode this message into an owned [`Message`](enum.Message.html).
    ///
    /// Data bytes are truncated to 7 bits, unless the `strict` feature is enabled, in which case
    /// a data byte with its top bit set fails with `ErrorKind::InvalidMidiData`.
    pub fn to_message(&self) -> Result<Message> {
        let kind = self.kind().map_err(|err| {
            log::debug!("rejecting status byte {:#04x}", self.status().to_u8());
            err
        })?;
        let data = [self.data_0().to_u8(), self.data_1().to_u8()];
        let message = match kind {
            MessageKind::SystemExclusive => {
                return Ok(Message::SystemExclusive {
                    status: self.status().to_u8(),
                    data,
                })
            }
            MessageKind::NoteOff => ChannelMessage::NoteOff {
                key: data_u7(data[0])?,
                vel: data_u7(data[1])?,
            },
            MessageKind::NoteOn => ChannelMessage::NoteOn {
                key: data_u7(data[0])?,
                vel: data_u7(data[1])?,
            },
            MessageKind::PolyAftertouch => ChannelMessage::Aftertouch {
                key: data_u7(data[0])?,
                vel: data_u7(data[1])?,
            },
            MessageKind::ControlChange => ChannelMessage::Controller {
                controller: data_u7(data[0])?,
                value: data_u7(data[1])?,
            },
            MessageKind::ProgramChange => ChannelMessage::ProgramChange {
                program: data_u7(data[0])?,
            },
            MessageKind::ChannelAftertouch => ChannelMessage::ChannelAftertouch {
                vel: data_u7(data[1])?,
            },
            MessageKind::PitchWheel => {
                data_u7(data[0])?;
                data_u7(data[1])?;
                ChannelMessage::PitchBend {
                    bend: self.pitch_bend(),
                }
            }
        };
        Ok(Message::Channel {
            channel: u4::new(self.channel()),
            message,
        })
    }

    #[inline]
    fn expect_kind(&self, expected: &[MessageKind], accessor: &'static str) {
        debug_assert!(
            matches!(self.kind(), Ok(kind) if expected.contains(&kind)),
            "{}() called on a message of kind {:?}",
            accessor,
            self.kind()
        );
    }
}
impl<'a, T: ByteSized> From<&'a [T; 3]> for MessageView<'a, T> {
    #[inline]
    fn from(raw: &'a [T; 3]) -> MessageView<'a, T> {
        MessageView::new(raw)
    }
}

fn data_u7(byte: u8) -> Result<u7> {
    if cfg!(feature = "strict") {
        u7::check_int(byte).map_err(|kind| {
            log::debug!("rejecting data byte {:#04x} with top bit set", byte);
            Error::from(kind)
        })
    } else {
        //Throw away the top bit
        Ok(u7::new(byte))
    }
}
