use crate::{
    num::{u14, u4, u7},
    ChannelMessage, ErrorKind, Message, MessageKind, MessageView, MessagesView, PitchBend,
};

/// Build a view over a literal message.
macro_rules! msg {
    ($status:expr, $d0:expr, $d1:expr) => {
        MessageView::<u8>::new(&[$status, $d0, $d1])
    };
}

/// A byte-backed enum, standing in for a caller's own byte wrapper.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(transparent)]
struct Byte(u8);
impl From<Byte> for u8 {
    fn from(b: Byte) -> u8 {
        b.0
    }
}
impl From<Byte> for u16 {
    fn from(b: Byte) -> u16 {
        b.0 as u16
    }
}

mod kind {
    use super::*;

    #[test]
    fn every_status_nibble() {
        let table = [
            (0x80, MessageKind::NoteOff),
            (0x90, MessageKind::NoteOn),
            (0xA0, MessageKind::PolyAftertouch),
            (0xB0, MessageKind::ControlChange),
            (0xC0, MessageKind::ProgramChange),
            (0xD0, MessageKind::ChannelAftertouch),
            (0xE0, MessageKind::PitchWheel),
            (0xF0, MessageKind::SystemExclusive),
        ];
        for &(nibble, kind) in table.iter() {
            for low in 0..16u8 {
                let status = nibble | low;
                assert_eq!(msg!(status, 0, 0).kind(), Ok(kind), "status {:#x}", status);
            }
            assert_eq!(kind.status_nibble() << 4, nibble);
        }
    }

    #[test]
    fn data_byte_as_status() {
        for status in 0x00..0x80u8 {
            let err = msg!(status, 0, 0).kind().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidMidiData(""));
            assert_eq!(
                msg!(status, 0, 0).is_channel_message().unwrap_err().kind(),
                ErrorKind::InvalidMidiData("")
            );
        }
    }

    #[test]
    fn channel_kinds() {
        assert_eq!(msg!(0x95, 1, 2).is_channel_message(), Ok(true));
        assert_eq!(msg!(0xF0, 1, 2).is_channel_message(), Ok(false));
        assert!(!MessageKind::SystemExclusive.is_channel_kind());
        assert!(MessageKind::PitchWheel.is_channel_kind());
    }

    #[test]
    fn error_display() {
        let err = msg!(0x12, 0, 0).kind().unwrap_err();
        assert!(format!("{}", err).starts_with("invalid midi data: "));
        let err = MessagesView::new(&[0u8; 4][..]).unwrap_err();
        assert!(format!("{}", err).starts_with("invalid midi data length: "));
        assert_eq!(err.kind().message(), "buffer length is not divisible by 3");
    }
}

mod fields {
    use super::*;

    #[test]
    fn raw_fields() {
        let bytes = [0xF3u8, 0x12, 0xFF];
        let msg = MessageView::new(&bytes);
        assert_eq!(msg.status(), 0xF3);
        assert_eq!(msg.data_0(), 0x12);
        assert_eq!(msg.data_1(), 0xFF);
        assert_eq!(msg.as_slice(), &bytes[..]);
    }

    #[test]
    fn note_on() {
        let msg = msg!(0x91, 60, 100);
        assert_eq!(msg.kind(), Ok(MessageKind::NoteOn));
        assert_eq!(msg.channel(), 1);
        assert_eq!(msg.note(), 60);
        assert_eq!(msg.velocity(), 100);
    }

    #[test]
    fn note_off() {
        let msg = msg!(0x8F, 127, 0);
        assert_eq!(msg.kind(), Ok(MessageKind::NoteOff));
        assert_eq!(msg.channel(), 15);
        assert_eq!(msg.note(), 127);
        assert_eq!(msg.velocity(), 0);
    }

    #[test]
    fn control_change() {
        let msg = msg!(0xB3, 7, 127);
        assert_eq!(msg.channel(), 3);
        assert_eq!(msg.cc_controller(), 7);
        assert_eq!(msg.cc_value(), 127);
    }

    #[test]
    fn program_change() {
        let msg = msg!(0xC9, 42, 0);
        assert_eq!(msg.channel(), 9);
        assert_eq!(msg.program_number(), 42);
    }

    #[test]
    fn aftertouch() {
        let poly = msg!(0xA2, 64, 90);
        assert_eq!(poly.note(), 64);
        assert_eq!(poly.pressure(), 64);

        let channel = msg!(0xD2, 11, 90);
        assert_eq!(channel.channel(), 2);
        assert_eq!(channel.pressure(), 90);
    }

    #[test]
    fn pitch_wheel() {
        assert_eq!(msg!(0xE0, 0x00, 0x40).pitch_wheel(), 0x4000);
        assert_eq!(msg!(0xE0, 0x7F, 0x7F).pitch_wheel(), 0x7F7F);
        assert_eq!(msg!(0xE0, 0x01, 0x80).pitch_wheel(), 0x8001u16 as i16);
        assert_eq!(msg!(0xE0, 0xFF, 0xFF).pitch_wheel(), -1);
    }

    #[test]
    fn pitch_bend() {
        assert_eq!(msg!(0xE0, 0x00, 0x40).pitch_bend(), PitchBend::mid_raw_value());
        assert_eq!(msg!(0xE0, 0x00, 0x00).pitch_bend(), PitchBend::min_raw_value());
        assert_eq!(msg!(0xE0, 0x7F, 0x7F).pitch_bend(), PitchBend::max_raw_value());
        assert_eq!(msg!(0xE0, 0x00, 0x40).pitch_bend().as_int(), 0);
        assert_eq!(msg!(0xE0, 0x01, 0x40).pitch_bend().as_int(), 1);
        assert_eq!(msg!(0xE0, 0x7F, 0x3F).pitch_bend().as_int(), -1);
    }

    #[test]
    fn custom_byte_type() {
        let bytes = [Byte(0x93), Byte(61), Byte(12)];
        let msg = MessageView::new(&bytes);
        assert_eq!(msg.status(), Byte(0x93));
        assert_eq!(msg.kind(), Ok(MessageKind::NoteOn));
        assert_eq!(msg.channel(), 3);
        assert_eq!(msg.note(), 61);
        assert_eq!(msg.velocity(), 12);
    }

    #[test]
    fn from_slice() {
        let bytes = [0x90u8, 1, 2, 3];
        assert!(MessageView::from_slice(&bytes[..]).is_none());
        assert!(MessageView::from_slice(&bytes[..2]).is_none());
        let msg = MessageView::from_slice(&bytes[..3]).unwrap();
        assert_eq!(msg.note(), 1);
        assert_eq!(MessageView::from(&[0x90u8, 1, 2]), msg);
    }
}

/// Calling the wrong accessor is caught by debug assertions.
#[cfg(debug_assertions)]
mod contract {
    use super::*;

    #[test]
    #[should_panic(expected = "channel() called on a message without a channel")]
    fn channel_of_sysex() {
        msg!(0xF0, 0, 0).channel();
    }

    #[test]
    #[should_panic(expected = "channel() called on a message without a channel")]
    fn channel_of_invalid_status() {
        msg!(0x70, 0, 0).channel();
    }

    #[test]
    #[should_panic(expected = "note() called on a message of kind")]
    fn note_of_control_change() {
        msg!(0xB0, 7, 127).note();
    }

    #[test]
    #[should_panic(expected = "velocity() called on a message of kind")]
    fn velocity_of_poly_aftertouch() {
        msg!(0xA0, 60, 10).velocity();
    }

    #[test]
    #[should_panic(expected = "pressure() called on a non-aftertouch message")]
    fn pressure_of_note_on() {
        msg!(0x90, 60, 10).pressure();
    }

    #[test]
    #[should_panic(expected = "cc_value() called on a message of kind")]
    fn cc_value_of_program_change() {
        msg!(0xC0, 1, 0).cc_value();
    }

    #[test]
    #[should_panic(expected = "program_number() called on a message of kind")]
    fn program_of_note_off() {
        msg!(0x80, 1, 0).program_number();
    }

    #[test]
    #[should_panic(expected = "pitch_wheel() called on a message of kind")]
    fn pitch_wheel_of_note_on() {
        msg!(0x90, 0, 0x40).pitch_wheel();
    }
}

mod buffer {
    use super::*;

    #[test]
    fn length_must_divide_by_3() {
        for len in [1, 2, 4, 5, 7, 8, 301].iter() {
            let bytes = vec![0x90u8; *len];
            let err = MessagesView::new(&bytes[..]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidMidiDataLength(""));
        }
        for len in [0, 3, 6, 9, 300].iter() {
            let bytes = vec![0x90u8; *len];
            let view = MessagesView::new(&bytes[..]).unwrap();
            assert_eq!(view.len(), len / 3);
        }
    }

    #[test]
    fn try_from() {
        use core::convert::TryFrom;
        let bytes = [0x90u8, 60, 100];
        assert_eq!(MessagesView::try_from(&bytes[..]).unwrap().len(), 1);
        assert!(MessagesView::try_from(&bytes[..2]).is_err());
    }

    #[test]
    fn empty() {
        let view = MessagesView::<u8>::new(&[]).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(view.get(0).is_none());
        assert!(view.cursor().get().is_none());
        assert_eq!(view.end_cursor() - view.cursor(), 0);
    }

    #[test]
    fn lazy_construction() {
        // Invalid status bytes are only reported once a message is classified
        let bytes = [0x90u8, 60, 100, 0x3C, 0, 0];
        let view = MessagesView::new(&bytes[..]).unwrap();
        assert_eq!(view.get(0).unwrap().kind(), Ok(MessageKind::NoteOn));
        assert!(view.get(1).unwrap().kind().is_err());
    }

    #[test]
    fn message_windows() {
        let bytes = (0..30u8).map(|b| b | 0x80).collect::<Vec<_>>();
        let view = MessagesView::new(&bytes[..]).unwrap();
        assert_eq!(view.iter().len(), 10);
        for (i, msg) in view.iter().enumerate() {
            assert_eq!(msg.as_slice(), &bytes[3 * i..3 * i + 3]);
            assert_eq!(view.get(i), Some(msg));
        }
        assert!(view.get(10).is_none());
        assert!(view.get(usize::max_value()).is_none());
    }

    #[test]
    fn reverse_iteration() {
        let bytes = [0x90u8, 1, 0, 0x90, 2, 0, 0x90, 3, 0];
        let view = MessagesView::new(&bytes[..]).unwrap();
        let notes = view.iter().rev().map(|msg| msg.note()).collect::<Vec<_>>();
        assert_eq!(notes, [3, 2, 1]);

        let mut iter = view.iter();
        assert_eq!(iter.next().map(|m| m.note()), Some(1));
        assert_eq!(iter.next_back().map(|m| m.note()), Some(3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().map(|m| m.note()), Some(2));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn skipping() {
        let bytes = (0..15u8).map(|b| b | 0x90).collect::<Vec<_>>();
        let view = MessagesView::new(&bytes[..]).unwrap();
        assert_eq!(view.iter().nth(3), view.get(3));
        assert_eq!(view.iter().nth_back(1), view.get(3));
        assert_eq!(view.iter().last(), view.get(4));
        assert!(view.iter().nth(5).is_none());
    }

    #[test]
    fn restartable() {
        let bytes = [0xB0u8, 1, 2, 0xB1, 3, 4];
        let view = MessagesView::new(&bytes[..]).unwrap();
        let first = view.iter().collect::<Vec<_>>();
        let second = (&view).into_iter().collect::<Vec<_>>();
        let third = view.into_iter().collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn custom_byte_buffer() {
        let bytes = [Byte(0xC4), Byte(5), Byte(0), Byte(0xB4), Byte(1), Byte(2)];
        let view = MessagesView::new(&bytes[..]).unwrap();
        let programs = view
            .iter()
            .filter(|msg| msg.kind() == Ok(MessageKind::ProgramChange))
            .map(|msg| msg.program_number())
            .collect::<Vec<_>>();
        assert_eq!(programs, [5]);
    }

    #[test]
    fn restricted_int_buffer() {
        // Data bytes only, so every status is invalid, but the view itself is fine
        let bytes = [u7::new(0x10), u7::new(0x20), u7::new(0x30)];
        let view = MessagesView::new(&bytes[..]).unwrap();
        let msg = view.get(0).unwrap();
        assert_eq!(msg.data_1(), u7::new(0x30));
        assert!(msg.kind().is_err());
    }
}

mod cursor {
    use super::*;

    fn notes() -> Vec<u8> {
        (0..8u8).flat_map(|n| vec![0x90, n, 100]).collect()
    }

    #[test]
    fn step_and_deref() {
        let bytes = notes();
        let view = MessagesView::new(&bytes[..]).unwrap();
        let mut cursor = view.cursor();
        for i in 0..8 {
            assert_eq!(cursor.index(), i as isize);
            assert_eq!(cursor.get(), view.get(i));
            assert_eq!(view.cursor_at(i).get(), cursor.get());
            cursor.inc();
        }
        assert!(cursor.get().is_none());
        assert_eq!(cursor, view.end_cursor());
        cursor.dec().dec();
        assert_eq!(cursor.get().unwrap().note(), 6);
    }

    #[test]
    fn arithmetic() {
        let bytes = notes();
        let view = MessagesView::new(&bytes[..]).unwrap();
        let begin = view.cursor();
        let end = view.end_cursor();
        assert_eq!(end - begin, 8);
        assert_eq!(begin - end, -8);
        assert_eq!((begin + 5).get().unwrap().note(), 5);
        assert_eq!((5isize + begin).get().unwrap().note(), 5);
        assert_eq!((end - 1isize).get().unwrap().note(), 7);
        assert_eq!(view.cursor_at(6) - view.cursor_at(2), 4);

        let mut cursor = begin;
        cursor += 3;
        cursor -= 1;
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.at(0).unwrap().note(), 2);
        assert_eq!(cursor.at(4).unwrap().note(), 6);
        assert_eq!(cursor.at(-2).unwrap().note(), 0);
        assert!(cursor.at(-3).is_none());
        assert!(cursor.at(6).is_none());
    }

    #[test]
    fn ordering() {
        let bytes = notes();
        let view = MessagesView::new(&bytes[..]).unwrap();
        let a = view.cursor_at(1);
        let b = view.cursor_at(4);
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert_eq!(a.max(b), b);
        assert_ne!(a, b);
        assert_eq!(a + 3, b);
    }

    #[test]
    fn saturates_far_out_of_range() {
        let bytes = [0x90u8, 60, 100];
        let view = MessagesView::new(&bytes[..]).unwrap();

        let mut far = view.cursor_at(usize::max_value());
        assert_eq!(far.index(), isize::max_value());
        far.inc();
        assert_eq!(far.index(), isize::max_value());
        assert!(far.get().is_none());
        far += isize::max_value();
        assert_eq!(far.index(), isize::max_value());

        let mut near = view.cursor();
        near -= isize::max_value();
        near.dec().dec();
        assert_eq!(near.index(), isize::min_value());
        assert!(near.get().is_none());
        assert_eq!(far - near, isize::max_value());
        assert_eq!(near - far, isize::min_value());

        assert!(view.end_cursor().at(isize::max_value()).is_none());
        assert!(view.cursor().at(isize::min_value()).is_none());
        assert_eq!(view.cursor().at(0).unwrap().note(), 60);
    }

    #[test]
    fn agrees_with_iteration() {
        let bytes = notes();
        let view = MessagesView::new(&bytes[..]).unwrap();
        for (i, msg) in view.iter().enumerate() {
            let mut cursor = view.cursor();
            for _ in 0..i {
                cursor.inc();
            }
            assert_eq!(cursor.get(), Some(msg));
            assert_eq!(view.cursor().at(i as isize), Some(msg));
        }
    }
}

#[cfg(debug_assertions)]
mod cursor_contract {
    use super::*;

    #[test]
    #[should_panic(expected = "cursors over different buffers cannot be compared")]
    fn compare_across_buffers() {
        let a = [0x90u8, 60, 100];
        let b = [0x90u8, 64, 100];
        let a = MessagesView::new(&a[..]).unwrap();
        let b = MessagesView::new(&b[..]).unwrap();
        let _ = a.cursor() == b.cursor();
    }

    #[test]
    #[should_panic(expected = "cursors over different buffers cannot be compared")]
    fn distance_across_buffers() {
        let a = [0x90u8, 60, 100];
        let b = [0x80u8, 60, 0];
        let a = MessagesView::new(&a[..]).unwrap();
        let b = MessagesView::new(&b[..]).unwrap();
        let _ = a.end_cursor() - b.cursor();
    }
}

mod owned {
    use super::*;

    #[test]
    fn decode_channel_messages() {
        use crate::ChannelMessage::*;
        let list: &[([u8; 3], ChannelMessage)] = &[
            (
                [0x80, 60, 0],
                NoteOff {
                    key: u7::new(60),
                    vel: u7::new(0),
                },
            ),
            (
                [0x90, 60, 100],
                NoteOn {
                    key: u7::new(60),
                    vel: u7::new(100),
                },
            ),
            (
                [0xA0, 60, 30],
                Aftertouch {
                    key: u7::new(60),
                    vel: u7::new(30),
                },
            ),
            (
                [0xB0, 7, 127],
                Controller {
                    controller: u7::new(7),
                    value: u7::new(127),
                },
            ),
            (
                [0xC0, 42, 0],
                ProgramChange {
                    program: u7::new(42),
                },
            ),
            ([0xD0, 0, 90], ChannelAftertouch { vel: u7::new(90) }),
            (
                [0xE0, 0x00, 0x40],
                PitchBend {
                    bend: crate::PitchBend(u14::new(0x2000)),
                },
            ),
        ];
        for (raw, message) in list {
            let decoded = MessageView::new(raw).to_message().unwrap();
            assert_eq!(
                decoded,
                Message::Channel {
                    channel: u4::new(0),
                    message: *message,
                }
            );
            assert_eq!(decoded.kind(), MessageView::new(raw).kind().unwrap());
            assert_eq!(&decoded.encode(), raw);
        }
    }

    #[test]
    fn decode_sysex() {
        let decoded = msg!(0xF7, 1, 2).to_message().unwrap();
        assert_eq!(
            decoded,
            Message::SystemExclusive {
                status: 0xF7,
                data: [1, 2],
            }
        );
        assert_eq!(decoded.kind(), MessageKind::SystemExclusive);
        assert_eq!(decoded.encode(), [0xF7, 1, 2]);
    }

    #[test]
    fn decode_invalid_status() {
        let err = msg!(0x00, 1, 2).to_message().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMidiData(""));
    }

    #[test]
    fn channel_is_kept() {
        let decoded = msg!(0x9E, 1, 2).to_message().unwrap();
        match decoded {
            Message::Channel { channel, .. } => assert_eq!(channel, u4::new(14)),
            _ => panic!("expected a channel message"),
        }
        assert_eq!(decoded.encode(), [0x9E, 1, 2]);
    }

    #[test]
    #[cfg(not(feature = "strict"))]
    fn data_bytes_are_truncated() {
        let decoded = msg!(0x90, 0xBC, 0xFF).to_message().unwrap();
        assert_eq!(decoded.encode(), [0x90, 0x3C, 0x7F]);
    }

    #[test]
    #[cfg(feature = "strict")]
    fn data_bytes_are_checked() {
        let err = msg!(0x90, 0xBC, 0x10).to_message().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMidiData(""));
        // Unused data bytes are not checked
        assert!(msg!(0xC0, 0x10, 0xFF).to_message().is_ok());
    }

    #[test]
    fn pitch_bend_conversions() {
        assert_eq!(PitchBend::from_int(0), PitchBend::mid_raw_value());
        assert_eq!(PitchBend::from_int(i16::min_value()), PitchBend::min_raw_value());
        assert_eq!(PitchBend::from_int(i16::max_value()), PitchBend::max_raw_value());
        assert_eq!(PitchBend::from_int(0x1000).as_int(), 0x1000);
        assert_eq!(PitchBend::max_raw_value().as_int(), 0x1FFF);
        assert_eq!(PitchBend::min_raw_value().as_int(), -0x2000);

        let message = Message::Channel {
            channel: u4::new(2),
            message: ChannelMessage::PitchBend {
                bend: PitchBend::from_int(-0x2000 + 0x81),
            },
        };
        let raw = message.encode();
        assert_eq!(raw, [0xE2, 0x01, 0x01]);
        assert_eq!(MessageView::new(&raw).to_message().unwrap(), message);
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn collect_messages() {
        let bytes = [0x90u8, 60, 100, 0xB3, 7, 127];
        let view = MessagesView::new(&bytes[..]).unwrap();
        let messages = view.collect_messages().unwrap();
        assert_eq!(messages.len(), 2);
        let reencoded = messages
            .iter()
            .flat_map(|msg| msg.encode().to_vec())
            .collect::<Vec<_>>();
        assert_eq!(reencoded, bytes);

        let bytes = [0x90u8, 60, 100, 0x40, 7, 127];
        let view = MessagesView::new(&bytes[..]).unwrap();
        assert!(view.collect_messages().is_err());
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn par_iter_matches_iter() {
        let bytes = (0..3000u32)
            .map(|i| if i % 3 == 0 { 0x90 | (i % 16) as u8 } else { (i % 128) as u8 })
            .collect::<Vec<_>>();
        let view = MessagesView::new(&bytes[..]).unwrap();
        assert_eq!(view.par_iter().len(), 1000);
        let sequential = view.iter().map(|msg| msg.note() as u64).sum::<u64>();
        let parallel = view.par_iter().map(|msg| msg.note() as u64).sum::<u64>();
        assert_eq!(sequential, parallel);
        let collected = view.par_iter().collect::<Vec<_>>();
        assert_eq!(collected, view.iter().collect::<Vec<_>>());
    }
}
