//! # Overview
//!
//! `chrds` decodes buffers of raw MIDI channel messages into typed views, without copying and
//! without allocating.
//!
//! It is meant to sit between whatever produces the bytes (a file reader, a network receiver, a
//! driver) and whatever consumes the messages (a synthesizer, a router, a recorder).
//!
//! Usage is as simple as:
//!
//! ```rust
//! use chrds::{MessageKind, MessagesView};
//!
//! let bytes: &[u8] = &[0x91, 60, 100, 0xB3, 7, 127];
//! let messages = MessagesView::new(bytes).unwrap();
//!
//! for msg in &messages {
//!     match msg.kind().unwrap() {
//!         MessageKind::NoteOn => println!("note {} on channel {}", msg.note(), msg.channel()),
//!         MessageKind::ControlChange => println!("cc {} = {}", msg.cc_controller(), msg.cc_value()),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! The [`MessagesView`](struct.MessagesView.html) and
//! [`MessageView`](struct.MessageView.html) structs are the main types in the crate.
//!
//! # Message framing
//!
//! Every message is exactly 3 bytes wide: a status byte followed by two data bytes.
//! Messages with a single data byte still occupy 3 bytes, and so do System Exclusive messages,
//! which means that real, variable-length SysEx dumps cannot be represented.
//! Running status (omitting a repeated status byte) is not supported either.
//!
//! # About lifetimes
//!
//! Both views have a lifetime parameter, since they store references to the raw bytes in order
//! to avoid copies.
//! For this reason, the byte buffer must be created separately from the views, and the views
//! cannot outlive it:
//!
//! ```rust
//! use chrds::MessagesView;
//!
//! // Load bytes into a buffer
//! let bytes: Vec<u8> = vec![0x80, 60, 0];
//!
//! // View them in a separate step
//! let messages = MessagesView::new(&bytes[..]).unwrap();
//! assert_eq!(messages.len(), 1);
//! ```
//!
//! # About errors
//!
//! There are two kinds of data errors, both reported through [`Error`](struct.Error.html):
//!
//! - `ErrorKind::InvalidMidiDataLength`, when the buffer length is not a multiple of 3.
//! - `ErrorKind::InvalidMidiData`, when a status byte does not map to a message kind.
//!
//! Calling an accessor that does not apply to a message (for example `note()` on a control change)
//! is considered a bug in the caller, not a data error.
//! These mistakes are caught by debug assertions, and are not checked at all in release builds.
//!
//! # About generics
//!
//! Views are generic over their element type `T`, which defaults to `u8`.
//! Any `Copy` type stored in one byte that converts into `u8` and `u16` can be used (see
//! [`ByteSized`](trait.ByteSized.html)), so buffers of byte-backed enums or of the
//! [`u7`](num/struct.u7.html) type can be viewed in place.
//!
//! # About features
//!
//! - The `std` feature (default) implements `std::error::Error` for `Error`.
//!   Disabling it makes the crate `no_std`.
//! - The `alloc` feature (default, implied by `std`) enables
//!   `MessagesView::collect_messages`.
//! - The `parallel` feature (default) enables `MessagesView::par_iter`, through the `rayon`
//!   dependency.
//! - The `strict` feature makes `MessageView::to_message` reject data bytes with their top bit
//!   set, instead of truncating them to 7 bits.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}

/// All of the errors this crate produces.
#[macro_use]
mod error;

mod prelude {
    pub(crate) use crate::{
        error::{Error, ErrorKind, Result, StdResult},
        primitive::{u14, u4, u7, ByteSized, OneByte},
    };
    #[cfg(feature = "alloc")]
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::{convert::TryFrom, fmt, marker::PhantomData, mem, ops, ptr};
}

mod event;
mod message;
mod messages;
mod primitive;

pub use crate::{
    error::{Error, ErrorKind, Result},
    event::{ChannelMessage, Message, PitchBend},
    message::{MessageKind, MessageView},
    messages::{MessageCursor, MessageIter, MessagesView, MESSAGE_LEN},
    primitive::ByteSized,
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u14, u4, u7};
}

#[cfg(test)]
mod test;
