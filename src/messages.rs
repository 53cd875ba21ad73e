//! Lazy views over buffers of consecutive 3-byte MIDI messages.

#[cfg(feature = "alloc")]
use crate::event::Message;
use crate::{message::MessageView, prelude::*};
use core::{cmp::Ordering, iter::FusedIterator, slice::ChunksExact};

/// The width of every message in a buffer, status byte included.
pub const MESSAGE_LEN: usize = 3;

/// A read-only view over a buffer of back-to-back 3-byte MIDI messages.
///
/// Constructing the view only checks that the buffer length is a multiple of 3.
/// Nothing is decoded until a message is requested, and every message is produced as a
/// [`MessageView`](struct.MessageView.html) borrowing straight from the buffer, so iterating
/// performs no copies and no allocations.
///
/// Running status is not supported: every message must carry its own status byte.
/// System Exclusive messages are assumed to be 3 bytes wide like any other message.
///
/// ```
/// use chrds::{MessageKind, MessagesView};
///
/// let bytes: [u8; 9] = [0x90, 60, 100, 0xB3, 7, 127, 0x80, 60, 0];
/// let messages = MessagesView::new(&bytes[..]).unwrap();
/// assert_eq!(messages.len(), 3);
///
/// let kinds = messages
///     .iter()
///     .map(|msg| msg.kind())
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     [MessageKind::NoteOn, MessageKind::ControlChange, MessageKind::NoteOff]
/// );
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct MessagesView<'a, T: ByteSized = u8> {
    raw: &'a [T],
}
impl<'a, T: ByteSized> MessagesView<'a, T> {
    /// Wrap a buffer of messages.
    ///
    /// Fails with `ErrorKind::InvalidMidiDataLength` if the length of the buffer is not a
    /// multiple of 3.
    /// An empty buffer is valid, and holds no messages.
    pub fn new(raw: &'a [T]) -> Result<MessagesView<'a, T>> {
        let () = OneByte::<T>::CHECK;
        if raw.len() % MESSAGE_LEN != 0 {
            log::debug!(
                "rejecting midi buffer of {} bytes, {} trailing bytes",
                raw.len(),
                raw.len() % MESSAGE_LEN
            );
            bail!(err_length!("buffer length is not divisible by 3"));
        }
        log::trace!("viewing {} midi messages", raw.len() / MESSAGE_LEN);
        Ok(MessagesView { raw })
    }

    /// The raw buffer this view was built from.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.raw
    }

    /// The amount of messages in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len() / MESSAGE_LEN
    }

    /// Whether the buffer holds no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Get the message at the given index, or `None` if out of bounds.
    ///
    /// The message at index `i` spans the elements `3*i .. 3*i + 3`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<MessageView<'a, T>> {
        message_at(self.raw, index)
    }

    /// Iterate over the messages in the buffer.
    #[inline]
    pub fn iter(&self) -> MessageIter<'a, T> {
        MessageIter {
            chunks: self.raw.chunks_exact(MESSAGE_LEN),
        }
    }

    /// A cursor pointing at the first message.
    #[inline]
    pub fn cursor(&self) -> MessageCursor<'a, T> {
        self.cursor_at(0)
    }

    /// A cursor pointing at the message with the given index.
    ///
    /// The index may be out of bounds, in which case the cursor dereferences to nothing until it
    /// is moved back in range.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> MessageCursor<'a, T> {
        MessageCursor {
            raw: self.raw,
            pos: isize::try_from(index).unwrap_or(isize::max_value()),
        }
    }

    /// A cursor pointing one past the last message.
    #[inline]
    pub fn end_cursor(&self) -> MessageCursor<'a, T> {
        self.cursor_at(self.len())
    }

    /// Decode every message into an owned [`Message`](enum.Message.html).
    ///
    /// Fails on the first message that cannot be decoded.
    ///
    /// This method is only available with the `alloc` feature enabled.
    #[cfg(feature = "alloc")]
    pub fn collect_messages(&self) -> Result<Vec<Message>> {
        self.iter().map(|msg| msg.to_message()).collect()
    }

    /// Iterate over the messages in the buffer from several threads.
    ///
    /// This method is only available with the `parallel` feature enabled.
    #[cfg(feature = "parallel")]
    pub fn par_iter(&self) -> impl rayon::iter::IndexedParallelIterator<Item = MessageView<'a, T>>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        self.raw
            .par_chunks_exact(MESSAGE_LEN)
            .map(MessageView::from_chunk)
    }
}
impl<'a, T: ByteSized> TryFrom<&'a [T]> for MessagesView<'a, T> {
    type Error = Error;

    #[inline]
    fn try_from(raw: &'a [T]) -> Result<MessagesView<'a, T>> {
        MessagesView::new(raw)
    }
}
impl<'a, T: ByteSized> IntoIterator for MessagesView<'a, T> {
    type Item = MessageView<'a, T>;
    type IntoIter = MessageIter<'a, T>;

    #[inline]
    fn into_iter(self) -> MessageIter<'a, T> {
        self.iter()
    }
}
impl<'a, 'b, T: ByteSized> IntoIterator for &'b MessagesView<'a, T> {
    type Item = MessageView<'a, T>;
    type IntoIter = MessageIter<'a, T>;

    #[inline]
    fn into_iter(self) -> MessageIter<'a, T> {
        self.iter()
    }
}

#[inline]
fn message_at<T: ByteSized>(raw: &[T], index: usize) -> Option<MessageView<'_, T>> {
    let start = index.checked_mul(MESSAGE_LEN)?;
    let chunk = raw.get(start..start.checked_add(MESSAGE_LEN)?)?;
    Some(MessageView::from_chunk(chunk))
}

/// An iterator over the messages of a [`MessagesView`](struct.MessagesView.html).
///
/// Messages are decoded lazily, and the iterator can be walked from both ends.
/// Skipping with `nth` or `nth_back` is O(1).
#[derive(Clone, Debug)]
pub struct MessageIter<'a, T: ByteSized = u8> {
    chunks: ChunksExact<'a, T>,
}
impl<'a, T: ByteSized> Iterator for MessageIter<'a, T> {
    type Item = MessageView<'a, T>;

    #[inline]
    fn next(&mut self) -> Option<MessageView<'a, T>> {
        self.chunks.next().map(MessageView::from_chunk)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<MessageView<'a, T>> {
        self.chunks.nth(n).map(MessageView::from_chunk)
    }

    #[inline]
    fn count(self) -> usize {
        self.chunks.len()
    }

    #[inline]
    fn last(mut self) -> Option<MessageView<'a, T>> {
        self.next_back()
    }
}
impl<'a, T: ByteSized> DoubleEndedIterator for MessageIter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<MessageView<'a, T>> {
        self.chunks.next_back().map(MessageView::from_chunk)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<MessageView<'a, T>> {
        self.chunks.nth_back(n).map(MessageView::from_chunk)
    }
}
impl<'a, T: ByteSized> ExactSizeIterator for MessageIter<'a, T> {}
impl<'a, T: ByteSized> FusedIterator for MessageIter<'a, T> {}

/// A random-access position within a [`MessagesView`](struct.MessagesView.html).
///
/// Cursors move in whole messages: adding 1 moves the underlying position 3 elements forward, and
/// the difference between two cursors is counted in messages.
/// A cursor may point outside of the buffer (for example one past the end), in which case `get`
/// returns `None`.
/// Positions saturate at the bounds of `isize` instead of overflowing.
///
/// Cursors are ordered by position.
/// Only cursors over the same buffer can be compared or subtracted.
///
/// ```
/// use chrds::MessagesView;
///
/// let bytes: [u8; 9] = [0x90, 60, 100, 0x90, 64, 100, 0x90, 67, 100];
/// let messages = MessagesView::new(&bytes[..]).unwrap();
///
/// let mut cursor = messages.cursor();
/// cursor += 2;
/// assert_eq!(cursor.get().unwrap().note(), 67);
/// assert_eq!(cursor.at(-1).unwrap().note(), 64);
/// assert_eq!(messages.end_cursor() - cursor, 1);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct MessageCursor<'a, T: ByteSized = u8> {
    raw: &'a [T],
    /// Message index, not element index.
    pos: isize,
}
impl<'a, T: ByteSized> MessageCursor<'a, T> {
    /// The message index this cursor points at.
    #[inline]
    pub fn index(&self) -> isize {
        self.pos
    }

    /// The message this cursor points at, or `None` if it points outside of the buffer.
    #[inline]
    pub fn get(&self) -> Option<MessageView<'a, T>> {
        if self.pos < 0 {
            None
        } else {
            message_at(self.raw, self.pos as usize)
        }
    }

    /// The message `delta` messages away from this cursor.
    ///
    /// Returns `None` if that position lies outside of the buffer, including when it is too far
    /// away to be represented at all.
    #[inline]
    pub fn at(&self, delta: isize) -> Option<MessageView<'a, T>> {
        (*self + delta).get()
    }

    /// Step one message forward.
    #[inline]
    pub fn inc(&mut self) -> &mut MessageCursor<'a, T> {
        *self += 1;
        self
    }

    /// Step one message backward.
    #[inline]
    pub fn dec(&mut self) -> &mut MessageCursor<'a, T> {
        *self -= 1;
        self
    }

    #[inline]
    fn debug_check_same_buffer(&self, other: &MessageCursor<'a, T>) {
        debug_assert!(
            ptr::eq(self.raw, other.raw),
            "cursors over different buffers cannot be compared"
        );
    }
}
impl<'a, T: ByteSized> ops::AddAssign<isize> for MessageCursor<'a, T> {
    #[inline]
    fn add_assign(&mut self, delta: isize) {
        self.pos = self.pos.saturating_add(delta);
    }
}
impl<'a, T: ByteSized> ops::SubAssign<isize> for MessageCursor<'a, T> {
    #[inline]
    fn sub_assign(&mut self, delta: isize) {
        self.pos = self.pos.saturating_sub(delta);
    }
}
impl<'a, T: ByteSized> ops::Add<isize> for MessageCursor<'a, T> {
    type Output = MessageCursor<'a, T>;

    #[inline]
    fn add(mut self, delta: isize) -> MessageCursor<'a, T> {
        self += delta;
        self
    }
}
impl<'a, T: ByteSized> ops::Add<MessageCursor<'a, T>> for isize {
    type Output = MessageCursor<'a, T>;

    #[inline]
    fn add(self, cursor: MessageCursor<'a, T>) -> MessageCursor<'a, T> {
        cursor + self
    }
}
impl<'a, T: ByteSized> ops::Sub<isize> for MessageCursor<'a, T> {
    type Output = MessageCursor<'a, T>;

    #[inline]
    fn sub(mut self, delta: isize) -> MessageCursor<'a, T> {
        self -= delta;
        self
    }
}
/// The distance between two cursors, in messages.
impl<'a, T: ByteSized> ops::Sub for MessageCursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, other: MessageCursor<'a, T>) -> isize {
        self.debug_check_same_buffer(&other);
        self.pos.saturating_sub(other.pos)
    }
}
impl<'a, T: ByteSized> PartialEq for MessageCursor<'a, T> {
    #[inline]
    fn eq(&self, other: &MessageCursor<'a, T>) -> bool {
        self.debug_check_same_buffer(other);
        self.pos == other.pos
    }
}
impl<'a, T: ByteSized> Eq for MessageCursor<'a, T> {}
impl<'a, T: ByteSized> PartialOrd for MessageCursor<'a, T> {
    #[inline]
    fn partial_cmp(&self, other: &MessageCursor<'a, T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<'a, T: ByteSized> Ord for MessageCursor<'a, T> {
    #[inline]
    fn cmp(&self, other: &MessageCursor<'a, T>) -> Ordering {
        self.debug_check_same_buffer(other);
        self.pos.cmp(&other.pos)
    }
}
