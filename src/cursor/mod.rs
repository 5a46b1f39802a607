//! Single-slot pushback cursor - [`Cursor`].
//!
//! Wraps a stream with one slot of external mutable state: the chunk most
//! recently drawn can be pushed back, giving repeatable one-step lookahead
//! without violating the one-chunk-in-flight bound.
//!
//! # Example
//!
//! ```
//! use bytepipe::{from_chunks, Cursor};
//!
//! let mut cursor = Cursor::new(from_chunks(["", "hi"]));
//!
//! // peek is idempotent; empty chunks are never surfaced as content
//! assert_eq!(cursor.peek().map(|c| &c[..]), Some(&b"hi"[..]));
//! assert_eq!(cursor.peek().map(|c| &c[..]), Some(&b"hi"[..]));
//!
//! // draw consumes the peeked chunk
//! assert_eq!(cursor.draw().map(|c| c.to_vec()), Some(b"hi".to_vec()));
//! assert!(cursor.is_at_end());
//! ```

use bytes::Bytes;

use crate::stream::{ByteStream, Step};

/// A stream wrapper holding at most one pushed-back chunk.
///
/// The buffer never holds more than one chunk and never holds an empty one.
/// Pushback is logically a stack, but this cursor only ever needs the single
/// slot: the one chunk it just drew.
///
/// `Cursor` also implements [`ByteStream`]: as a stream it first yields the
/// buffered chunk, then delegates to the underlying stream verbatim. This is
/// the continuation representation returned by
/// [`split_at`](crate::ByteStreamExt::split_at).
pub struct Cursor<S: ByteStream> {
    stream: S,
    buffered: Option<Bytes>,
    done: Option<S::Done>,
}

impl<S: ByteStream> Cursor<S> {
    /// Wraps a stream with an empty pushback slot.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffered: None,
            done: None,
        }
    }

    /// Wraps a stream with `chunk` already pushed back.
    ///
    /// An empty `chunk` leaves the slot empty.
    pub(crate) fn with_buffered(stream: S, chunk: Bytes) -> Self {
        let mut cursor = Self::new(stream);
        cursor.push_back(chunk);
        cursor
    }

    /// Draws the next non-empty chunk, or `None` at the terminal value.
    ///
    /// Returns the buffered chunk if one is present, otherwise pulls the
    /// underlying stream, silently skipping empty chunks. Once the terminal
    /// value is reached it is retained internally and `draw` keeps returning
    /// `None`.
    pub fn draw(&mut self) -> Option<Bytes> {
        match self.draw_step() {
            Step::Chunk(chunk) => Some(chunk),
            Step::Done(done) => {
                self.done = Some(done);
                None
            }
        }
    }

    /// Like [`draw`](Cursor::draw), but surrenders the terminal value.
    ///
    /// The terminal value is moved out, so the caller owns deciding what the
    /// end of the stream means. Used by the grouping machinery.
    pub(crate) fn draw_step(&mut self) -> Step<S::Done> {
        if let Some(chunk) = self.buffered.take() {
            return Step::Chunk(chunk);
        }
        if let Some(done) = self.done.take() {
            return Step::Done(done);
        }
        loop {
            match self.stream.pull() {
                Step::Chunk(chunk) if chunk.is_empty() => continue,
                step => return step,
            }
        }
    }

    /// Pushes a chunk back into the slot.
    ///
    /// Empty chunks are dropped silently. Pushing onto an occupied slot is a
    /// contract violation and panics: this cursor holds at most one chunk.
    pub fn push_back(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        assert!(
            self.buffered.is_none(),
            "cursor pushback slot already occupied"
        );
        self.buffered = Some(chunk);
    }

    /// Looks at the next non-empty chunk without consuming it.
    ///
    /// Draws and pushes back, so repeated peeks return the same chunk and a
    /// subsequent [`draw`](Cursor::draw) consumes exactly it. `None` means
    /// the underlying stream has reached its terminal value.
    pub fn peek(&mut self) -> Option<&Bytes> {
        if self.buffered.is_none() {
            if let Some(chunk) = self.draw() {
                self.buffered = Some(chunk);
            }
        }
        self.buffered.as_ref()
    }

    /// True iff no content remains before the terminal value.
    pub fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Returns the terminal value, if the underlying stream has reached it.
    pub fn finish(self) -> Option<S::Done> {
        self.done
    }

    /// Unwraps the cursor into the underlying stream and any buffered chunk.
    pub fn into_parts(self) -> (S, Option<Bytes>) {
        (self.stream, self.buffered)
    }
}

impl<S: ByteStream> ByteStream for Cursor<S> {
    type Done = S::Done;

    // As a stream the cursor is transparent: buffered chunk first, then the
    // underlying chunks verbatim, empty ones included.
    fn pull(&mut self) -> Step<S::Done> {
        if let Some(chunk) = self.buffered.take() {
            return Step::Chunk(chunk);
        }
        if let Some(done) = self.done.take() {
            return Step::Done(done);
        }
        self.stream.pull()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{empty, from_chunks};

    #[test]
    fn test_draw_skips_empty_chunks() {
        let mut cursor = Cursor::new(from_chunks(["", "", "ab", ""]));
        assert_eq!(cursor.draw().unwrap(), Bytes::from_static(b"ab"));
        assert_eq!(cursor.draw(), None);
    }

    #[test]
    fn test_draw_after_end_stays_at_end() {
        let mut cursor = Cursor::new(empty());
        assert_eq!(cursor.draw(), None);
        assert_eq!(cursor.draw(), None);
        assert_eq!(cursor.finish(), Some(()));
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut cursor = Cursor::new(from_chunks(["xy", "z"]));
        assert_eq!(cursor.peek().unwrap(), &Bytes::from_static(b"xy"));
        assert_eq!(cursor.peek().unwrap(), &Bytes::from_static(b"xy"));
        assert_eq!(cursor.draw().unwrap(), Bytes::from_static(b"xy"));
        assert_eq!(cursor.draw().unwrap(), Bytes::from_static(b"z"));
    }

    #[test]
    fn test_push_back_then_draw() {
        let mut cursor = Cursor::new(from_chunks(["cd"]));
        let chunk = cursor.draw().unwrap();
        cursor.push_back(chunk);
        assert_eq!(cursor.draw().unwrap(), Bytes::from_static(b"cd"));
    }

    #[test]
    fn test_push_back_empty_is_dropped() {
        let mut cursor = Cursor::new(empty());
        cursor.push_back(Bytes::new());
        assert!(cursor.is_at_end());
    }

    #[test]
    #[should_panic(expected = "pushback slot already occupied")]
    fn test_double_push_back_panics() {
        let mut cursor = Cursor::new(empty());
        cursor.push_back(Bytes::from_static(b"a"));
        cursor.push_back(Bytes::from_static(b"b"));
    }

    #[test]
    fn test_is_at_end_iff_terminal() {
        let mut cursor = Cursor::new(from_chunks(["a"]));
        assert!(!cursor.is_at_end());
        cursor.draw();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_cursor_as_stream_yields_buffered_first() {
        let mut cursor = Cursor::new(from_chunks(["bc"]));
        cursor.push_back(Bytes::from_static(b"a"));
        assert!(matches!(cursor.pull(), Step::Chunk(c) if &c[..] == b"a"));
        assert!(matches!(cursor.pull(), Step::Chunk(c) if &c[..] == b"bc"));
        assert!(cursor.pull().is_done());
    }
}
