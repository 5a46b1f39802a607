//! Core stream abstraction - [`ByteStream`] and [`Step`].
//!
//! A [`ByteStream`] is a pull-driven sequence of byte chunks ending in a
//! terminal value. Calling [`pull`](ByteStream::pull) is the demand side of
//! the channel; returning [`Step::Chunk`] is the emit side, after which the
//! producer is suspended until the next demand. The caller's drive loop is
//! the trampoline: control, not data, moves across the boundary, and at most
//! one chunk is ever in flight.
//!
//! Chunks are [`Bytes`]. No operation in this crate concatenates two chunks;
//! a chunk may only be split into smaller chunks (`split_to`/`split_off`,
//! both zero-copy). The single exception is the explicit collect boundary,
//! [`collect_bytes`](crate::ByteStreamFold::collect_bytes).
//!
//! # Example
//!
//! ```
//! use bytepipe::{from_chunks, ByteStream, Step};
//!
//! let mut stream = from_chunks(["ab", "cd"]);
//! assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"ab"));
//! assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"cd"));
//! assert!(matches!(stream.pull(), Step::Done(())));
//! ```

use bytes::Bytes;

/// One step of a stream: the next chunk, or the terminal value.
#[derive(Debug)]
pub enum Step<R> {
    /// The next chunk of the stream. May be empty.
    Chunk(Bytes),

    /// The stream completed with this terminal value.
    Done(R),
}

impl<R> Step<R> {
    /// Returns the chunk, or `None` if this step is the terminal value.
    pub fn into_chunk(self) -> Option<Bytes> {
        match self {
            Step::Chunk(chunk) => Some(chunk),
            Step::Done(_) => None,
        }
    }

    /// Returns the terminal value, or `None` if this step is a chunk.
    pub fn into_done(self) -> Option<R> {
        match self {
            Step::Chunk(_) => None,
            Step::Done(done) => Some(done),
        }
    }

    /// True if this step is the terminal value.
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }
}

/// A pull-driven stream of byte chunks with a terminal value.
///
/// Element-level semantics (search, slicing, folds) are defined over the
/// flattened byte sequence: where chunk boundaries fall is an implementation
/// detail of the producer, never observable through byte-wise operators.
///
/// A stream is driven once, to completion or abandonment. Pulling a stream
/// again after it returned [`Step::Done`] is a contract violation;
/// implementations whose terminal value cannot be produced twice panic with
/// `"stream pulled after completion"`.
///
/// A producer that is never pulled again simply stays suspended. There is no
/// cancellation signal; resources held by a source belong to the scope that
/// opened it, not to the stages in between.
pub trait ByteStream {
    /// The terminal value the stream completes with.
    ///
    /// Pure in-memory streams use `()`. Reader-backed streams use
    /// `std::io::Result<()>`, so a failure of the underlying medium ends the
    /// composition and surfaces at the drain site.
    type Done;

    /// Demands the next chunk.
    fn pull(&mut self) -> Step<Self::Done>;

    /// Demands the next chunk, requesting a size for it.
    ///
    /// The request is renegotiated on every call and consumed by the
    /// producer's next emit step. Honoring it is a producer capability:
    /// sources like [`ReaderStream`](crate::ReaderStream) and
    /// [`SourceStream`](crate::SourceStream) read at most `size` bytes,
    /// while transform stages ignore the request.
    fn pull_sized(&mut self, size: usize) -> Step<Self::Done> {
        let _ = size;
        self.pull()
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    type Done = S::Done;

    fn pull(&mut self) -> Step<Self::Done> {
        (**self).pull()
    }

    fn pull_sized(&mut self, size: usize) -> Step<Self::Done> {
        (**self).pull_sized(size)
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    type Done = S::Done;

    fn pull(&mut self) -> Step<Self::Done> {
        (**self).pull()
    }

    fn pull_sized(&mut self, size: usize) -> Step<Self::Done> {
        (**self).pull_sized(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_chunks;

    #[test]
    fn test_step_accessors() {
        let step: Step<()> = Step::Chunk(Bytes::from_static(b"x"));
        assert!(!step.is_done());
        assert_eq!(step.into_chunk().unwrap(), Bytes::from_static(b"x"));

        let step: Step<u32> = Step::Done(7);
        assert!(step.is_done());
        assert_eq!(step.into_done(), Some(7));
    }

    #[test]
    fn test_mut_ref_forwarding() {
        let mut stream = from_chunks(["ab"]);
        let by_ref = &mut stream;
        assert!(matches!(by_ref.pull(), Step::Chunk(c) if &c[..] == b"ab"));
        assert!(matches!(by_ref.pull(), Step::Done(())));
    }

    #[test]
    fn test_boxed_dyn_stream() {
        let mut stream: Box<dyn ByteStream<Done = ()>> = Box::new(from_chunks(["a", "b"]));
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"a"));
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"b"));
        assert!(stream.pull().is_done());
    }

    #[test]
    fn test_default_pull_sized_ignores_request() {
        let mut stream = from_chunks(["abcdef"]);
        // from_chunks emits its slices as-is, whatever size is requested.
        assert!(matches!(stream.pull_sized(2), Step::Chunk(c) if &c[..] == b"abcdef"));
    }
}
