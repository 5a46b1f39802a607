//! The bounded splitter - [`split_at`].

use bytes::Bytes;

use crate::cursor::Cursor;
use crate::stream::{ByteStream, Step};

/// Terminal value of a [`SplitAt`] stream.
pub enum SplitEnd<S: ByteStream> {
    /// The stream completed before the split offset was reached.
    Exhausted(S::Done),

    /// The split offset was reached; the continuation holds everything
    /// after it, untouched.
    Remainder(Cursor<S>),
}

/// Splits `stream` at byte offset `count`.
///
/// The returned stream re-emits chunks verbatim until `count` bytes have
/// been emitted, splitting the straddling chunk at the boundary, and then
/// completes with [`SplitEnd::Remainder`]: a continuation that, fully
/// drawn, reproduces exactly the bytes after position `count` - no
/// duplication, no loss. If the stream runs out first, it completes with
/// [`SplitEnd::Exhausted`] carrying the original terminal value.
///
/// `count == 0` completes on the first pull with the original stream as
/// the continuation, without demanding anything from it.
///
/// # Example
///
/// ```
/// use bytepipe::{from_chunks, split_at, ByteStreamFold, SplitEnd};
///
/// let (prefix, end) = split_at(from_chunks(["He", "llo"]), 3).collect_bytes();
/// assert_eq!(&prefix[..], b"Hel");
///
/// let SplitEnd::Remainder(rest) = end else { panic!("stream was long enough") };
/// let (suffix, ()) = rest.collect_bytes();
/// assert_eq!(&suffix[..], b"lo");
/// ```
pub fn split_at<S: ByteStream>(stream: S, count: u64) -> SplitAt<S> {
    SplitAt {
        stream: Some(stream),
        suffix: None,
        remaining: count,
    }
}

/// Stream returned by [`split_at`].
#[derive(Debug)]
pub struct SplitAt<S: ByteStream> {
    stream: Option<S>,
    suffix: Option<Bytes>,
    remaining: u64,
}

impl<S: ByteStream> ByteStream for SplitAt<S> {
    type Done = SplitEnd<S>;

    fn pull(&mut self) -> Step<SplitEnd<S>> {
        let mut stream = self.stream.take().expect("stream pulled after completion");
        if self.remaining == 0 {
            let cursor = match self.suffix.take() {
                Some(suffix) => Cursor::with_buffered(stream, suffix),
                None => Cursor::new(stream),
            };
            return Step::Done(SplitEnd::Remainder(cursor));
        }
        match stream.pull() {
            Step::Chunk(mut chunk) => {
                let emitted = if chunk.len() as u64 <= self.remaining {
                    self.remaining -= chunk.len() as u64;
                    chunk
                } else {
                    let prefix = chunk.split_to(self.remaining as usize);
                    self.suffix = Some(chunk);
                    self.remaining = 0;
                    prefix
                };
                self.stream = Some(stream);
                Step::Chunk(emitted)
            }
            Step::Done(done) => Step::Done(SplitEnd::Exhausted(done)),
        }
    }
}
