//! Terminal fold engine - [`ByteStreamFold`].
//!
//! Consumers that drain a stream to a final value. The generic engine is
//! [`fold_bytes`](ByteStreamFold::fold_bytes): a strict left fold over the
//! flattened byte sequence with a finalizer, returning the folded value
//! together with the stream's terminal value.
//!
//! The short-circuiting queries ([`any`](ByteStreamFold::any),
//! [`all`](ByteStreamFold::all), [`find`](ByteStreamFold::find),
//! [`head`](ByteStreamFold::head), ...) stop demanding upstream the moment
//! the answer is determined. The abandoned remainder is left undrained: any
//! cleanup it implies belongs to the scope holding the source, not to this
//! engine.

use bytes::{Bytes, BytesMut};

use crate::pipe::ByteStreamExt;
use crate::stream::{ByteStream, Step};

/// Terminal consumers for any [`ByteStream`].
///
/// Every method fully consumes the stream value. Queries that complete
/// without draining ([`any`](ByteStreamFold::any), [`head`](ByteStreamFold::head),
/// ...) simply drop the rest; draining queries that return a plain value
/// ([`length`](ByteStreamFold::length), [`last`](ByteStreamFold::last), ...)
/// discard the terminal value - reach for
/// [`fold_bytes`](ByteStreamFold::fold_bytes) when it matters, e.g. to
/// observe the `io::Result` of a reader-backed stream.
pub trait ByteStreamFold: ByteStream + Sized {
    /// Strict left fold over every byte, in encounter order, with a
    /// finalizer.
    ///
    /// Drains the stream fully, then applies `finish` to the accumulated
    /// state. Returns the finalized value and the terminal value.
    ///
    /// # Example
    ///
    /// ```
    /// use bytepipe::{from_chunks, ByteStreamFold};
    ///
    /// let (sum, ()) = from_chunks(["ab", "c"])
    ///     .fold_bytes(0u64, |acc, b| acc + u64::from(b), |acc| acc);
    /// assert_eq!(sum, u64::from(b'a') + u64::from(b'b') + u64::from(b'c'));
    /// ```
    fn fold_bytes<A, B>(
        mut self,
        seed: A,
        mut step: impl FnMut(A, u8) -> A,
        finish: impl FnOnce(A) -> B,
    ) -> (B, Self::Done) {
        let mut acc = seed;
        loop {
            match self.pull() {
                Step::Chunk(chunk) => {
                    for &byte in chunk.iter() {
                        acc = step(acc, byte);
                    }
                }
                Step::Done(done) => return (finish(acc), done),
            }
        }
    }

    /// Collects the stream into one contiguous buffer.
    ///
    /// This is the explicit collect boundary - the only place in the crate
    /// where chunks are concatenated.
    fn collect_bytes(mut self) -> (Bytes, Self::Done) {
        let mut buf = BytesMut::new();
        loop {
            match self.pull() {
                Step::Chunk(chunk) => buf.extend_from_slice(&chunk),
                Step::Done(done) => return (buf.freeze(), done),
            }
        }
    }

    /// True if any byte satisfies `predicate`. Stops demanding on the first
    /// hit.
    fn any(mut self, mut predicate: impl FnMut(u8) -> bool) -> bool {
        loop {
            match self.pull() {
                Step::Chunk(chunk) => {
                    if chunk.iter().any(|&b| predicate(b)) {
                        return true;
                    }
                }
                Step::Done(_) => return false,
            }
        }
    }

    /// True if every byte satisfies `predicate`. Stops demanding on the
    /// first miss.
    fn all(self, mut predicate: impl FnMut(u8) -> bool) -> bool {
        !self.any(move |b| !predicate(b))
    }

    /// The first byte satisfying `predicate`. Stops demanding once found.
    fn find(mut self, mut predicate: impl FnMut(u8) -> bool) -> Option<u8> {
        loop {
            match self.pull() {
                Step::Chunk(chunk) => {
                    if let Some(&byte) = chunk.iter().find(|&&b| predicate(b)) {
                        return Some(byte);
                    }
                }
                Step::Done(_) => return None,
            }
        }
    }

    /// The first byte of the stream, or `None` if it holds no bytes.
    ///
    /// Empty chunks never count as present elements.
    fn head(mut self) -> Option<u8> {
        loop {
            match self.pull() {
                Step::Chunk(chunk) => {
                    if let Some(&byte) = chunk.first() {
                        return Some(byte);
                    }
                }
                Step::Done(_) => return None,
            }
        }
    }

    /// The last byte of the stream, or `None` if it holds no bytes.
    fn last(mut self) -> Option<u8> {
        let mut last = None;
        loop {
            match self.pull() {
                Step::Chunk(chunk) => {
                    if let Some(&byte) = chunk.last() {
                        last = Some(byte);
                    }
                }
                Step::Done(_) => return last,
            }
        }
    }

    /// The total number of bytes in the stream.
    fn length(mut self) -> u64 {
        let mut total = 0u64;
        loop {
            match self.pull() {
                Step::Chunk(chunk) => total += chunk.len() as u64,
                Step::Done(_) => return total,
            }
        }
    }

    /// The largest byte value, or `None` for a byteless stream.
    fn maximum(self) -> Option<u8> {
        self.fold_bytes(
            None,
            |max: Option<u8>, b| Some(max.map_or(b, |m| m.max(b))),
            |max| max,
        )
        .0
    }

    /// The smallest byte value, or `None` for a byteless stream.
    fn minimum(self) -> Option<u8> {
        self.fold_bytes(
            None,
            |min: Option<u8>, b| Some(min.map_or(b, |m| m.min(b))),
            |min| min,
        )
        .0
    }

    /// True if `byte` occurs in the stream. Stops demanding once found.
    fn contains(self, byte: u8) -> bool {
        self.any(move |b| b == byte)
    }

    /// The byte at absolute offset `index`, or `None` past the end.
    fn nth(self, index: u64) -> Option<u8> {
        self.skip(index).head()
    }

    /// The number of occurrences of `byte`.
    fn count_of(self, byte: u8) -> u64 {
        self.fold_bytes(0u64, move |n, b| n + u64::from(b == byte), |n| n).0
    }
}

impl<S: ByteStream> ByteStreamFold for S {}
