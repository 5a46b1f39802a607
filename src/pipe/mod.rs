//! Element-wise transform pipes - [`ByteStreamExt`] and its adapters.
//!
//! Every operator here is defined over the flattened byte sequence and is
//! insensitive to where chunk boundaries fall. Operators only ever split
//! chunks; none of them merges two chunks into one.
//!
//! - [`map`](ByteStreamExt::map), [`flat_map`](ByteStreamExt::flat_map),
//!   [`filter`](ByteStreamExt::filter), [`scan`](ByteStreamExt::scan) -
//!   per-chunk rewrites
//! - [`take`](ByteStreamExt::take), [`skip`](ByteStreamExt::skip),
//!   [`take_while`](ByteStreamExt::take_while),
//!   [`skip_while`](ByteStreamExt::skip_while) - prefix/suffix selection by
//!   splitting the straddling chunk
//! - [`positions`](ByteStreamExt::positions),
//!   [`positions_of`](ByteStreamExt::positions_of) - absolute offset search
//!   threading the byte count across chunk boundaries

mod adapters;

pub use adapters::{
    Filter, FlatMap, Map, Positions, PositionsOf, Scan, Skip, SkipWhile, Take, TakeWhile,
};

use std::num::NonZeroU64;

use crate::cursor::Cursor;
use crate::split::{Grouped, SplitAt};
use crate::stream::ByteStream;

/// Combinators on any [`ByteStream`].
///
/// All methods consume the stream and return a new stage; composition is
/// just nesting, so it is associative by construction.
///
/// # Example
///
/// ```
/// use bytepipe::{from_chunks, ByteStreamExt, ByteStreamFold};
///
/// let stream = from_chunks(["He", "llo, ", "world"]);
/// let (bytes, ()) = stream.map(|b| b.to_ascii_uppercase()).take(5).collect_bytes();
/// assert_eq!(&bytes[..], b"HELLO");
/// ```
pub trait ByteStreamExt: ByteStream + Sized {
    /// Applies `f` to every byte. Chunk count and boundaries are unchanged.
    fn map<F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(u8) -> u8,
    {
        Map::new(self, f)
    }

    /// Expands every byte into zero or more bytes.
    ///
    /// Produces one output chunk per input chunk (possibly empty); output
    /// is never merged across input chunk boundaries.
    fn flat_map<F, I>(self, f: F) -> FlatMap<Self, F>
    where
        F: FnMut(u8) -> I,
        I: IntoIterator<Item = u8>,
    {
        FlatMap::new(self, f)
    }

    /// Emits exactly the first `count` bytes, splitting the final chunk at
    /// the boundary.
    ///
    /// `take(0)` completes immediately without demanding upstream, and once
    /// satisfied the stage never demands again. The abandoned remainder and
    /// the upstream terminal value are discarded; use
    /// [`split_at`](ByteStreamExt::split_at) to keep them.
    fn take(self, count: u64) -> Take<Self> {
        Take::new(self, count)
    }

    /// Discards the first `count` bytes, then passes everything through
    /// verbatim.
    ///
    /// Whole chunks inside the dropped region are discarded; the straddling
    /// chunk is split and its suffix emitted.
    fn skip(self, count: u64) -> Skip<Self> {
        Skip::new(self, count)
    }

    /// Emits bytes while `predicate` holds, splitting at the first failure.
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        P: FnMut(u8) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Discards bytes while `predicate` holds, then passes the rest through
    /// verbatim.
    fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
    where
        P: FnMut(u8) -> bool,
    {
        SkipWhile::new(self, predicate)
    }

    /// Keeps only the bytes matching `predicate`, preserving order.
    ///
    /// A chunk whose bytes all fail the predicate becomes an empty chunk,
    /// which is emitted rather than suppressed. Operators that select by
    /// splitting ([`skip`](ByteStreamExt::skip),
    /// [`take_while`](ByteStreamExt::take_while)) never introduce empty
    /// chunks; `filter` keeps its per-chunk cadence instead, so the
    /// streaming behavior of a pipeline does not change with chunk content.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(u8) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Strict left scan: emits the running accumulator value for every byte.
    ///
    /// One output chunk per input chunk, same length; the last value
    /// computed for a chunk seeds the scan over the next. The seed itself
    /// is not emitted.
    fn scan<F>(self, seed: u8, f: F) -> Scan<Self, F>
    where
        F: FnMut(u8, u8) -> u8,
    {
        Scan::new(self, seed, f)
    }

    /// Iterator over the absolute offsets of bytes matching `predicate`.
    ///
    /// Offsets are cumulative across chunk boundaries. After the iterator is
    /// exhausted the stream's terminal value is available via
    /// [`Positions::into_done`].
    fn positions<P>(self, predicate: P) -> Positions<Self, P>
    where
        P: FnMut(u8) -> bool,
    {
        Positions::new(self, predicate)
    }

    /// Iterator over the absolute offsets of occurrences of `byte`.
    fn positions_of(self, byte: u8) -> PositionsOf<Self> {
        PositionsOf::new(self, byte)
    }

    /// Splits the stream at byte offset `count`.
    ///
    /// The returned stream emits the prefix (chunks re-emitted verbatim, the
    /// straddling one split) and completes with a
    /// [`SplitEnd`](crate::SplitEnd): either the untouched continuation or
    /// the terminal value if the stream ran out first. See
    /// [`split_at`](crate::split_at).
    fn split_at(self, count: u64) -> SplitAt<Self> {
        crate::split::split_at(self, count)
    }

    /// Divides the stream into a lazy sequence of sub-streams of at most
    /// `size` bytes each. See [`chunks_of`](crate::chunks_of).
    fn chunks_of(self, size: NonZeroU64) -> Grouped<Self> {
        crate::split::chunks_of(self, size)
    }

    /// Wraps the stream in a single-slot pushback [`Cursor`].
    fn cursor(self) -> Cursor<Self> {
        Cursor::new(self)
    }
}

impl<S: ByteStream> ByteStreamExt for S {}
