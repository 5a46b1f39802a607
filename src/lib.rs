//! bytepipe
//!
//! Lazy pipelines over chunked byte streams.
//!
//! `bytepipe` treats a sequence of variable-size chunks as one flat run of
//! bytes: searching, slicing, grouping, and folding all ignore where chunk
//! boundaries happen to fall. In exchange it makes one hard promise about
//! memory - **chunks are never concatenated in transit**. Operators may
//! split a chunk (zero-copy, via [`bytes::Bytes`]), never merge two, so a
//! pipeline holds about one chunk at a time no matter how long the stream
//! runs. The single place bytes are ever joined is the explicit
//! [`collect_bytes`](ByteStreamFold::collect_bytes) boundary.
//!
//! The crate intentionally:
//! - does NOT manage concurrency (pipelines are single-threaded and
//!   cooperative; control changes hands at each pull)
//! - does NOT buffer or prefetch beyond one pending chunk
//! - does NOT catch or retry I/O failures (they end the stream and
//!   surface at the drain site)
//!
//! It only does one thing: **chunks in → exact bytes through → result out**
//!
//! # Pipelines
//!
//! ```
//! use bytepipe::{from_chunks, ByteStreamExt, ByteStreamFold};
//!
//! let stream = from_chunks(["He", "llo, ", "world"]);
//! let (bytes, ()) = stream.skip(5).collect_bytes();
//! assert_eq!(&bytes[..], b", world");
//! ```
//!
//! # Splitting and grouping
//!
//! ```
//! use std::num::NonZeroU64;
//! use bytepipe::{from_chunks, ByteStreamExt, ByteStreamFold};
//!
//! let groups = from_chunks(["Hello, world"]).chunks_of(NonZeroU64::new(5).unwrap());
//! let (joined, ()) = groups.intercalate("|").collect_bytes();
//! assert_eq!(&joined[..], b"Hello|, wor|ld");
//! ```
//!
//! # I/O
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use bytepipe::{ByteStreamFold, ReaderStream};
//!
//! fn main() -> io::Result<()> {
//!     let file = File::open("data.bin")?;
//!     let (length, done) = ReaderStream::new(file)
//!         .fold_bytes(0u64, |n, _| n + 1, |n| n);
//!     done?;
//!     println!("{} bytes", length);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cursor;
mod fold;
mod pipe;
mod source;
mod split;
mod stream;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use cursor::Cursor;
pub use fold::ByteStreamFold;
pub use pipe::{
    ByteStreamExt, Filter, FlatMap, Map, Positions, PositionsOf, Scan, Skip, SkipWhile, Take,
    TakeWhile,
};
pub use source::{
    BufSource, BytesSource, ChunkSink, ChunkSource, DEFAULT_READ_SIZE, IterStream, Once,
    ReaderStream, SourceStream, WriterSink, drain_to, empty, from_chunks, once,
};
pub use split::{Group, GroupStep, Grouped, Intercalate, SplitAt, SplitEnd, chunks_of, split_at};
pub use stream::{ByteStream, Step};

#[cfg(feature = "async-io")]
pub use async_stream::{ReadChunks, read_chunks, read_chunks_with_capacity};
