//! Sources, sinks, and in-memory bridging.
//!
//! The core never performs I/O itself; it is parametrized over "how to
//! obtain the next chunk". This module defines the capability interfaces -
//! [`ChunkSource`] and [`ChunkSink`] - plus the bridges a pipeline actually
//! starts and ends with:
//!
//! - [`once`], [`from_chunks`], [`empty`] - in-memory streams, zero-copy,
//!   one chunk per slice
//! - [`BytesSource`], [`BufSource`], [`SourceStream`] - size-negotiated
//!   sources driven as streams
//! - [`ReaderStream`] - a [`std::io::Read`] driven directly as a stream
//! - [`WriterSink`], [`drain_to`] - the consuming end
//!
//! Reader-backed streams complete with `io::Result<()>`: a failure of the
//! underlying medium is not handled here, it ends the stream and surfaces
//! at the drain site.

use std::io::{self, BufRead, Read, Write};

use bytes::Bytes;

use crate::stream::{ByteStream, Step};

/// Default chunk size requested from sources when the consumer expresses
/// no preference (8 KiB).
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// A producer of chunks from some underlying medium.
///
/// The size request is renegotiated on every call, which is what lets one
/// source serve fixed-size and variable-size consumers alike. `read_chunk`
/// blocks on the medium; a returned chunk may be shorter than requested,
/// and may only be empty if the source chooses to emit one.
pub trait ChunkSource {
    /// True when no further content remains.
    fn is_at_end(&mut self) -> io::Result<bool>;

    /// Produces the next chunk, at most `size_request` bytes of it.
    fn read_chunk(&mut self, size_request: usize) -> io::Result<Bytes>;
}

/// A consumer of chunks.
pub trait ChunkSink {
    /// Accepts one chunk.
    fn write_chunk(&mut self, chunk: Bytes) -> io::Result<()>;
}

impl ChunkSink for Vec<Bytes> {
    fn write_chunk(&mut self, chunk: Bytes) -> io::Result<()> {
        self.push(chunk);
        Ok(())
    }
}

/// A stream with a single chunk.
///
/// Zero-copy for anything already [`Bytes`]-backed.
#[derive(Debug)]
pub struct Once {
    chunk: Option<Bytes>,
}

/// Creates a stream that emits `data` as one chunk, then completes.
pub fn once(data: impl Into<Bytes>) -> Once {
    Once {
        chunk: Some(data.into()),
    }
}

impl ByteStream for Once {
    type Done = ();

    fn pull(&mut self) -> Step<()> {
        match self.chunk.take() {
            Some(chunk) => Step::Chunk(chunk),
            None => Step::Done(()),
        }
    }
}

/// A stream over an iterator of chunks.
#[derive(Debug)]
pub struct IterStream<I> {
    iter: I,
}

/// Creates a stream that emits one chunk per element of `chunks`.
///
/// Each slice becomes its own chunk; nothing is copied for `Bytes` or
/// `'static` inputs.
///
/// # Example
///
/// ```
/// use bytepipe::{from_chunks, ByteStreamFold};
///
/// let (bytes, ()) = from_chunks(["He", "llo"]).collect_bytes();
/// assert_eq!(&bytes[..], b"Hello");
/// ```
pub fn from_chunks<I>(chunks: I) -> IterStream<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Into<Bytes>,
{
    IterStream {
        iter: chunks.into_iter(),
    }
}

/// Creates a stream with no chunks that completes immediately.
pub fn empty() -> IterStream<std::iter::Empty<Bytes>> {
    from_chunks(std::iter::empty())
}

impl<I, T> ByteStream for IterStream<I>
where
    I: Iterator<Item = T>,
    T: Into<Bytes>,
{
    type Done = ();

    fn pull(&mut self) -> Step<()> {
        match self.iter.next() {
            Some(chunk) => Step::Chunk(chunk.into()),
            None => Step::Done(()),
        }
    }
}

/// An in-memory, size-negotiated [`ChunkSource`].
///
/// Serves slices of one buffer, zero-copy, honoring whatever size each
/// call requests. Being in-memory it is trivially restartable: clone the
/// [`Bytes`] and build another source.
#[derive(Debug, Clone)]
pub struct BytesSource {
    data: Bytes,
}

impl BytesSource {
    /// Wraps a buffer.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl ChunkSource for BytesSource {
    fn is_at_end(&mut self) -> io::Result<bool> {
        Ok(self.data.is_empty())
    }

    fn read_chunk(&mut self, size_request: usize) -> io::Result<Bytes> {
        let take = self.data.len().min(size_request.max(1));
        Ok(self.data.split_to(take))
    }
}

/// A [`ChunkSource`] over any [`BufRead`].
///
/// End-of-input is detected through `fill_buf`, so `is_at_end` is exact
/// without consuming anything. Chunks are bounded by both the size request
/// and whatever the reader has buffered.
#[derive(Debug)]
pub struct BufSource<R> {
    reader: R,
}

impl<R: BufRead> BufSource<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Unwraps the source into the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> ChunkSource for BufSource<R> {
    fn is_at_end(&mut self) -> io::Result<bool> {
        Ok(self.reader.fill_buf()?.is_empty())
    }

    fn read_chunk(&mut self, size_request: usize) -> io::Result<Bytes> {
        let available = self.reader.fill_buf()?;
        let take = available.len().min(size_request.max(1));
        let chunk = Bytes::copy_from_slice(&available[..take]);
        self.reader.consume(take);
        Ok(chunk)
    }
}

/// Drives any [`ChunkSource`] as a [`ByteStream`].
///
/// Honors [`pull_sized`](ByteStream::pull_sized) by forwarding the request
/// to the source on every step; plain [`pull`](ByteStream::pull) requests
/// [`DEFAULT_READ_SIZE`].
#[derive(Debug)]
pub struct SourceStream<P> {
    source: P,
}

impl<P: ChunkSource> SourceStream<P> {
    /// Wraps a source.
    pub fn new(source: P) -> Self {
        Self { source }
    }
}

impl<P: ChunkSource> ByteStream for SourceStream<P> {
    type Done = io::Result<()>;

    fn pull(&mut self) -> Step<io::Result<()>> {
        self.pull_sized(DEFAULT_READ_SIZE)
    }

    fn pull_sized(&mut self, size: usize) -> Step<io::Result<()>> {
        match self.source.is_at_end() {
            Ok(true) => Step::Done(Ok(())),
            Ok(false) => match self.source.read_chunk(size) {
                Ok(chunk) => Step::Chunk(chunk),
                Err(e) => Step::Done(Err(e)),
            },
            Err(e) => Step::Done(Err(e)),
        }
    }
}

/// Drives a [`Read`] directly as a [`ByteStream`].
///
/// Reads are capped at the configured capacity unless a pull requests a
/// size, in which case that request wins for the step. End of stream is a
/// zero-length read, per the `Read` contract.
#[derive(Debug)]
pub struct ReaderStream<R> {
    reader: R,
    capacity: usize,
    finished: bool,
}

impl<R: Read> ReaderStream<R> {
    /// Wraps a reader with the default chunk capacity.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_READ_SIZE)
    }

    /// Wraps a reader reading at most `capacity` bytes per chunk.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            capacity: capacity.max(1),
            finished: false,
        }
    }
}

impl<R: Read> ByteStream for ReaderStream<R> {
    type Done = io::Result<()>;

    fn pull(&mut self) -> Step<io::Result<()>> {
        let capacity = self.capacity;
        self.pull_sized(capacity)
    }

    fn pull_sized(&mut self, size: usize) -> Step<io::Result<()>> {
        if self.finished {
            return Step::Done(Ok(()));
        }
        let mut buf = vec![0u8; size.max(1)];
        match self.reader.read(&mut buf) {
            Ok(0) => {
                self.finished = true;
                Step::Done(Ok(()))
            }
            Ok(n) => {
                buf.truncate(n);
                Step::Chunk(Bytes::from(buf))
            }
            Err(e) => {
                self.finished = true;
                Step::Done(Err(e))
            }
        }
    }
}

/// A [`ChunkSink`] over any [`Write`].
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwraps the sink into the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChunkSink for WriterSink<W> {
    fn write_chunk(&mut self, chunk: Bytes) -> io::Result<()> {
        self.writer.write_all(&chunk)
    }
}

/// Drains `stream` into `sink`, chunk by chunk.
///
/// Returns the stream's terminal value; a sink error aborts the drain and
/// leaves the stream suspended where it was.
pub fn drain_to<S, K>(mut stream: S, sink: &mut K) -> io::Result<S::Done>
where
    S: ByteStream,
    K: ChunkSink,
{
    loop {
        match stream.pull() {
            Step::Chunk(chunk) => sink.write_chunk(chunk)?,
            Step::Done(done) => return Ok(done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::ByteStreamFold;

    #[test]
    fn test_once_is_single_chunk() {
        let mut stream = once("hello");
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"hello"));
        assert!(stream.pull().is_done());
    }

    #[test]
    fn test_from_chunks_one_chunk_per_slice() {
        let mut stream = from_chunks(["ab", "", "cd"]);
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"ab"));
        assert!(matches!(stream.pull(), Step::Chunk(c) if c.is_empty()));
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"cd"));
        assert!(stream.pull().is_done());
    }

    #[test]
    fn test_empty_completes_immediately() {
        assert!(empty().pull().is_done());
    }

    #[test]
    fn test_bytes_source_honors_size_requests() {
        let mut stream = SourceStream::new(BytesSource::new("abcdef"));
        assert!(matches!(stream.pull_sized(4), Step::Chunk(c) if &c[..] == b"abcd"));
        assert!(matches!(stream.pull_sized(1), Step::Chunk(c) if &c[..] == b"e"));
        assert!(matches!(stream.pull_sized(100), Step::Chunk(c) if &c[..] == b"f"));
        assert!(matches!(stream.pull_sized(4), Step::Done(Ok(()))));
    }

    #[test]
    fn test_buf_source_round_trip() {
        let data = b"some buffered data".as_slice();
        let (bytes, done) = SourceStream::new(BufSource::new(data)).collect_bytes();
        assert_eq!(&bytes[..], b"some buffered data");
        assert!(done.is_ok());
    }

    #[test]
    fn test_reader_stream_caps_chunks() {
        let data = b"abcdefgh".as_slice();
        let mut stream = ReaderStream::with_capacity(data, 3);
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"abc"));
        assert!(matches!(stream.pull_sized(2), Step::Chunk(c) if &c[..] == b"de"));
        assert!(matches!(stream.pull(), Step::Chunk(c) if &c[..] == b"fgh"));
        assert!(matches!(stream.pull(), Step::Done(Ok(()))));
    }

    #[test]
    fn test_reader_stream_propagates_errors_as_terminal() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "medium failure"))
            }
        }
        let mut stream = ReaderStream::new(Failing);
        let Step::Done(Err(e)) = stream.pull() else {
            panic!("expected the error as the terminal value")
        };
        assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_drain_to_writer() {
        let mut sink = WriterSink::new(Vec::new());
        let done = drain_to(from_chunks(["He", "llo"]), &mut sink).unwrap();
        assert_eq!(done, ());
        assert_eq!(sink.into_inner(), b"Hello");
    }

    #[test]
    fn test_drain_to_vec_sink_preserves_chunking() {
        let mut sink: Vec<Bytes> = Vec::new();
        drain_to(from_chunks(["ab", "cd"]), &mut sink).unwrap();
        assert_eq!(sink, [Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]);
    }
}
