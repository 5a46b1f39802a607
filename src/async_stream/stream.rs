//! Async chunk source over `futures_io::AsyncRead`.
//!
//! This uses `futures_io::AsyncRead`, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes. It is
//! the asynchronous rendering of the source boundary only: one chunk is in
//! flight at a time, ordering is strict, and a read failure ends the
//! stream. The synchronous core stays synchronous.
//!
//! # Example
//!
//! ```ignore
//! use bytepipe::read_chunks;
//! use futures_util::StreamExt;
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> std::io::Result<()> {
//!     let mut chunks = read_chunks(reader);
//!
//!     while let Some(chunk) = chunks.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::source::DEFAULT_READ_SIZE;

pin_project! {
    /// A stream of chunks read from an async reader.
    ///
    /// Yields `io::Result<Bytes>`; end of input is the end of the stream,
    /// an error is yielded once and ends it.
    pub struct ReadChunks<R> {
        #[pin]
        reader: R,
        buf: Vec<u8>,
        finished: bool,
    }
}

/// Creates a chunk stream from an async reader with the default capacity.
///
/// For tokio readers, convert with `tokio_util::compat` first:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use bytepipe::read_chunks;
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let chunks = read_chunks(file.compat());
/// ```
pub fn read_chunks<R: AsyncRead>(reader: R) -> ReadChunks<R> {
    read_chunks_with_capacity(reader, DEFAULT_READ_SIZE)
}

/// Creates a chunk stream reading at most `capacity` bytes per chunk.
pub fn read_chunks_with_capacity<R: AsyncRead>(reader: R, capacity: usize) -> ReadChunks<R> {
    ReadChunks {
        reader,
        buf: vec![0u8; capacity.max(1)],
        finished: false,
    }
}

impl<R: AsyncRead> Stream for ReadChunks<R> {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.finished {
            return Poll::Ready(None);
        }
        match this.reader.poll_read(cx, &mut this.buf[..]) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(0)) => {
                *this.finished = true;
                Poll::Ready(None)
            }
            Poll::Ready(Ok(n)) => Poll::Ready(Some(Ok(Bytes::copy_from_slice(&this.buf[..n])))),
            Poll::Ready(Err(e)) => {
                *this.finished = true;
                Poll::Ready(Some(Err(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_read_chunks_empty() {
        let reader: &[u8] = &[];
        let chunks: Vec<_> = read_chunks(reader).collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_read_chunks_preserves_bytes() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let reader: &[u8] = &data;

        let chunks: Vec<_> = read_chunks_with_capacity(reader, 64).collect().await;
        let chunks: Vec<Bytes> = chunks.into_iter().collect::<io::Result<_>>().unwrap();

        assert!(chunks.iter().all(|c| c.len() <= 64));
        let flattened: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(flattened, data);
    }

    #[tokio::test]
    async fn test_read_chunks_ends_after_error() {
        struct Failing;
        impl AsyncRead for Failing {
            fn poll_read(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                _buf: &mut [u8],
            ) -> Poll<io::Result<usize>> {
                Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone")))
            }
        }

        let mut chunks = read_chunks(Failing);
        let first = chunks.next().await.unwrap();
        assert_eq!(first.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
        assert!(chunks.next().await.is_none());
    }
}
