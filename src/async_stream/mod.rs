//! Async source adapter (feature = "async-io").
//!
//! - [`read_chunks`] - drive a `futures_io::AsyncRead` as a stream of
//!   chunks, runtime-agnostic

mod stream;

pub use stream::{ReadChunks, read_chunks, read_chunks_with_capacity};
