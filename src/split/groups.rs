//! The grouper and joiner - [`chunks_of`] and [`Intercalate`].

use std::mem;
use std::num::NonZeroU64;

use bytes::Bytes;

use crate::cursor::Cursor;
use crate::stream::{ByteStream, Step};

/// Divides `stream` into a lazy sequence of sub-streams of at most `size`
/// bytes each.
///
/// Nothing is demanded from the stream until a group is asked for: the
/// sequence unfolds one group at a time, and each [`Group`] must be drawn
/// before the next exists. Groups are bounded, never padded - every group
/// except possibly the last holds exactly `size` bytes.
///
/// The degenerate group size of zero is unrepresentable: `size` is a
/// [`NonZeroU64`].
///
/// # Example
///
/// ```
/// use std::num::NonZeroU64;
/// use bytepipe::{chunks_of, from_chunks, ByteStreamFold, GroupStep};
///
/// let mut grouped = chunks_of(from_chunks(["Hello, world"]), NonZeroU64::new(5).unwrap());
/// let mut groups = Vec::new();
/// loop {
///     match grouped.next_group() {
///         GroupStep::Group(group) => {
///             let (bytes, rest) = group.collect_bytes();
///             groups.push(bytes);
///             grouped = rest;
///         }
///         GroupStep::Done(()) => break,
///     }
/// }
/// assert_eq!(groups, ["Hello", ", wor", "ld"]);
/// ```
pub fn chunks_of<S: ByteStream>(stream: S, size: NonZeroU64) -> Grouped<S> {
    Grouped {
        cursor: Cursor::new(stream),
        size,
    }
}

/// A lazily unfolding sequence of bounded sub-streams.
///
/// Produced by [`chunks_of`]; all groups share the underlying stream's
/// terminal value, surfaced by the final [`GroupStep::Done`].
pub struct Grouped<S: ByteStream> {
    cursor: Cursor<S>,
    size: NonZeroU64,
}

impl<S: ByteStream> Grouped<S> {
    /// Unfolds one step: the next non-empty group, or the terminal value.
    ///
    /// Demands at most one chunk to decide, and pushes it back so the
    /// group re-emits it untouched.
    pub fn next_group(mut self) -> GroupStep<S> {
        match self.cursor.draw_step() {
            Step::Chunk(chunk) => {
                self.cursor.push_back(chunk);
                GroupStep::Group(Group {
                    cursor: Some(self.cursor),
                    remaining: self.size.get(),
                    size: self.size,
                })
            }
            Step::Done(done) => GroupStep::Done(done),
        }
    }

    /// Joins the groups back into one stream, emitting `separator` between
    /// each pair of adjacent groups - none before the first, none after
    /// the last.
    ///
    /// With an empty separator this is the exact inverse of [`chunks_of`]:
    /// the joined stream reproduces the original bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZeroU64;
    /// use bytepipe::{chunks_of, from_chunks, ByteStreamFold};
    ///
    /// let grouped = chunks_of(from_chunks(["Hello, world"]), NonZeroU64::new(5).unwrap());
    /// let (joined, ()) = grouped.intercalate("|").collect_bytes();
    /// assert_eq!(&joined[..], b"Hello|, wor|ld");
    /// ```
    pub fn intercalate(self, separator: impl Into<Bytes>) -> Intercalate<S> {
        Intercalate {
            separator: separator.into(),
            state: JoinState::Start(self),
        }
    }
}

/// One unfolding step of a [`Grouped`] stream.
pub enum GroupStep<S: ByteStream> {
    /// The next bounded sub-stream.
    Group(Group<S>),

    /// No groups remain; the underlying stream's terminal value.
    Done(S::Done),
}

/// A sub-stream bounded to at most `size` bytes.
///
/// Fully drawn, a group completes with the rest of the [`Grouped`]
/// sequence, which is the only way to reach the next group: the sequence
/// is forward-only and single-pass.
pub struct Group<S: ByteStream> {
    cursor: Option<Cursor<S>>,
    remaining: u64,
    size: NonZeroU64,
}

impl<S: ByteStream> ByteStream for Group<S> {
    type Done = Grouped<S>;

    fn pull(&mut self) -> Step<Grouped<S>> {
        let mut cursor = self.cursor.take().expect("stream pulled after completion");
        if self.remaining == 0 {
            return Step::Done(Grouped {
                cursor,
                size: self.size,
            });
        }
        match cursor.draw() {
            Some(mut chunk) => {
                if chunk.len() as u64 > self.remaining {
                    let prefix = chunk.split_to(self.remaining as usize);
                    cursor.push_back(chunk);
                    chunk = prefix;
                    self.remaining = 0;
                } else {
                    self.remaining -= chunk.len() as u64;
                }
                self.cursor = Some(cursor);
                Step::Chunk(chunk)
            }
            None => Step::Done(Grouped {
                cursor,
                size: self.size,
            }),
        }
    }
}

/// Stream returned by [`Grouped::intercalate`].
pub struct Intercalate<S: ByteStream> {
    separator: Bytes,
    state: JoinState<S>,
}

enum JoinState<S: ByteStream> {
    /// Before the first group; no separator due.
    Start(Grouped<S>),

    /// Inside a group.
    Body(Group<S>),

    /// Terminal value delivered, or state temporarily moved out.
    Finished,
}

impl<S: ByteStream> ByteStream for Intercalate<S> {
    type Done = S::Done;

    fn pull(&mut self) -> Step<S::Done> {
        loop {
            match mem::replace(&mut self.state, JoinState::Finished) {
                JoinState::Start(grouped) => match grouped.next_group() {
                    GroupStep::Group(group) => self.state = JoinState::Body(group),
                    GroupStep::Done(done) => return Step::Done(done),
                },
                JoinState::Body(mut group) => match group.pull() {
                    Step::Chunk(chunk) => {
                        self.state = JoinState::Body(group);
                        return Step::Chunk(chunk);
                    }
                    Step::Done(grouped) => match grouped.next_group() {
                        GroupStep::Group(next) => {
                            self.state = JoinState::Body(next);
                            if !self.separator.is_empty() {
                                return Step::Chunk(self.separator.clone());
                            }
                        }
                        GroupStep::Done(done) => return Step::Done(done),
                    },
                },
                JoinState::Finished => panic!("stream pulled after completion"),
            }
        }
    }
}
