//! Bounded splitting, grouping, and joining.
//!
//! - [`split_at`] / [`SplitAt`] - divide a stream at a byte offset into an
//!   emitted prefix and an untouched continuation
//! - [`chunks_of`] / [`Grouped`] / [`Group`] - unfold a stream into a lazy
//!   sequence of bounded sub-streams sharing one terminal value
//! - [`Intercalate`] - flatten a grouped stream back into one stream with a
//!   separator between adjacent groups
//!
//! [`chunks_of`] and [`Intercalate`] are structural inverses: joining with
//! an empty separator reproduces the original bytes exactly.

mod bounded;
mod groups;

pub use bounded::{SplitAt, SplitEnd, split_at};
pub use groups::{Group, GroupStep, Grouped, Intercalate, chunks_of};
