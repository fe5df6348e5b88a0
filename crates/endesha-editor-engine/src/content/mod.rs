//! Structured answer content.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus a map of
//! [`Entity`]s. Blocks carry their text, a [`BlockKind`], inline style
//! ranges and entity ranges. All offsets are UTF-16 code units, the unit
//! stored answers were written in; see [`offsets`].

mod block;
mod document;
mod entity;
pub mod offsets;

pub use block::{
    Block, BlockKey, BlockKind, EntityRange, InlineStyle, MAX_HEADING_LEVEL, MAX_LIST_DEPTH,
    StyleRange,
};
pub use document::{Document, InvariantError};
pub use entity::{Entity, EntityKey, EntityKind, Mutability};
