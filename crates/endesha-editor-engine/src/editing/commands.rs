use std::ops::Range;

use crate::content::{BlockKey, BlockKind, Entity, InlineStyle};

/// Edit operations that can be applied to a document.
///
/// Offsets and ranges are UTF-16 code units within the named block.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    InsertText {
        block: BlockKey,
        offset: usize,
        text: String,
    },
    DeleteRange {
        block: BlockKey,
        range: Range<usize>,
    },
    /// Remove `style` from `range` when it already covers all of it,
    /// otherwise apply it over the whole range.
    ToggleStyle {
        block: BlockKey,
        range: Range<usize>,
        style: InlineStyle,
    },
    SetBlockKind {
        block: BlockKey,
        kind: BlockKind,
    },
    SetDepth {
        block: BlockKey,
        depth: u8,
    },
    /// Attach a new entity to `range`, replacing any entity already there.
    ApplyEntity {
        block: BlockKey,
        range: Range<usize>,
        entity: Entity,
    },
    RemoveEntity {
        block: BlockKey,
        range: Range<usize>,
    },
    /// Split the block at `offset`; the tail becomes a new block below.
    SplitBlock {
        block: BlockKey,
        offset: usize,
    },
    RemoveBlock {
        block: BlockKey,
    },
}

impl EditOp {
    /// The block this operation targets.
    pub fn block(&self) -> &BlockKey {
        match self {
            EditOp::InsertText { block, .. }
            | EditOp::DeleteRange { block, .. }
            | EditOp::ToggleStyle { block, .. }
            | EditOp::SetBlockKind { block, .. }
            | EditOp::SetDepth { block, .. }
            | EditOp::ApplyEntity { block, .. }
            | EditOp::RemoveEntity { block, .. }
            | EditOp::SplitBlock { block, .. }
            | EditOp::RemoveBlock { block } => block,
        }
    }
}

/// Reasons an edit is rejected. A rejected edit leaves the document as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no block with key `{0}`")]
    UnknownBlock(BlockKey),
    #[error("range {start}..{end} is outside block `{block}` of length {len}")]
    OutOfBounds {
        block: BlockKey,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("offset {offset} splits a character in block `{block}`")]
    NotCharBoundary { block: BlockKey, offset: usize },
    #[error("{op} needs a non-empty range")]
    EmptyRange { op: &'static str },
    #[error("heading level {0} is outside 1..=6")]
    HeadingLevel(u8),
    #[error("list depth {depth} exceeds the maximum of {max}")]
    DepthOutOfRange { depth: u8, max: u8 },
    #[error("no free entity key left")]
    EntityKeysExhausted,
}
