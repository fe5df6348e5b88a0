/*!
 * # Editing
 *
 * Every change to a [`Document`](crate::content::Document) is an
 * [`EditOp`] applied through [`apply_edit`]. Application is functional:
 * the input document is left untouched and an edited copy is returned, or
 * an [`EditError`] when the operation does not fit the document (unknown
 * block, range past the end of the text, offset inside a surrogate pair).
 *
 * Ranges follow the text through edits:
 *
 * - typed text inherits the styles of the character before it, but only
 *   joins an entity when typed strictly inside it
 * - deleting text shrinks or drops the ranges it overlapped
 * - toggling a style removes it when it already covers the whole range
 * - applying an entity carves the range out of any entity already there
 *
 * Entities no range refers to any more are dropped after each edit.
 */

mod apply;
mod commands;
mod ranges;

pub use apply::apply_edit;
pub use commands::{EditError, EditOp};
