//! Editor state behind the answer form's content field.
//!
//! The controller owns the [`Document`] and the Markdown string shown in
//! plain mode. In rich mode every edit goes through the document and the
//! Markdown is reprojected; in plain mode the Markdown is edited directly
//! and the document is left as it was. Switching from plain back to rich
//! is refused since Markdown is never parsed back into a document.

use crate::codec::{self, DecodeError};
use crate::content::Document;
use crate::editing::{EditError, EditOp, apply_edit};
use crate::markdown::{ProjectorConfig, project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Rich,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("structured edits are unavailable in plain mode")]
    PlainMode,
    #[error("plain text edits are unavailable in rich mode")]
    RichMode,
    #[error("plain markdown cannot be converted back to rich content")]
    RichFromPlain,
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Both stored representations of the content, taken from one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedContent {
    pub json: String,
    pub markdown: String,
}

#[derive(Debug, Clone)]
pub struct EditorController {
    document: Document,
    markdown: String,
    mode: EditorMode,
    config: ProjectorConfig,
    errors: Vec<DecodeError>,
}

impl EditorController {
    /// Rich mode over an empty document.
    pub fn new(config: ProjectorConfig) -> Self {
        let document = Document::new();
        let markdown = project(&document, &config);
        Self {
            document,
            markdown,
            mode: EditorMode::Rich,
            config,
            errors: Vec::new(),
        }
    }

    pub fn on_edit(&mut self, op: EditOp) -> Result<(), EditorError> {
        if self.mode != EditorMode::Rich {
            return Err(EditorError::PlainMode);
        }
        self.document = apply_edit(&self.document, op)?;
        self.markdown = project(&self.document, &self.config);
        Ok(())
    }

    pub fn on_plain_text_change(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        if self.mode != EditorMode::Plain {
            return Err(EditorError::RichMode);
        }
        self.markdown = text.into();
        Ok(())
    }

    pub fn switch_to_plain(&mut self) {
        if self.mode == EditorMode::Plain {
            return;
        }
        log::debug!("switching editor to plain mode");
        self.markdown = project(&self.document, &self.config);
        self.mode = EditorMode::Plain;
    }

    pub fn switch_to_rich(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::Rich => Ok(()),
            EditorMode::Plain => Err(EditorError::RichFromPlain),
        }
    }

    /// Replace the state with stored content.
    ///
    /// Content that fails to decode is reported through [`errors`] and
    /// leaves an empty document alongside the stored Markdown. Content
    /// with nothing in it next to non-empty Markdown was written in plain
    /// mode and reopens there.
    ///
    /// [`errors`]: EditorController::errors
    pub fn load(&mut self, json: &str, markdown: &str) {
        match codec::decode(json) {
            Ok(document) if !document.has_text() && !markdown.trim().is_empty() => {
                log::debug!("stored content is empty, opening stored markdown in plain mode");
                self.document = document;
                self.markdown = markdown.to_string();
                self.mode = EditorMode::Plain;
            }
            Ok(document) => {
                self.markdown = project(&document, &self.config);
                self.document = document;
                self.mode = EditorMode::Rich;
            }
            Err(err) => {
                log::warn!("could not decode stored answer content: {err}");
                self.document = Document::new();
                self.markdown = markdown.to_string();
                self.mode = EditorMode::Rich;
                self.errors.push(err);
            }
        }
    }

    pub fn save(&self) -> SavedContent {
        SavedContent {
            json: codec::encode(&self.document),
            markdown: self.markdown.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Decode failures not yet dismissed by the user.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(ProjectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockKey, BlockKind, Entity, EntityKey, InlineStyle};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn first_key(editor: &EditorController) -> BlockKey {
        editor.document().first_block_key().clone()
    }

    fn type_text(editor: &mut EditorController, text: &str) {
        let block = first_key(editor);
        let offset = editor.document().blocks()[0].len();
        editor
            .on_edit(EditOp::InsertText {
                block,
                offset,
                text: text.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_new_controller_is_rich_and_empty() {
        let editor = EditorController::default();
        assert_eq!(editor.mode(), EditorMode::Rich);
        assert_eq!(editor.markdown(), "");
        assert!(!editor.document().has_text());
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn test_rich_edits_reproject() {
        let mut editor = EditorController::default();
        type_text(&mut editor, "Hello");
        let block = first_key(&editor);
        editor
            .on_edit(EditOp::SetBlockKind {
                block: block.clone(),
                kind: BlockKind::Header(1),
            })
            .unwrap();
        assert_eq!(editor.markdown(), "# Hello");

        editor
            .on_edit(EditOp::ToggleStyle {
                block,
                range: 0..5,
                style: InlineStyle::Bold,
            })
            .unwrap();
        assert_eq!(editor.markdown(), "# **Hello**");
    }

    #[test]
    fn test_failed_edit_keeps_state() {
        let mut editor = EditorController::default();
        type_text(&mut editor, "Hi");
        let before = editor.save();

        let result = editor.on_edit(EditOp::DeleteRange {
            block: first_key(&editor),
            range: 0..10,
        });
        assert!(matches!(
            result,
            Err(EditorError::Edit(EditError::OutOfBounds { .. }))
        ));
        assert_eq!(editor.save(), before);
    }

    #[test]
    fn test_plain_text_change_leaves_document() {
        let mut editor = EditorController::default();
        type_text(&mut editor, "Hello");
        editor.switch_to_plain();
        assert_eq!(editor.mode(), EditorMode::Plain);
        assert_eq!(editor.markdown(), "Hello");

        let document = editor.document().clone();
        editor.on_plain_text_change("# Rewritten").unwrap();
        assert_eq!(editor.markdown(), "# Rewritten");
        assert_eq!(editor.document(), &document);
    }

    #[test]
    fn test_mode_guards() {
        let mut editor = EditorController::default();
        assert_eq!(
            editor.on_plain_text_change("text"),
            Err(EditorError::RichMode)
        );

        editor.switch_to_plain();
        let op = EditOp::InsertText {
            block: first_key(&editor),
            offset: 0,
            text: "x".to_string(),
        };
        assert_eq!(editor.on_edit(op), Err(EditorError::PlainMode));
        assert_eq!(editor.switch_to_rich(), Err(EditorError::RichFromPlain));
        assert_eq!(editor.mode(), EditorMode::Plain);
    }

    #[test]
    fn test_switch_to_plain_is_idempotent() {
        let mut editor = EditorController::default();
        type_text(&mut editor, "Hello");
        editor.switch_to_plain();
        editor.on_plain_text_change("edited").unwrap();
        editor.switch_to_plain();
        assert_eq!(editor.markdown(), "edited");
    }

    #[test]
    fn test_load_valid_content() {
        let mut source = EditorController::default();
        type_text(&mut source, "Stop at the line");
        let saved = source.save();

        let mut editor = EditorController::default();
        editor.switch_to_plain();
        editor.load(&saved.json, "stale markdown");
        assert_eq!(editor.mode(), EditorMode::Rich);
        assert_eq!(editor.document(), source.document());
        assert_eq!(editor.markdown(), "Stop at the line");
    }

    #[rstest]
    #[case("{}")]
    #[case("")]
    fn test_failed_decode_falls_back_to_empty_document(#[case] stored: &str) {
        let mut editor = EditorController::default();
        editor.load(stored, "**kept** markdown");

        assert!(!editor.document().has_text());
        assert_eq!(editor.markdown(), "**kept** markdown");
        assert_eq!(editor.errors().len(), 1);
        assert!(matches!(editor.errors()[0], DecodeError::Json { .. }));

        editor.clear_errors();
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn test_link_after_highest_entity_key() {
        let stored = r#"{
            "blocks": [{"key": "k1", "text": "Check mirrors", "type": "unstyled",
                        "entityRanges": [{"offset": 0, "length": 5, "key": 4294967295}]}],
            "entityMap": {"4294967295": {"type": "LINK", "data": {"url": "https://endesha.example/check"}}}
        }"#;
        let mut editor = EditorController::default();
        editor.load(stored, "");
        assert!(editor.errors().is_empty());

        editor
            .on_edit(EditOp::ApplyEntity {
                block: first_key(&editor),
                range: 6..13,
                entity: Entity::link("https://endesha.example/mirrors"),
            })
            .unwrap();

        let doc = editor.document();
        assert_eq!(
            doc.entity(EntityKey(u32::MAX)).unwrap().data_str("url"),
            Some("https://endesha.example/check")
        );
        assert_eq!(
            doc.entity(EntityKey(0)).unwrap().data_str("url"),
            Some("https://endesha.example/mirrors")
        );
        assert_eq!(
            editor.markdown(),
            "[Check](https://endesha.example/check) [mirrors](https://endesha.example/mirrors)"
        );
    }

    #[test]
    fn test_empty_content_with_markdown_opens_plain() {
        let empty = codec::encode(&Document::new());
        let mut editor = EditorController::default();
        editor.load(&empty, "Written in plain mode");
        assert_eq!(editor.mode(), EditorMode::Plain);
        assert_eq!(editor.markdown(), "Written in plain mode");
    }

    #[test]
    fn test_save_produces_both_representations() {
        let mut editor = EditorController::default();
        type_text(&mut editor, "Mirrors");
        let saved = editor.save();
        assert_eq!(saved.markdown, "Mirrors");
        assert_eq!(codec::decode(&saved.json).as_ref(), Ok(editor.document()));
    }
}
