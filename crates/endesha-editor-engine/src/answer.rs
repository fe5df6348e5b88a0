//! Answer records and the form session that creates or edits one.

use serde::{Deserialize, Deserializer, Serialize};

use crate::controller::EditorController;
use crate::markdown::ProjectorConfig;
use crate::permissions::{ANSWERS_PATH, Permissions, Verb};

/// An answer as the answers API stores it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub short_description: String,
    /// Raw content JSON, see [`crate::codec`]
    pub answer: String,
    #[serde(default)]
    pub answer_md: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RecordId>::deserialize(deserializer)?.map(|id| match id {
        RecordId::Text(text) => text,
        RecordId::Number(number) => number.to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a short description is required")]
    MissingDescription,
    #[error("not permitted to {verb} {path}")]
    Forbidden { path: String, verb: Verb },
}

/// What to send to the answers API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(AnswerRecord),
    Update(AnswerRecord),
}

impl SaveRequest {
    pub fn path(&self) -> &'static str {
        ANSWERS_PATH
    }

    pub fn verb(&self) -> Verb {
        match self {
            SaveRequest::Create(_) => Verb::Post,
            SaveRequest::Update(_) => Verb::Patch,
        }
    }

    pub fn record(&self) -> &AnswerRecord {
        match self {
            SaveRequest::Create(record) | SaveRequest::Update(record) => record,
        }
    }
}

/// State of the answer details form.
#[derive(Debug, Clone)]
pub struct AnswerSession {
    id: Option<String>,
    short_description: String,
    editor: EditorController,
}

impl AnswerSession {
    /// A form for a new answer.
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            id: None,
            short_description: String::new(),
            editor: EditorController::new(config),
        }
    }

    /// A form editing `record`. Undecodable content is reported through
    /// the editor's errors rather than failing here.
    pub fn from_record(record: &AnswerRecord, config: ProjectorConfig) -> Self {
        let mut editor = EditorController::new(config);
        editor.load(&record.answer, &record.answer_md);
        Self {
            id: record.id.clone(),
            short_description: record.short_description.clone(),
            editor,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn set_short_description(&mut self, description: impl Into<String>) {
        self.short_description = description.into();
    }

    pub fn editor(&self) -> &EditorController {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorController {
        &mut self.editor
    }

    pub fn can_view(&self, permissions: &impl Permissions) -> bool {
        permissions.can_perform(ANSWERS_PATH, Verb::Get)
    }

    fn save_verb(&self) -> Verb {
        if self.is_update() {
            Verb::Patch
        } else {
            Verb::Post
        }
    }

    pub fn can_save(&self, permissions: &impl Permissions) -> bool {
        permissions.can_perform(ANSWERS_PATH, self.save_verb())
    }

    /// Build the request saving this form. Both content fields come from a
    /// single snapshot of the editor.
    pub fn submit(&self, permissions: &impl Permissions) -> Result<SaveRequest, SessionError> {
        if !self.can_save(permissions) {
            return Err(SessionError::Forbidden {
                path: ANSWERS_PATH.to_string(),
                verb: self.save_verb(),
            });
        }
        if self.short_description.trim().is_empty() {
            return Err(SessionError::MissingDescription);
        }

        let saved = self.editor.save();
        let record = AnswerRecord {
            id: self.id.clone(),
            short_description: self.short_description.clone(),
            answer: saved.json,
            answer_md: saved.markdown,
        };
        log::debug!(
            "submitting answer {}",
            record.id.as_deref().unwrap_or("(new)")
        );
        Ok(if self.is_update() {
            SaveRequest::Update(record)
        } else {
            SaveRequest::Create(record)
        })
    }
}
