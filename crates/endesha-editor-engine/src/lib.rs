pub mod answer;
pub mod codec;
pub mod content;
pub mod controller;
pub mod editing;
pub mod io;
pub mod markdown;
pub mod permissions;
pub mod preview;

// Re-export key types for easier usage
pub use answer::{AnswerRecord, AnswerSession, SaveRequest, SessionError};
pub use codec::{DecodeError, decode, encode};
pub use content::*;
pub use controller::{EditorController, EditorError, EditorMode, SavedContent};
pub use editing::{EditError, EditOp, apply_edit};
pub use io::*;
pub use markdown::{ProjectorConfig, project};
pub use permissions::{Permission, PermissionSet, Permissions, Verb};
