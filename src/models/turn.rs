use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// An uploaded file, held in memory for the life of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl FileRef {
    pub fn new<N, M>(name: N, media_type: M, data: Vec<u8>) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        FileRef {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }
}

/// A locally resolvable reference to a converted payload written to disk.
/// The file stays on disk for the process lifetime; expiry is the embedding
/// application's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: String,
    pub path: PathBuf,
}

/// One entry in the conversation history. Turns are immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created: i64,
    /// Non-empty only on user turns that carried an upload.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
    /// The capability identifier, set only on function turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    /// Set only on function turns whose conversion succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
}

impl Turn {
    fn new(role: Role) -> Self {
        Turn {
            id: Uuid::new_v4().to_string(),
            role,
            content: String::new(),
            created: Utc::now().timestamp(),
            files: Vec::new(),
            capability: None,
            artifact: None,
        }
    }

    /// Create a new user turn with the current timestamp
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Create a new assistant turn with the current timestamp
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Create a function turn carrying a capability's result summary
    pub fn function<N, S>(capability: N, message: S, artifact: Option<Artifact>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        let mut turn = Self::new(Role::Function);
        turn.content = message.into();
        turn.capability = Some(capability.into());
        turn.artifact = artifact;
        turn
    }

    /// Set the text content of the turn
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.content = text.into();
        self
    }

    /// Attach uploaded files to the turn
    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.files = files;
        self
    }
}
