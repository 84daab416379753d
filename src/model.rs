use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level stored entity: a named grouping of files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub files: Vec<StoredFile>,
    pub created_at: DateTime<Utc>,
}

/// A name/content pair owned by exactly one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// Request body for subject creation and rename.
///
/// Fields are optional so a missing field reaches validation and comes back
/// as a 400 with a message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct NewSubject {
    pub name: Option<String>,
}

/// Request body for adding a file to a subject.
#[derive(Debug, Deserialize)]
pub struct NewFile {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Returns the trimmed value when present and non-empty.
pub fn non_empty_trimmed(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Server-side file id: millisecond timestamp plus a random alphanumeric
/// suffix. Practically unique without a global sequence.
pub fn generate_file_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}
