use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification settings for one monitored folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    pub email: String,
    pub attach_content: bool,
    pub per_file_notify: bool,
}

impl FolderConfig {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Default::default()
        }
    }

    pub fn with_attach_content(mut self, attach_content: bool) -> Self {
        self.attach_content = attach_content;
        self
    }

    pub fn with_per_file_notify(mut self, per_file_notify: bool) -> Self {
        self.per_file_notify = per_file_notify;
        self
    }
}

/// A file as enumerated by a folder store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

/// File content ready to be attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    pub sent: bool,
}

impl FileSummary {
    pub fn from_entry(file: &FileEntry) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            url: file.url.clone(),
            sent: false,
        }
    }
}

/// Files matched in one folder during one run, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSummary {
    pub id: String,
    pub name: String,
    pub files: Vec<FileSummary>,
}

/// Report of the last completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub folders: Vec<FolderSummary>,
    pub attempted: u32,
    pub sent: u32,
}

impl CheckSummary {
    pub fn total_files(&self) -> usize {
        self.folders.iter().map(|f| f.files.len()).sum()
    }
}
