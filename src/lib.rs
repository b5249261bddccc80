pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod folder;
pub mod mailer;
pub mod model;
pub mod store;

pub use crate::config::AppConfig;
pub use engine::NotifyEngine;
pub use error::{Error, Result};
pub use folder::{FolderStore, LocalFolderStore};
pub use mailer::{Mailer, Notification};
pub use model::{Blob, CheckSummary, FileEntry, FileSummary, FolderConfig, FolderSummary};
pub use store::{ConfigStore, MemoryStore, RocksStore};
