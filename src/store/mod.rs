//! Durable key-value state: per-folder settings, plus the watermark and
//! last-run summary owned by the engine.

mod memory;
mod rocks;

pub use memory::MemoryStore;
pub use rocks::RocksStore;

use crate::error::Result;
use crate::model::{CheckSummary, FolderConfig};
use chrono::{DateTime, Utc};

pub const LAST_CHECK_KEY: &str = "lastCheck";
pub const LAST_SUMMARY_KEY: &str = "lastSummary";
pub const FOLDER_KEY_PREFIX: &str = "folder/";

pub trait ConfigStore {
    /// Monitored folder ids, in a stable order.
    fn list_folder_ids(&self) -> Result<Vec<String>>;

    fn folder_config(&self, id: &str) -> Result<Option<FolderConfig>>;

    fn set_folder_config(&self, id: &str, config: &FolderConfig) -> Result<()>;

    fn remove_folder(&self, id: &str) -> Result<()>;

    fn watermark(&self) -> Result<Option<DateTime<Utc>>>;

    fn set_watermark(&self, watermark: DateTime<Utc>) -> Result<()>;

    fn last_summary(&self) -> Result<Option<CheckSummary>>;

    fn set_last_summary(&self, summary: &CheckSummary) -> Result<()>;

    /// Persist the end-of-run state. Stores that can write both values
    /// atomically should override this.
    fn commit_run(&self, watermark: DateTime<Utc>, summary: &CheckSummary) -> Result<()> {
        self.set_watermark(watermark)?;
        self.set_last_summary(summary)
    }
}

/// Start monitoring `id`, or update its settings. The first folder added to a
/// store without a watermark seeds it with `now`, so files that already exist
/// are not announced.
pub fn monitor_folder<C: ConfigStore + ?Sized>(
    store: &C,
    id: &str,
    config: &FolderConfig,
    now: DateTime<Utc>,
) -> Result<()> {
    store.set_folder_config(id, config)?;
    if store.watermark()?.is_none() {
        store.set_watermark(now)?;
    }
    Ok(())
}

pub(crate) fn folder_key(id: &str) -> String {
    format!("{}{}", FOLDER_KEY_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_monitor_folder_seeds_watermark_once() {
        let store = MemoryStore::new();
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();

        monitor_folder(&store, "inbox", &FolderConfig::new("a@example.com"), first).unwrap();
        monitor_folder(
            &store,
            "inbox",
            &FolderConfig::new("b@example.com").with_per_file_notify(true),
            later,
        )
        .unwrap();

        assert_eq!(store.watermark().unwrap(), Some(first));
        let config = store.folder_config("inbox").unwrap().unwrap();
        assert_eq!(config.email, "b@example.com");
        assert!(config.per_file_notify);
        assert!(!config.attach_content);
    }
}
