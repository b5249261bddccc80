use super::ConfigStore;
use crate::error::Result;
use crate::model::{CheckSummary, FolderConfig};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    folders: BTreeMap<String, FolderConfig>,
    watermark: Option<DateTime<Utc>>,
    last_summary: Option<CheckSummary>,
}

/// In-memory store. Folder ids are returned in sorted order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigStore for MemoryStore {
    fn list_folder_ids(&self) -> Result<Vec<String>> {
        Ok(self.state().folders.keys().cloned().collect())
    }

    fn folder_config(&self, id: &str) -> Result<Option<FolderConfig>> {
        Ok(self.state().folders.get(id).cloned())
    }

    fn set_folder_config(&self, id: &str, config: &FolderConfig) -> Result<()> {
        self.state()
            .folders
            .insert(id.to_string(), config.clone());
        Ok(())
    }

    fn remove_folder(&self, id: &str) -> Result<()> {
        self.state().folders.remove(id);
        Ok(())
    }

    fn watermark(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.state().watermark)
    }

    fn set_watermark(&self, watermark: DateTime<Utc>) -> Result<()> {
        self.state().watermark = Some(watermark);
        Ok(())
    }

    fn last_summary(&self) -> Result<Option<CheckSummary>> {
        Ok(self.state().last_summary.clone())
    }

    fn set_last_summary(&self, summary: &CheckSummary) -> Result<()> {
        self.state().last_summary = Some(summary.clone());
        Ok(())
    }

    fn commit_run(&self, watermark: DateTime<Utc>, summary: &CheckSummary) -> Result<()> {
        let mut state = self.state();
        state.watermark = Some(watermark);
        state.last_summary = Some(summary.clone());
        Ok(())
    }
}
