use super::{folder_key, ConfigStore, FOLDER_KEY_PREFIX, LAST_CHECK_KEY, LAST_SUMMARY_KEY};
use crate::error::Result;
use crate::model::{CheckSummary, FolderConfig};
use chrono::{DateTime, SecondsFormat, Utc};
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use tracing::*;

/// RocksDB-backed store. Values are bincode-encoded, except the watermark
/// which is kept as an RFC 3339 string.
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Using '{}' for config store", path.as_ref().display());
        let mut db_options = Options::default();
        db_options.create_if_missing(true);
        let db = DB::open(&db_options, path)?;
        Ok(Self { db })
    }

    fn get_decoded<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.db.get(key)? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }
}

fn encode_watermark(watermark: DateTime<Utc>) -> String {
    watermark.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl ConfigStore for RocksStore {
    fn list_folder_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let iter = self.db.iterator(IteratorMode::From(
            FOLDER_KEY_PREFIX.as_bytes(),
            Direction::Forward,
        ));

        for item in iter {
            let (key, _) = item?;
            let key = String::from_utf8_lossy(&key);
            match key.strip_prefix(FOLDER_KEY_PREFIX) {
                Some(id) => ids.push(id.to_string()),
                None => break,
            }
        }

        Ok(ids)
    }

    fn folder_config(&self, id: &str) -> Result<Option<FolderConfig>> {
        self.get_decoded(&folder_key(id))
    }

    fn set_folder_config(&self, id: &str, config: &FolderConfig) -> Result<()> {
        let value = bincode::serialize(config)?;
        self.db.put(folder_key(id), value)?;
        Ok(())
    }

    fn remove_folder(&self, id: &str) -> Result<()> {
        self.db.delete(folder_key(id))?;
        Ok(())
    }

    fn watermark(&self) -> Result<Option<DateTime<Utc>>> {
        match self.db.get(LAST_CHECK_KEY)? {
            Some(value) => {
                let parsed = DateTime::parse_from_rfc3339(&String::from_utf8_lossy(&value))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }

    fn set_watermark(&self, watermark: DateTime<Utc>) -> Result<()> {
        self.db.put(LAST_CHECK_KEY, encode_watermark(watermark))?;
        Ok(())
    }

    fn last_summary(&self) -> Result<Option<CheckSummary>> {
        self.get_decoded(LAST_SUMMARY_KEY)
    }

    fn set_last_summary(&self, summary: &CheckSummary) -> Result<()> {
        let value = bincode::serialize(summary)?;
        self.db.put(LAST_SUMMARY_KEY, value)?;
        Ok(())
    }

    fn commit_run(&self, watermark: DateTime<Utc>, summary: &CheckSummary) -> Result<()> {
        let mut batch = WriteBatch::default();
        batch.put(LAST_CHECK_KEY, encode_watermark(watermark));
        batch.put(LAST_SUMMARY_KEY, bincode::serialize(summary)?);
        self.db.write(batch)?;
        Ok(())
    }
}
