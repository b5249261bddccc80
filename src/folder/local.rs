use super::FolderStore;
use crate::error::{Error, Result};
use crate::model::{Blob, FileEntry};
use chrono::{DateTime, Utc};
use glob::Pattern;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::*;
use walkdir::{DirEntry, WalkDir};

/// Bytes read to sniff a file's type before reading all of it.
const SNIFF_LEN: u64 = 8 * 1024;

/// Folder store over local directories. A folder id is a directory path and
/// a file id is the file's canonical path.
pub struct LocalFolderStore {
    ignore_patterns: Vec<Pattern>,
}

impl LocalFolderStore {
    pub fn new(ignore_patterns: &[String]) -> Result<Self> {
        let ignore_patterns = ignore_patterns
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .map_err(|e| Error::Other(format!("Invalid ignore pattern '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { ignore_patterns })
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.matches(name))
    }

    fn file_entry(&self, entry: &DirEntry) -> Option<FileEntry> {
        if !entry.file_type().is_file() {
            return None;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if self.is_ignored(&name) {
            debug!("Ignoring {}", entry.path().display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!("Error reading metadata for {}: {}", entry.path().display(), e);
                return None;
            }
        };

        // Not every filesystem records a birth time.
        let created = match metadata.created().or_else(|_| metadata.modified()) {
            Ok(t) => t,
            Err(e) => {
                warn!("No timestamp for {}: {}", entry.path().display(), e);
                return None;
            }
        };

        let canonical_path = match fs::canonicalize(entry.path()) {
            Ok(p) => p,
            Err(e) => {
                warn!("Error canonicalizing {}: {}", entry.path().display(), e);
                return None;
            }
        };

        Some(FileEntry {
            id: canonical_path.to_string_lossy().into_owned(),
            name,
            created_at: DateTime::<Utc>::from(created),
            url: format!("file://{}", canonical_path.display()),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sniff(path: &Path) -> Result<String> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(tree_magic_mini::from_u8(&header).to_string())
}

fn extension_for(format: &str) -> Option<&'static str> {
    match format {
        "application/pdf" => Some("pdf"),
        "text/plain" => Some("txt"),
        "text/html" => Some("html"),
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        _ => None,
    }
}

impl FolderStore for LocalFolderStore {
    fn folder_name(&self, id: &str) -> Result<String> {
        let path = Path::new(id);
        if !path.is_dir() {
            return Err(Error::FolderNotFound(id.to_string()));
        }
        let name = file_name(path);
        Ok(if name.is_empty() { id.to_string() } else { name })
    }

    fn list_files<'a>(&'a self, id: &str) -> Result<Box<dyn Iterator<Item = FileEntry> + 'a>> {
        if !Path::new(id).is_dir() {
            return Err(Error::FolderNotFound(id.to_string()));
        }

        let entries = WalkDir::new(id)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.file_entry(&entry),
                Err(e) => {
                    warn!("Error reading folder entry: {}", e);
                    None
                }
            });

        Ok(Box::new(entries))
    }

    fn content_as(&self, file_id: &str, format: &str) -> Result<Blob> {
        let path = Path::new(file_id);
        if sniff(path)? != format {
            return Err(Error::ContentConversion {
                file_id: file_id.to_string(),
                format: format.to_string(),
            });
        }

        let name = match extension_for(format) {
            Some(ext) => path
                .with_extension(ext)
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            None => file_name(path),
        };

        Ok(Blob {
            name,
            content_type: format.to_string(),
            data: fs::read(path)?,
        })
    }

    fn content(&self, file_id: &str) -> Result<Blob> {
        let path = Path::new(file_id);
        let data = fs::read(path)?;
        let content_type = tree_magic_mini::from_u8(&data).to_string();

        Ok(Blob {
            name: file_name(path),
            content_type,
            data,
        })
    }
}
