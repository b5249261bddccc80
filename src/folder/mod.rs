mod local;

pub use local::LocalFolderStore;

use crate::error::Result;
use crate::model::{Blob, FileEntry};

/// Read-only access to the files of monitored folders.
pub trait FolderStore {
    fn folder_name(&self, id: &str) -> Result<String>;

    /// One pass over the files currently in the folder. Enumeration order is
    /// stable for a given folder state but carries no meaning.
    fn list_files<'a>(&'a self, id: &str) -> Result<Box<dyn Iterator<Item = FileEntry> + 'a>>;

    /// File content converted to `format` (a MIME type). Fails with
    /// `Error::ContentConversion` when the file cannot be produced in that
    /// format.
    fn content_as(&self, file_id: &str, format: &str) -> Result<Blob>;

    /// File content in its own format.
    fn content(&self, file_id: &str) -> Result<Blob>;
}
