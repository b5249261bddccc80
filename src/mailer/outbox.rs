use super::{build_message, Mailer, Notification};
use crate::error::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::*;

/// Writes each notification as an `.eml` file into a directory instead of
/// sending it.
#[derive(Debug)]
pub struct OutboxMailer {
    from: String,
    dir: PathBuf,
    counter: AtomicUsize,
}

impl OutboxMailer {
    pub fn new<P: AsRef<Path>>(from: &str, dir: P) -> Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            from: from.to_string(),
            dir: dir.as_ref().to_path_buf(),
            counter: AtomicUsize::new(0),
        })
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, notification: &Notification) -> Result<()> {
        let message = build_message(&self.from, notification)?;
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = self.dir.join(format!(
            "{}-{}.eml",
            Utc::now().format("%Y%m%dT%H%M%S%.3f"),
            n
        ));
        fs::write(&path, message)?;
        info!("Wrote {} for {}", path.display(), notification.to);
        Ok(())
    }
}
