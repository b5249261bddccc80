use crate::display;
use crate::error::Result;
use crate::folder::FolderStore;
use crate::mailer::{Mailer, Notification};
use crate::model::{Blob, CheckSummary, FileEntry, FileSummary, FolderConfig, FolderSummary};
use crate::store::ConfigStore;
use chrono::{DateTime, Utc};
use std::time::{Instant, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

pub const DEFAULT_ATTACHMENT_FORMAT: &str = "application/pdf";

/// Scans monitored folders for files created since the last check and
/// notifies each folder's recipient.
pub struct NotifyEngine<C, F, M> {
    store: C,
    folders: F,
    mailer: M,
    attachment_format: String,
}

impl<C, F, M> NotifyEngine<C, F, M>
where
    C: ConfigStore,
    F: FolderStore,
    M: Mailer,
{
    pub fn new(store: C, folders: F, mailer: M) -> Self {
        Self {
            store,
            folders,
            mailer,
            attachment_format: DEFAULT_ATTACHMENT_FORMAT.to_string(),
        }
    }

    pub fn with_attachment_format(mut self, format: &str) -> Self {
        self.attachment_format = format.to_string();
        self
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn run(&self) -> Result<CheckSummary> {
        self.run_at(Utc::now())
    }

    /// Run one check as if it started at `run_start`.
    ///
    /// Only a failure to read the folder list or watermark, or to commit the
    /// result, is returned as an error. Folder and delivery failures are
    /// logged and reflected in the summary.
    pub fn run_at(&self, run_start: DateTime<Utc>) -> Result<CheckSummary> {
        let started = Instant::now();
        let last_check = self
            .store
            .watermark()?
            .unwrap_or_else(|| DateTime::<Utc>::from(UNIX_EPOCH));
        let folder_ids = self.store.list_folder_ids()?;
        info!(
            "Checking {} folders for files created since {}",
            folder_ids.len(),
            last_check.to_rfc3339()
        );

        let mut summary = CheckSummary::default();
        for id in &folder_ids {
            if let Some(folder_summary) = self.check_folder(id, last_check, &mut summary) {
                summary.folders.push(folder_summary);
            }
        }

        // Never move the watermark backwards, even if the clock did.
        self.store.commit_run(run_start.max(last_check), &summary)?;

        info!(
            "{} new files, {} of {} notifications sent",
            summary.total_files(),
            summary.sent,
            summary.attempted
        );
        debug!("Check completed in {:.2}s", started.elapsed().as_secs_f64());

        Ok(summary)
    }

    /// Display lines for the last completed run, empty if there is none.
    pub fn last_check_display(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .last_summary()?
            .map(|s| display::last_check_display(&s))
            .unwrap_or_default())
    }

    fn check_folder(
        &self,
        id: &str,
        last_check: DateTime<Utc>,
        summary: &mut CheckSummary,
    ) -> Option<FolderSummary> {
        let config = match self.store.folder_config(id) {
            Ok(Some(config)) => config,
            Ok(None) => {
                warn!("No configuration for folder {}, skipping", id);
                return None;
            }
            Err(e) => {
                error!("Error reading configuration for folder {}: {}", id, e);
                return None;
            }
        };

        let name = match self.folders.folder_name(id) {
            Ok(name) => name,
            Err(e) => {
                warn!("Skipping folder {}: {}", id, e);
                return None;
            }
        };

        let files = match self.folders.list_files(id) {
            Ok(files) => files,
            Err(e) => {
                warn!("Skipping folder {}: {}", id, e);
                return None;
            }
        };

        let mut folder_summary = FolderSummary {
            id: id.to_string(),
            name,
            files: Vec::new(),
        };
        let mut digest_lines: Vec<String> = Vec::new();
        let mut digest_attachments: Vec<Blob> = Vec::new();

        for file in files.filter(|f| f.created_at >= last_check) {
            debug!("New file in {}: {}", folder_summary.name, file.name);
            let attachment = if config.attach_content {
                self.attachment(&file)
            } else {
                None
            };
            let mut file_summary = FileSummary::from_entry(&file);

            if config.per_file_notify {
                let notification = Notification {
                    to: config.email.clone(),
                    subject: format!("{} added to {}", file.name, folder_summary.name),
                    body: notification_line(&file),
                    attachments: attachment.into_iter().collect(),
                };
                file_summary.sent = self.dispatch(&notification, summary);
            } else {
                digest_lines.push(notification_line(&file));
                digest_attachments.extend(attachment);
            }

            folder_summary.files.push(file_summary);
        }

        if !config.per_file_notify && !digest_lines.is_empty() {
            let notification = digest(
                &config,
                &folder_summary.name,
                &digest_lines,
                digest_attachments,
            );
            if self.dispatch(&notification, summary) {
                for file in folder_summary.files.iter_mut() {
                    file.sent = true;
                }
            }
        }

        Some(folder_summary)
    }

    /// Content in the configured format, or the file's own format when it
    /// cannot be converted.
    fn attachment(&self, file: &FileEntry) -> Option<Blob> {
        match self.folders.content_as(&file.id, &self.attachment_format) {
            Ok(blob) => Some(blob),
            Err(e) => {
                debug!(
                    "Cannot attach {} as {} ({}), attaching original",
                    file.name, self.attachment_format, e
                );
                match self.folders.content(&file.id) {
                    Ok(blob) => Some(blob),
                    Err(e) => {
                        error!("Cannot read content of {}: {}", file.name, e);
                        None
                    }
                }
            }
        }
    }

    fn dispatch(&self, notification: &Notification, summary: &mut CheckSummary) -> bool {
        summary.attempted += 1;
        match self.mailer.send(notification) {
            Ok(()) => {
                summary.sent += 1;
                true
            }
            Err(e) => {
                error!(
                    to = %notification.to,
                    subject = %notification.subject,
                    body = %notification.body,
                    attachments = ?notification.attachment_names(),
                    "Failed to send notification: {}",
                    e
                );
                false
            }
        }
    }
}

fn notification_line(file: &FileEntry) -> String {
    format!("{}: {}", file.name, file.url)
}

fn digest(
    config: &FolderConfig,
    folder_name: &str,
    lines: &[String],
    attachments: Vec<Blob>,
) -> Notification {
    Notification {
        to: config.email.clone(),
        subject: format!("Files added to {}", folder_name),
        body: lines.join("\n\n"),
        attachments,
    }
}
