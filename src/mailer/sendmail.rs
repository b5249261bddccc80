use super::{build_message, Mailer, Notification};
use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::*;

pub const SENDMAIL_DEFAULT_COMMAND: &str = "/usr/sbin/sendmail -t";

/// Delivers through a sendmail-compatible command reading the message on
/// stdin. The command line is run by `sh -c`, so quoted arguments work.
#[derive(Debug, Clone)]
pub struct SendmailMailer {
    from: String,
    command: String,
}

impl SendmailMailer {
    pub fn new(from: &str, command: &str) -> Result<Self> {
        let command = command.trim();
        if command.is_empty() {
            return Err(Error::Other("Empty sendmail command".to_string()));
        }

        Ok(Self {
            from: from.to_string(),
            command: command.to_string(),
        })
    }
}

impl Mailer for SendmailMailer {
    fn send(&self, notification: &Notification) -> Result<()> {
        let message = build_message(&self.from, notification)?;
        debug!("Piping {} bytes to {}", message.len(), self.command);

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Delivery(format!("Cannot run {}: {}", self.command, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&message) {
                drop(stdin);
                // The child may already have exited.
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::Delivery(format!("Cannot write to {}: {}", self.command, e)));
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::Delivery(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
