use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "folder-notify")]
#[command(about = "Email recipients about files added to monitored folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check monitored folders now and send notifications
    Check,
    /// Show the result of the last check
    Status,
    /// Monitor a folder, or update its settings
    Add {
        /// Folder to monitor
        folder: String,
        /// Recipient address
        #[arg(long)]
        email: String,
        /// Attach new files to the notification
        #[arg(long)]
        attach: bool,
        /// Send one notification per file instead of a digest
        #[arg(long)]
        per_file: bool,
    },
    /// Stop monitoring a folder
    Remove {
        /// Folder to stop monitoring
        folder: String,
    },
    /// List monitored folders
    List,
    /// Print configuration values
    PrintConfig,
}
