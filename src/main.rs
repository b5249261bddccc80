mod cli;
mod logging;

use std::fs;

use anyhow::Context;
use chrono::{Local, Utc};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use folder_notify::config::{self as app_config, AppConfig, MailerKind};
use folder_notify::mailer::{Mailer, OutboxMailer, SendmailMailer};
use folder_notify::store::{self, ConfigStore, RocksStore};
use folder_notify::{FolderConfig, LocalFolderStore, NotifyEngine};
use tracing::{debug, error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = app_config::load_configuration().context("Error loading configuration")?;

    let _guard = logging::init_logger(&config.logging);
    debug!("config: {:?}", config);

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Check) => run_check(&config),
        Some(Commands::Status) => run_status(&config),
        Some(Commands::Add {
            folder,
            email,
            attach,
            per_file,
        }) => run_add(&config, &folder, &email, attach, per_file),
        Some(Commands::Remove { folder }) => run_remove(&config, &folder),
        Some(Commands::List) => run_list(&config),
        Some(Commands::PrintConfig) => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = &result {
        error!("Error: {:#}", err);
    }
    result
}

fn open_store(config: &AppConfig) -> anyhow::Result<RocksStore> {
    RocksStore::open(&config.store_path)
        .with_context(|| format!("Cannot open config store at {}", config.store_path))
}

fn build_mailer(config: &AppConfig) -> anyhow::Result<Box<dyn Mailer>> {
    let settings = &config.mailer;
    let mailer: Box<dyn Mailer> = match settings.kind {
        MailerKind::Sendmail => Box::new(SendmailMailer::new(
            &settings.from,
            &settings.sendmail_command,
        )?),
        MailerKind::Outbox => Box::new(
            OutboxMailer::new(&settings.from, &settings.outbox_dir)
                .with_context(|| format!("Cannot create outbox {}", settings.outbox_dir))?,
        ),
    };
    Ok(mailer)
}

fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let engine = NotifyEngine::new(
        open_store(config)?,
        LocalFolderStore::new(&config.ignore_patterns)?,
        build_mailer(config)?,
    )
    .with_attachment_format(&config.attachment_format);

    let summary = engine.run().context("Check failed")?;

    for line in folder_notify::display::last_check_display(&summary) {
        println!("{}", line);
    }
    info!(
        "{} of {} notifications sent",
        format!("{}", summary.sent).green(),
        format!("{}", summary.attempted).cyan(),
    );

    Ok(())
}

fn run_status(config: &AppConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match store.watermark()? {
        Some(watermark) => println!(
            "Last checked: {}",
            watermark
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .cyan()
        ),
        None => println!("{}", "Never checked".yellow()),
    }

    if let Some(summary) = store.last_summary()? {
        for line in folder_notify::display::last_check_display(&summary) {
            println!("{}", line);
        }
        let counts = format!("{} of {} notifications sent", summary.sent, summary.attempted);
        if summary.sent < summary.attempted {
            println!("{}", counts.red());
        } else {
            println!("{}", counts.green());
        }
    }

    Ok(())
}

fn run_add(
    config: &AppConfig,
    folder: &str,
    email: &str,
    attach: bool,
    per_file: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(!email.trim().is_empty(), "Email recipient must not be empty");

    let id = fs::canonicalize(folder)
        .with_context(|| format!("Cannot resolve folder {}", folder))?
        .to_string_lossy()
        .into_owned();
    let folder_config = FolderConfig::new(email.trim())
        .with_attach_content(attach)
        .with_per_file_notify(per_file);

    let store = open_store(config)?;
    store::monitor_folder(&store, &id, &folder_config, Utc::now())?;
    info!("Monitoring {} for {}", id, folder_config.email);

    Ok(())
}

fn run_remove(config: &AppConfig, folder: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    // The folder may no longer exist on disk, so fall back to the raw id.
    let id = fs::canonicalize(folder)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| folder.to_string());

    if store.folder_config(&id)?.is_none() {
        anyhow::bail!("{} is not monitored", id);
    }
    store.remove_folder(&id)?;
    info!("Removed {}", id);

    Ok(())
}

fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let ids = store.list_folder_ids()?;

    if ids.is_empty() {
        println!("None");
        return Ok(());
    }

    for id in ids {
        match store.folder_config(&id)? {
            Some(c) => println!(
                "{} -> {}{}{}",
                id.bold(),
                c.email,
                if c.attach_content { " [attach]" } else { "" },
                if c.per_file_notify { " [per-file]" } else { "" },
            ),
            None => println!("{} -> {}", id.bold(), "not configured".yellow()),
        }
    }

    Ok(())
}
