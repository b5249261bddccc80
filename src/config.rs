use crate::engine::DEFAULT_ATTACHMENT_FORMAT;
use crate::mailer::SENDMAIL_DEFAULT_COMMAND;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store_path: String,
    pub attachment_format: String,
    pub ignore_patterns: Vec<String>,
    pub mailer: MailerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailerKind {
    Sendmail,
    Outbox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    pub kind: MailerKind,
    pub from: String,
    pub sendmail_command: String,
    pub outbox_dir: String,
}

/// `level` is an `EnvFilter` directive; `TRACING_LEVEL` still overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: "folder-notify.db".to_string(),
            attachment_format: DEFAULT_ATTACHMENT_FORMAT.to_string(),
            ignore_patterns: Vec::new(),
            mailer: MailerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            kind: MailerKind::Sendmail,
            from: "folder-notify@localhost".to_string(),
            sendmail_command: SENDMAIL_DEFAULT_COMMAND.to_string(),
            outbox_dir: "outbox".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "./logs/folder-notify.log".to_string(),
        }
    }
}

/// Layer `Config.toml` (optional) under `FOLDER_NOTIFY__*` environment
/// variables, e.g. `FOLDER_NOTIFY__MAILER__KIND=outbox`.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("FOLDER_NOTIFY")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("ignore_patterns")
                .try_parsing(true),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
