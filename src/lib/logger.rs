use std::{
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
};

use anyhow::Context;
use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }

    pub fn tag_no_color(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }

    /// Whether a message of this level is shown by a logger configured with
    /// `threshold`.
    pub fn show(&self, threshold: &LogLevel) -> bool {
        self >= threshold
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Leveled logger printing to stderr, optionally mirroring every message into
/// a plain text file.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    name: String,
    file: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(level: LogLevel, name: impl Into<String>) -> Self {
        Logger {
            level,
            name: name.into(),
            file: None,
        }
    }

    /// Creates a logger that also writes to `path`, creating missing parent
    /// directories.
    pub fn with_file(level: LogLevel, name: impl Into<String>, path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;

        Ok(Logger {
            level,
            name: name.into(),
            file: Some(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Builds a logger from its config. Returns `None` if logging is disabled.
    pub fn from_config(config: &LoggerConfig, name: &str) -> anyhow::Result<Option<Self>> {
        if !*config.get_enabled() {
            return Ok(None);
        }

        if !*config.get_log_file() {
            return Ok(Some(Logger::new(*config.get_log_level(), name)));
        }

        let path = PathBuf::from(config.get_log_directory()).join(format!(
            "{}_{}.txt",
            name.to_lowercase().replace(' ', "_"),
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        ));

        Logger::with_file(*config.get_log_level(), name, path).map(Some)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    fn prefix(&self, level: &LogLevel) -> String {
        format!("[{}] {}", level.tag(), format!("{}:", self.name).dimmed())
    }

    fn prefix_no_color(&self, level: &LogLevel) -> String {
        format!("[{}] {}:", level.tag_no_color(), self.name)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.writeln_to_file(&format!("{} {}", self.prefix_no_color(&level), message));

        if level.show(&self.level) {
            eprintln!("{} {}", self.prefix(&level), message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    // write errors are ignored
    fn writeln_to_file(&self, line: &str) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", line);
            }
        }
    }

    pub fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }

    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder::new(name, self)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Logs a named group of fields as one message.
#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(name: &'a str, logger: &'a Logger) -> Self {
        ObjectBuilder {
            logger,
            name,
            fields: vec![],
        }
    }

    pub fn add_field(mut self, name: &'a str, value: impl Display) -> Self {
        self.fields.push((name, value.to_string()));

        self
    }

    fn build(&self) -> String {
        let mut result = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            result.push_str(&format!("\n  {}: {}", name, value));
        }
        result.push_str("\n}");
        result
    }

    pub fn log(&self, level: LogLevel) {
        self.logger.log(level, &self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Error.show(&LogLevel::Warn));
        assert!(LogLevel::Warn.show(&LogLevel::Warn));
        assert!(!LogLevel::Info.show(&LogLevel::Warn));
        assert!(LogLevel::Debug.show(&LogLevel::Debug));
    }

    #[test]
    fn parse_level() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("DBG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn object_builder_formats_fields() {
        let logger = Logger::new(LogLevel::Error, "test");
        let object = logger
            .object("Stats")
            .add_field("states", 3)
            .add_field("kind", "DFA");

        assert_eq!(object.build(), "Stats {\n  states: 3\n  kind: DFA\n}");
    }
}
