use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use log::{Level, Log, Metadata, Record};
use time::OffsetDateTime;

/// Backend for the `log` facade: colored lines on stderr, optionally
/// mirrored (uncolored) to a file named by `FLATWIKI_LOG_FILE`.
pub struct Logger {
    level: Level,
    colors: bool,
    file: Option<Mutex<std::fs::File>>,
}

impl Logger {
    /// Install the logger, reading its settings from the environment:
    /// level from `FLATWIKI_LOG` falling back to `RUST_LOG` (default
    /// `info`), colors unless `NO_COLOR` is set, file mirror from
    /// `FLATWIKI_LOG_FILE`.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let level = std::env::var("FLATWIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .and_then(|s| s.parse::<Level>().ok())
            .unwrap_or(Level::Info);

        let colors = std::env::var("NO_COLOR").is_err();

        let file = std::env::var("FLATWIKI_LOG_FILE").ok().and_then(|path| {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(f) => Some(Mutex::new(f)),
                Err(e) => {
                    eprintln!("flatwiki: cannot open log file {:?}: {}", path, e);
                    None
                }
            }
        });

        let logger = Logger { level, colors, file };
        log::set_max_level(level.to_level_filter());
        log::set_logger(Box::leak(Box::new(logger)))
    }

    fn timestamp() -> String {
        let now = OffsetDateTime::now_utc();
        format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
    }

    fn color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }

    const RESET: &str = "\x1b[0m";
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::timestamp();
        let level = record.level().as_str();
        let args = record.args();

        let line = if self.colors {
            let color = Self::color(record.level());
            let reset = Self::RESET;
            format!("{color}[{timestamp}] {level}{reset} {args}\n")
        } else {
            format!("[{timestamp}] {level} {args}\n")
        };
        let _ = io::stderr().write_all(line.as_bytes());

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "[{timestamp}] {level} {args}");
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
