//! Console logger for the CLI.
//!
//! `info` and below go to stdout, `warn` and `error` to stderr. Verbose mode
//! adds timestamps and debug output from the bangdeng crates. A log file, if
//! given, receives every line with ANSI codes stripped.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::CliError;

struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    fn format(&self, record: &Record) -> String {
        if self.timestamps {
            format!(
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        } else {
            record.args().to_string()
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Dependencies only get through at warn and above
        metadata.level() <= Level::Warn || metadata.target().starts_with("bangdeng")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);

        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }

        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = f.write_all(&strip_ansi_escapes::strip(line.as_bytes()));
            let _ = f.write_all(b"\n");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file
            && let Ok(mut f) = file.lock()
        {
            let _ = f.flush();
        }
    }
}

/// Install the logger. `quiet` wins over `verbose`.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = match logfile {
        Some(path) => Some(Mutex::new(File::create(path).map_err(|e| {
            CliError::other(format!("Failed to create log file {}: {}", path.display(), e))
        })?)),
        None => None,
    };

    let logger = CliLogger {
        level,
        timestamps: verbose && !quiet,
        file,
    };
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| CliError::other(format!("Failed to install logger: {e}")))?;
    log::set_max_level(level);
    Ok(())
}
