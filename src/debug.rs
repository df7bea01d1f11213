//! Debug log bridge for thalis-scaffold
//!
//! Routes every `log::info!()`/`log::debug!()`/... call to a debug log file so
//! a host shell's own stdout/stderr stays untouched:
//! - `/tmp/thalis_scaffold_debug.log` on Unix/macOS
//! - `%TEMP%\thalis_scaffold_debug.log` on Windows
//!
//! When `RUST_LOG` is set, records are mirrored to stderr as well.
//!
//! The `debug_log!` / `debug_trace!` macros tag high-frequency records
//! (pointer moves during a drag) with a category used as the log target.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use thalis_scaffold_config::LogLevel;

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file
pub fn log_file_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/thalis_scaffold_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("thalis_scaffold_debug.log")
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the log bridge as the global `log` backend.
///
/// `level` comes from the CLI or config; `RUST_LOG` (a bare level name)
/// overrides it. Calling this more than once only adjusts the max level.
pub fn init_log_bridge(level: LogLevel) {
    let env_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| LogLevel::parse(&value));
    let effective = env_level.unwrap_or(level);
    log::set_max_level(effective.to_level_filter());

    if effective == LogLevel::Off || BRIDGE.get().is_some() {
        return;
    }

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(log_file_path())
        .ok();

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(file),
        mirror_stderr: env_level.is_some(),
    });

    // Another logger may already be installed by an embedding host
    if log::set_logger(bridge).is_ok() {
        log::info!(
            "thalis-scaffold debug session started (level={})",
            effective.display_name()
        );
    }
}

// Convenience macros for categorized logging
#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        log::debug!(target: $category, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        log::trace!(target: $category, $($arg)*)
    };
}
