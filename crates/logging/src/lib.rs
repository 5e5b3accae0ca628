use chrono::Local;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Most recent entries kept in the log buffer
pub const MAX_LOG_ENTRIES: usize = 1000;

// Recent messages, whether printed or not; oldest dropped first
static LOGS: Lazy<Mutex<VecDeque<String>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)));

static LOG_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Warning));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Level selected by the `--debug` / `--verbose` command line flags
    pub fn from_flags(debug: bool, verbose: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warning
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
}

pub fn get_log_level() -> LogLevel {
    match LOG_LEVEL.lock() {
        Ok(level) => *level,
        Err(_) => LogLevel::Warning,
    }
}

fn format_entry(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S");
    format!("[{}] {:<5} {}", timestamp, level.label(), message)
}

/// Record a message and print it when `level` is at or above the current level.
/// Warnings and errors go to stderr so they never mix with validation output.
pub fn log(level: LogLevel, message: &str) {
    let formatted = format_entry(level, message);

    if level >= get_log_level() {
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", formatted),
            _ => println!("{}", formatted),
        }
    }

    if let Ok(mut logs) = LOGS.lock() {
        if logs.len() == MAX_LOG_ENTRIES {
            logs.pop_front();
        }
        logs.push_back(formatted);
    }
}

/// The buffered entries, oldest first
pub fn get_logs() -> Vec<String> {
    match LOGS.lock() {
        Ok(logs) => logs.iter().cloned().collect(),
        Err(_) => vec![format_entry(LogLevel::Error, "log buffer unavailable")],
    }
}

pub fn clear_logs() {
    if let Ok(mut logs) = LOGS.lock() {
        logs.clear();
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Warning);
    }

    // Both checks share the global buffer, so they run in one test
    #[test]
    fn test_log_buffer() {
        debug("checking path messages/en.json");

        let logs = get_logs();
        let entry = logs
            .iter()
            .find(|line| line.contains("checking path messages/en.json"))
            .expect("debug entry should be buffered");
        assert!(entry.contains("DEBUG"));
        assert!(entry.starts_with('['));

        for i in 0..MAX_LOG_ENTRIES + 10 {
            debug(&format!("filler entry {}", i));
        }
        let logs = get_logs();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert!(logs
            .last()
            .is_some_and(|line| line.ends_with(&format!("filler entry {}", MAX_LOG_ENTRIES + 9))));
        assert!(!logs
            .iter()
            .any(|line| line.contains("checking path messages/en.json")));

        clear_logs();
        assert!(get_logs().is_empty());
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }
}
