//! Logger module
//!
//! Provides logging utilities for the activities server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Leveled error, warning, info and debug logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        LogLevel::parse(&config.logging.level),
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_info(level, message),
        None if level >= LogLevel::Info => println!("{message}"),
        None => {}
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write_error(level, message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(LogLevel::Info, "======================================");
    write_info(LogLevel::Info, "Mergington activities server started");
    write_info(LogLevel::Info, &format!("Listening on: http://{addr}"));
    write_info(
        LogLevel::Info,
        &format!("Log level: {}", config.logging.level),
    );
    if let Some(workers) = config.server.workers {
        write_info(LogLevel::Info, &format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(LogLevel::Info, &format!("Error log: {path}"));
    }
    write_info(
        LogLevel::Info,
        &format!(
            "Static files: {} -> {}",
            config.static_files.mount, config.static_files.dir
        ),
    );
    let mirror = if config.mirror.enabled {
        config.mirror.path.as_str()
    } else {
        "disabled"
    };
    write_info(LogLevel::Info, &format!("Mirror: {mirror}"));
    write_info(LogLevel::Info, "======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(
        LogLevel::Debug,
        &format!("[Connection] Accepted from: {peer_addr}"),
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(LogLevel::Info, &format!("[INFO] {message}"));
}

pub fn log_debug(message: &str) {
    write_info(LogLevel::Debug, &format!("[DEBUG] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown_started(active: usize) {
    write_info(
        LogLevel::Info,
        &format!("[Shutdown] Stopped accepting, {active} connection(s) still open"),
    );
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info(LogLevel::Info, "[Shutdown] All connections closed");
    } else {
        write_error(
            LogLevel::Warn,
            &format!("[WARN] [Shutdown] Grace period elapsed with {remaining} connection(s) open"),
        );
    }
}
