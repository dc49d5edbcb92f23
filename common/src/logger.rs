//! Tracing setup: a daily-rolling file layer plus an optional stdout layer.
//!
//! The returned guard must be held for the lifetime of the process, otherwise
//! the non-blocking writer flushes early and log lines are lost.

use std::fs;

use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;

pub fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", config::log_file());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(config::log_level()));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true);
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
