// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Minimal stderr logger, modeled on wlanstack's `logger` module: a single
//! `log::Log` instance installed once at process start via
//! `log::set_logger`/`log::set_max_level`.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub static LOGGER: Logger = Logger;

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!("[{}] {}: {}", level, record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Installs [`LOGGER`] as the global logger and sets the max level according
/// to `-v` occurrences on the command line (0 => Info, 1 => Debug, 2+ =>
/// Trace), matching the reference implementation's `Level`/`VERBOSITY` split.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // `set_logger` fails only if a logger was already installed; in tests
    // multiple call sites may race to install it, which is harmless.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}
