use log::{Level, LevelFilter, Log, Metadata, Record};
use shared::PortalConfig;

/// `log` backend that writes to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Install the console backend. Without `console_log` only errors print.
pub fn init(config: &PortalConfig) {
    let level = if config.console_log {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Component-scoped shorthands; the component name becomes the log target.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}
