//! Logging for the mntgen workspace.
//!
//! Usage:
//! - Set MNTGEN_LOG=off (default) - no logs
//! - Set MNTGEN_LOG=info - mount, unmount and signal handling
//! - Set MNTGEN_LOG=debug - every directory created and every kernel lookup

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable that selects the minimum log level
pub const LOG_ENV: &str = "MNTGEN_LOG";

static INIT: Once = Once::new();

/// Parse a `MNTGEN_LOG` value. `None` means logging is off.
pub fn parse_level(value: &str) -> Option<emit::Level> {
    match value {
        "off" => None,
        "debug" => Some(emit::Level::Debug),
        "warn" => Some(emit::Level::Warn),
        "error" => Some(emit::Level::Error),
        // "info" and anything unrecognized
        _ => Some(emit::Level::Info),
    }
}

/// Initialize diagnostics based on the MNTGEN_LOG environment variable
///
/// Safe to call multiple times; only the first call has any effect.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());
        let Some(level) = parse_level(&value) else {
            return;
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if !matches!(value.as_str(), "debug" | "info" | "warn" | "error") {
            emit::warn!("unknown log level {value}, using info");
        }

        // The runtime must outlive every emitter; the process never tears it down.
        std::mem::forget(rt);
    });
}

/// Log basic operations: mount, unmount, signals.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics: per-request lookups, node creation.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable failures, such as an unmount that did not succeed.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop the filesystem.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
