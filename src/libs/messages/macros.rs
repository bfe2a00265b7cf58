//! Convenient macros for application messaging and logging.
//!
//! Every macro routes its output through `tracing` when debug mode is on and
//! through plain `println!`/`eprintln!` otherwise, so the same call site
//! serves both the interactive terminal and structured logs.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either `TASKBASE_DEBUG` or `RUST_LOG` is set. The
//! check runs once and is cached.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**, **`msg_success!`**, **`msg_info!`**, **`msg_warning!`**: display
//! - **`msg_error!`**: errors to stderr
//! - **`msg_error_anyhow!`**, **`msg_bail_anyhow!`**: build or return an `anyhow::Error`
//! - **`msg_debug!`**: only emitted in debug mode
//!
//! ## Usage Examples
//!
//! ```rust
//! use taskbase::{msg_error, msg_info, msg_success};
//! use taskbase::libs::messages::Message;
//!
//! msg_success!(Message::TaskCreated("Buy milk".to_string()));
//! msg_info!(Message::NotLoggedInHint, true);
//! msg_error!(Message::UserNotLoggedIn);
//! ```

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Default filter when debug mode is on but `RUST_LOG` is not set.
const DEFAULT_DEBUG_FILTER: &str = "taskbase=debug";

/// Returns `true` when `TASKBASE_DEBUG` or `RUST_LOG` is set. Cached after the first call.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TASKBASE_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Installs the global `tracing` subscriber when debug mode is on.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DEBUG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Shared body of the display macros: `tracing` in debug mode, plain output otherwise.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $prefix:expr, $msg:expr, $suffix:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}{}{}", $prefix, $msg, $suffix);
        } else {
            $print!("{}{}{}", $prefix, $msg, $suffix);
        }
    };
}

/// Prints a general message. Pass `true` to pad it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, "")
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n", $msg, "\n")
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, "")
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n✅ ", $msg, "\n")
    };
}

/// Errors go to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, "")
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "\n❌ ", $msg, "\n")
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, "")
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, "\n⚠️ ", $msg, "\n")
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, "")
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\nℹ️ ", $msg, "\n")
    };
}

/// Only emitted in debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
