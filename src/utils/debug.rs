use std::env;
use std::sync::OnceLock;

use crossterm::style::{Color, Stylize};

use crate::constants;

static ENABLED: OnceLock<bool> = OnceLock::new();

/// Check whether request tracing was enabled via REMINDER_DEBUG. There
/// is no flag surface; the environment is the only switch.
pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| {
        env::var(constants::ENV_DEBUG)
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    })
}

/// Log a debug message if tracing is enabled
pub fn log(message: &str) {
    if is_enabled() {
        eprintln!("{} {}", "DEBUG:".with(Color::Magenta).bold(), message);
    }
}
