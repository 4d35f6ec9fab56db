//! Tagged status lines printed while installing.

use colored::Colorize;

const TAG: &str = "[Canvacord]";

/// Work that is about to start or is in progress.
pub fn pending(msg: &str) {
    tracing::info!("{} {}", TAG.bright_yellow(), msg.bright_white());
}

pub fn success(msg: &str) {
    tracing::info!("{} {}", TAG.bright_green(), msg.bright_white());
}

pub fn failure(msg: &str) {
    tracing::info!("{} {}", TAG.bright_red(), msg.bright_white());
}
