// src/cli/commands/mod.rs

pub mod backup;
pub mod budget;
pub mod config;
pub mod day;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod plan;
pub mod stay;
pub mod timetable;
pub mod trip;

use crate::config::Config;
use crate::ui::messages::ask_confirmation;

/// Destructive commands prompt unless `--yes` was passed or the config
/// disables confirmations.
pub(crate) fn confirm_or_skip(cfg: &Config, yes: bool, prompt: &str) -> bool {
    if yes || !cfg.confirm_destructive {
        return true;
    }
    ask_confirmation(prompt)
}
