use crate::cli::parser::{Commands, StayAction};
use crate::config::Config;
use crate::core::days::DayLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Stay { action } = cmd else {
        return Ok(());
    };

    let StayAction::Rename { trip, old, new } = action;

    let mut pool = DbPool::new(&cfg.database)?;
    DayLogic::rename_stay(&mut pool, *trip, old, new)?;
    Ok(())
}
