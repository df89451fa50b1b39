use crate::cli::parser::{Commands, DayAction};
use crate::config::Config;
use crate::core::days::{DayLogic, DayPatch};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Day { action } = cmd else {
        return Ok(());
    };

    let DayAction::Set {
        trip,
        day,
        cities,
        stay,
        check_in,
        check_out,
    } = action;

    let mut pool = DbPool::new(&cfg.database)?;

    let patch = DayPatch {
        cities: cities.clone(),
        stay: stay.clone(),
        check_in: check_in.clone(),
        check_out: check_out.clone(),
    };

    DayLogic::set(&mut pool, *trip, *day, patch)?;
    Ok(())
}
