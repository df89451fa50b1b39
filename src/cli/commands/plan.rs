use crate::cli::parser::{Commands, DetailFlags, PlanAction};
use crate::config::Config;
use crate::core::schedule::{DetailArgs, ScheduleLogic};
use crate::db::pool::DbPool;
use crate::db::schedule;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::money::format_amount_with;
use crate::utils::table::Table;

use super::confirm_or_skip;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Plan { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        PlanAction::Add {
            trip,
            day,
            time,
            title,
            category,
            end,
            amount,
            note,
            details,
        } => {
            ScheduleLogic::add(
                &mut pool,
                *trip,
                *day,
                time,
                title,
                category.as_deref(),
                end.as_deref(),
                amount.as_deref(),
                note.as_deref(),
                to_detail_args(details),
            )?;
        }

        PlanAction::List { trip, day } => list_items(&pool, cfg, *trip, *day)?,

        PlanAction::Edit {
            id,
            day,
            time,
            title,
            category,
            end,
            amount,
            note,
            details,
        } => {
            ScheduleLogic::edit(
                &mut pool,
                *id,
                *day,
                time.as_deref(),
                title.as_deref(),
                category.as_deref(),
                end.as_deref(),
                amount.as_deref(),
                note.as_deref(),
                to_detail_args(details),
            )?;
        }

        PlanAction::Del { id, yes } => {
            let prompt = format!("Delete schedule item {}?", id);
            if confirm_or_skip(cfg, *yes, &prompt) {
                ScheduleLogic::delete(&mut pool, *id)?;
            } else {
                info("Operation cancelled.");
            }
        }
    }

    Ok(())
}

fn to_detail_args(f: &DetailFlags) -> DetailArgs {
    DetailArgs {
        place: f.place.clone(),
        mode: f.mode.clone(),
        from: f.from.clone(),
        to: f.to.clone(),
        arrives: f.arrives.clone(),
        kind: f.kind.clone(),
        check_in: f.check_in.clone(),
        check_out: f.check_out.clone(),
        booking_ref: f.booking_ref.clone(),
        booked_via: f.booked_via.clone(),
    }
}

fn list_items(pool: &DbPool, cfg: &Config, trip_id: i64, day: Option<i64>) -> AppResult<()> {
    let items = match day {
        Some(d) => schedule::load_items_by_day(&pool.conn, trip_id, d)?,
        None => schedule::load_items_by_trip(&pool.conn, trip_id)?,
    };

    if items.is_empty() {
        info("No schedule items found.");
        return Ok(());
    }

    let mut table = Table::auto(&[
        "ID", "Day", "Time", "End", "Category", "Title", "Where", "Amount",
    ]);
    for item in &items {
        let amount = if item.amount != 0 {
            format_amount_with(item.amount, &cfg.currency)
        } else {
            String::new()
        };
        table.add_row(vec![
            item.id.to_string(),
            item.day.to_string(),
            item.time_str(),
            item.end_time_str(),
            item.category().label().to_string(),
            item.title.clone(),
            item.details.where_str(),
            amount,
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
