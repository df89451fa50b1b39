use crate::cli::parser::{BufferAction, Commands, TripAction};
use crate::config::Config;
use crate::core::trips::TripLogic;
use crate::core::window::DayWindow;
use crate::db::pool::DbPool;
use crate::db::trips;
use crate::errors::AppResult;
use crate::ui::messages::{info, trip_header, warning};
use crate::utils::date::{format_date, parse_date_strict};
use crate::utils::table::Table;

use super::confirm_or_skip;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Trip { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TripAction::Add { title, from, to } => {
            let start = parse_date_strict(from)?;
            let end = parse_date_strict(to)?;
            TripLogic::create(&mut pool, title, start, end)?;
        }

        TripAction::List => list_trips(&pool, cfg)?,

        TripAction::Show { trip } => show_trip(&pool, cfg, *trip)?,

        TripAction::Set {
            trip,
            title,
            from,
            to,
        } => {
            let start = from.as_deref().map(parse_date_strict).transpose()?;
            let end = to.as_deref().map(parse_date_strict).transpose()?;
            TripLogic::set(&mut pool, *trip, title.as_deref(), start, end)?;
        }

        TripAction::Del { trip, yes } => {
            let prompt = format!(
                "Delete trip {} with every day note and schedule item under it?",
                trip
            );
            if confirm_or_skip(cfg, *yes, &prompt) {
                TripLogic::delete(&mut pool, *trip)?;
            } else {
                info("Operation cancelled.");
            }
        }

        TripAction::Pre { action } => match action {
            BufferAction::Add { trip } => TripLogic::pre_add(&mut pool, *trip)?,
            BufferAction::Del { trip, yes } => {
                let t = trips::get_trip(&pool.conn, *trip)?;
                let doomed = (t.pre_days > 0).then(|| t.min_day());
                del_buffer_day(&mut pool, cfg, *trip, doomed, *yes, TripLogic::pre_del)?;
            }
        },

        TripAction::Post { action } => match action {
            BufferAction::Add { trip } => TripLogic::post_add(&mut pool, *trip)?,
            BufferAction::Del { trip, yes } => {
                let t = trips::get_trip(&pool.conn, *trip)?;
                let doomed = (t.post_days > 0).then(|| t.max_day());
                del_buffer_day(&mut pool, cfg, *trip, doomed, *yes, TripLogic::post_del)?;
            }
        },

        TripAction::ViewFrom { trip, day } => {
            TripLogic::view_from(&mut pool, *trip, *day)?;
        }
    }

    Ok(())
}

/// Shared confirmation for `pre del` / `post del`: the outermost buffer
/// day disappears along with whatever was planned on it. `doomed` is
/// `None` when the trip has no buffer day on that side; the core logic
/// then reports the proper error.
fn del_buffer_day(
    pool: &mut DbPool,
    cfg: &Config,
    trip_id: i64,
    doomed: Option<i64>,
    yes: bool,
    apply: fn(&mut DbPool, i64) -> AppResult<()>,
) -> AppResult<()> {
    let rows = match doomed {
        Some(d) => TripLogic::rows_at_day(pool, trip_id, d)?,
        None => 0,
    };

    let proceed = match doomed {
        Some(d) if rows > 0 => {
            let prompt = format!(
                "Removing this buffer day also deletes {} row(s) planned at day {}. Continue?",
                rows, d
            );
            confirm_or_skip(cfg, yes, &prompt)
        }
        _ => true,
    };

    if proceed {
        apply(pool, trip_id)
    } else {
        info("Operation cancelled.");
        Ok(())
    }
}

fn list_trips(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let all = trips::load_trips(&pool.conn)?;
    if all.is_empty() {
        info("No trips yet. Create one with: tripdeck trip add --title ... --from ... --to ...");
        return Ok(());
    }

    let mut table = Table::auto(&["ID", "Title", "From", "To", "Days", "Pre", "Post"]);
    for t in &all {
        let (from, to) = match (t.start_date, t.end_date) {
            (Some(s), Some(e)) => (
                format_date(s, cfg.show_weekday),
                format_date(e, cfg.show_weekday),
            ),
            _ => (t.start_str(), t.end_str()),
        };
        table.add_row(vec![
            t.id.to_string(),
            t.title.clone(),
            from,
            to,
            t.duration().to_string(),
            t.pre_days.to_string(),
            t.post_days.to_string(),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

fn show_trip(pool: &DbPool, cfg: &Config, id: i64) -> AppResult<()> {
    let t = trips::get_trip(&pool.conn, id)?;
    let window = DayWindow::resolve(&t);

    let dates = match (t.start_date, t.end_date) {
        (Some(s), Some(e)) => format!(
            "{} -> {}",
            format_date(s, cfg.show_weekday),
            format_date(e, cfg.show_weekday)
        ),
        _ => format!("{} -> {}", t.start_str(), t.end_str()),
    };

    trip_header(&t.title, &dates);
    if window.corrupt_dates {
        warning("Trip dates are corrupt; day numbers are shown without calendar dates.");
    }
    println!(
        "  id {} | {} day(s) | +{} pre, +{} post",
        t.id, window.duration, t.pre_days, t.post_days
    );
    println!(
        "  window {} .. {} | view starts at day {}",
        window.min_day(),
        window.max_day(),
        window.anchor
    );
    Ok(())
}
