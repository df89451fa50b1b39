use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::window::{DaySlot, DayWindow};
use crate::db::pool::DbPool;
use crate::db::{days, schedule, trips};
use crate::errors::AppResult;
use crate::models::{CategoryDetails, DayInfo, ScheduleItem};
use crate::ui::messages::{info, trip_header, warning};
use crate::utils::colors::{RESET, color_for_category, grey_if_past};
use crate::utils::date::format_date;
use crate::utils::formatting::{bold, italic, pad_right, wrap_note};
use crate::utils::money::format_amount_with;

const NOTE_WRAP_WIDTH: usize = 60;
const WATCH_POLL_MS: u64 = 500;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Timetable { trip, all, watch } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    render(&pool, cfg, *trip, *all)?;

    if *watch {
        watch_loop(&pool, cfg, *trip, *all)?;
    }
    Ok(())
}

/// Full timetable render: rotated day slots, each with its cities, stay,
/// check-in/out and schedule lines. Blank days are skipped unless
/// `show_all` is set.
fn render(pool: &DbPool, cfg: &Config, trip_id: i64, show_all: bool) -> AppResult<()> {
    let trip = trips::get_trip(&pool.conn, trip_id)?;
    let window = DayWindow::resolve(&trip);

    let infos = days::load_day_infos(&pool.conn, trip_id)?;
    let items = schedule::load_items_by_trip(&pool.conn, trip_id)?;

    let mut info_by_day: HashMap<i64, &DayInfo> = HashMap::new();
    for i in &infos {
        info_by_day.insert(i.day, i);
    }
    let mut items_by_day: HashMap<i64, Vec<&ScheduleItem>> = HashMap::new();
    for it in &items {
        items_by_day.entry(it.day).or_default().push(it);
    }

    let dates = match (trip.start_date, trip.end_date) {
        (Some(s), Some(e)) => format!(
            "{} -> {}",
            format_date(s, cfg.show_weekday),
            format_date(e, cfg.show_weekday)
        ),
        _ => format!("{} -> {}", trip.start_str(), trip.end_str()),
    };
    trip_header(&trip.title, &dates);
    if window.corrupt_dates {
        warning("Trip dates are corrupt; showing day numbers only.");
    }

    let mut shown = 0usize;
    for slot in &window.slots {
        let day_info = info_by_day.get(&slot.number).copied();
        let day_items: &[&ScheduleItem] = items_by_day
            .get(&slot.number)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        let blank = day_info.is_none_or(|i| i.is_blank()) && day_items.is_empty();
        if blank && !show_all {
            continue;
        }

        print_slot(cfg, slot, day_info, day_items);
        shown += 1;
    }

    if shown == 0 {
        info("Nothing planned yet. Use `tripdeck plan add` or pass --all to see empty days.");
    }
    Ok(())
}

fn print_slot(cfg: &Config, slot: &DaySlot, info: Option<&DayInfo>, items: &[&ScheduleItem]) {
    let mut head = slot.label.text();
    if let Some(d) = slot.date {
        head.push_str(&format!("  {}", format_date(d, cfg.show_weekday)));
    }
    if let Some(i) = info {
        if !i.cities.is_empty() {
            head.push_str(&format!("  [{}]", i.cities_str()));
        }
        if !i.stay_name.is_empty() {
            head.push_str(&format!("  stay: {}", i.stay_name));
        }
    }

    println!();
    if slot.past {
        println!("{}", grey_if_past(&head, true));
    } else {
        println!("{}", bold(&head));
    }

    if let Some(i) = info {
        let mut parts = Vec::new();
        if let Some(ci) = &i.check_in {
            parts.push(format!("check-in {}", ci));
        }
        if let Some(co) = &i.check_out {
            parts.push(format!("check-out {}", co));
        }
        if !parts.is_empty() {
            println!("{}", grey_if_past(&format!("  {}", parts.join("  ")), slot.past));
        }
    }

    for item in items {
        println!("{}", item_line(cfg, item, slot.past));

        if let Some(extra) = detail_line(&item.details) {
            let padded = format!("               {}", extra);
            println!("{}", grey_if_past(&padded, slot.past));
        }

        if !item.note.is_empty() {
            for line in wrap_note(&item.note, NOTE_WRAP_WIDTH) {
                let padded = format!("               {}", italic(&line));
                println!("{}", grey_if_past(&padded, slot.past));
            }
        }
    }
}

/// One schedule row: time span, title, colored category, place, amount.
fn item_line(cfg: &Config, item: &ScheduleItem, past: bool) -> String {
    let time = match item.end_time {
        Some(_) => format!("{}-{}", item.time_str(), item.end_time_str()),
        None => item.time_str(),
    };

    let category = item.category();
    let label = if past {
        pad_right(category.label(), 13)
    } else {
        format!(
            "{}{}{}",
            color_for_category(category),
            pad_right(category.label(), 13),
            RESET
        )
    };

    let mut line = format!(
        "  {}  {}  {}",
        pad_right(&time, 11),
        pad_right(&item.title, 24),
        label
    );

    let place = item.details.where_str();
    if !place.is_empty() {
        line.push_str(&format!("  {}", place));
    }
    if item.amount != 0 {
        line.push_str(&format!("  {}", format_amount_with(item.amount, &cfg.currency)));
    }

    if past { grey_if_past(&line, true) } else { line }
}

/// Second line with the detail fields that have no column of their own.
fn detail_line(details: &CategoryDetails) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    match details {
        CategoryDetails::Transport {
            mode,
            arrives,
            booking_ref,
            ..
        } => {
            if !mode.is_empty() {
                parts.push(mode.clone());
            }
            if let Some(a) = arrives {
                parts.push(format!("arr. {}", a));
            }
            if !booking_ref.is_empty() {
                parts.push(format!("ref {}", booking_ref));
            }
        }
        CategoryDetails::Accommodation {
            check_in,
            check_out,
            booked_via,
        } => {
            if let Some(ci) = check_in {
                parts.push(format!("in: {}", ci));
            }
            if let Some(co) = check_out {
                parts.push(format!("out: {}", co));
            }
            if !booked_via.is_empty() {
                parts.push(format!("via {}", booked_via));
            }
        }
        CategoryDetails::Meal { kind, .. } => {
            if !kind.is_empty() {
                parts.push(format!("({})", kind));
            }
        }
        CategoryDetails::Other { .. }
        | CategoryDetails::Sightseeing { .. }
        | CategoryDetails::Prep => {}
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("  "))
    }
}

/// Re-render on every change until interrupted. In-process writes arrive
/// through the change feed; other processes are caught by polling
/// `PRAGMA data_version`.
fn watch_loop(pool: &DbPool, cfg: &Config, trip_id: i64, show_all: bool) -> AppResult<()> {
    info("Watching for changes. Press Ctrl-C to stop.");

    let handle = pool.feed.subscribe();
    let mut last_version = pool.data_version()?;

    loop {
        thread::sleep(Duration::from_millis(WATCH_POLL_MS));

        let version = pool.data_version()?;
        let local_events = handle.drain();

        if version != last_version || !local_events.is_empty() {
            last_version = version;
            println!();
            render(pool, cfg, trip_id, show_all)?;
        }
    }
}
