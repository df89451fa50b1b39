// src/export/logic.rs

use crate::core::window::DayWindow;
use crate::db::log::tdlog;
use crate::db::pool::DbPool;
use crate::db::{schedule, trips};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ScheduleExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::Trip;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the schedule of one trip.
    ///
    /// - `format`: csv | json | xlsx | pdf
    /// - `file`: output path, `~` is expanded, must end up absolute
    /// - `day`: optional filter to a single day number of the window
    /// - `force`: overwrite an existing file without asking
    pub fn export(
        pool: &mut DbPool,
        trip_id: i64,
        format: ExportFormat,
        file: &str,
        day: Option<i64>,
        force: bool,
    ) -> AppResult<()> {
        let trip = trips::get_trip(&pool.conn, trip_id)?;
        let window = DayWindow::resolve(&trip);

        let path = expand_tilde(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        if let Some(d) = day
            && !window.contains(d)
        {
            return Err(AppError::InvalidDay(format!(
                "day {d} is outside the trip window ({}..={})",
                window.min_day(),
                window.max_day()
            )));
        }

        ensure_writable(&path, force)?;

        let items = match day {
            Some(d) => schedule::load_items_by_day(&pool.conn, trip_id, d)?,
            None => schedule::load_items_by_trip(&pool.conn, trip_id)?,
        };

        if items.is_empty() {
            warning("No schedule items found for the selected trip.");
            return Ok(());
        }

        let rows: Vec<ScheduleExport> = items
            .iter()
            .map(|it| ScheduleExport::from_item(it, &trip))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(&trip, day);
                export_pdf(&rows, &path, &title)?;
            }
        }

        tdlog(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("trip {} -> {}", trip_id, path.display()),
        )?;

        Ok(())
    }
}

/// PDF title, mentioning the day filter when one is active.
fn build_pdf_title(trip: &Trip, day: Option<i64>) -> String {
    match day {
        Some(d) => format!("Itinerary for {} (day {d})", trip.title),
        None => format!("Itinerary for {}", trip.title),
    }
}
