// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{entries_to_table, get_headers};
use crate::export::pdf::PdfManager;
use crate::export::{ScheduleExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Export PDF via PdfManager.
pub(crate) fn export_pdf(rows: &[ScheduleExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let table = entries_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &table);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
