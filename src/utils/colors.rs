/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::Category;

/// Returns GREY when the field is empty (None or "" or "--:--"),
/// and RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() && v.as_ref() != "--:--" => RESET,
        _ => GREY,
    }
}

/// Category accent used in timetable and budget listings.
pub fn color_for_category(category: Category) -> &'static str {
    match category {
        Category::Transport => CYAN,
        Category::Sightseeing => GREEN,
        Category::Meal => YELLOW,
        Category::Accommodation => MAGENTA,
        Category::Prep => BLUE,
        Category::Other => RESET,
    }
}

/// Grey out a rendered line when it belongs to a day already travelled.
pub fn grey_if_past(line: &str, past: bool) -> String {
    if past {
        format!("{GREY}{line}{RESET}")
    } else {
        line.to_string()
    }
}
