//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Wrap a free-text note to `width` columns for indented display under a
/// schedule row. Empty input yields no lines.
pub fn wrap_note(s: &str, width: usize) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    textwrap::wrap(s, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_note_skips_empty() {
        assert!(wrap_note("", 20).is_empty());
        assert!(wrap_note("   ", 20).is_empty());
    }

    #[test]
    fn wrap_note_splits_long_text() {
        let lines = wrap_note("bring passport and printed tickets for the museum", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 20));
    }
}
