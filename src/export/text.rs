//! Plain-text export.

use chrono::{DateTime, Local};

use super::{footer_line, EXPORT_TITLE};

/// Title, a rule, the jokes separated by blank lines, then the footer.
pub fn render_text(jokes: &[String], at: &DateTime<Local>) -> String {
    format!(
        "{}\n{}\n\n{}\n\n\n{}",
        EXPORT_TITLE,
        "=".repeat(50),
        jokes.join("\n\n"),
        footer_line(at)
    )
}
