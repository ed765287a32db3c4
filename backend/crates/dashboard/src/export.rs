//! CSV export of the current dashboard view.
//!
//! Exports the filtered and sorted view in full, not the visible page.
//! Fields are quoted per RFC 4180 when they contain separators, quotes, or
//! line breaks; everything else is written bare to keep diffs readable.

use chrono::NaiveDate;

use crate::record::FeedbackRecord;

/// Column headers, in export order.
pub const CSV_COLUMNS: [&str; 5] = ["Name", "Email", "Category", "Message", "Date"];

/// Render the given rows as CSV text, headers first.
pub fn to_csv(rows: &[FeedbackRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_COLUMNS.map(str::to_owned));
    for row in rows {
        push_row(
            &mut out,
            [
                row.name.clone(),
                row.email.clone(),
                row.category_key().to_owned(),
                row.message.clone(),
                row.created_at.to_rfc3339(),
            ],
        );
    }
    out
}

/// File name for an export taken on the given date, e.g.
/// `feedback-export-2025-07-15.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("feedback-export-{date}.csv")
}

fn push_row(out: &mut String, fields: [String; 5]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape(&field));
    }
    out.push('\n');
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
