use std::io::{self, Write};
use serde_json::Value;
use crate::models::{ResultSet, MAX_RESULTS};

const SEPARATOR_WIDTH: usize = 50;

/// Print the similar entries to stdout
pub fn display_similar_entries(results: &ResultSet) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render_similar_entries(results, &mut handle)?;
    handle.flush()
}

/// Write the console report for `results`
///
/// A banner, then one block per record (1-indexed) listing every field in the
/// record's own key order, each block closed by a separator line.
pub fn render_similar_entries<W: Write>(results: &ResultSet, out: &mut W) -> io::Result<()> {
    let separator = "-".repeat(SEPARATOR_WIDTH);

    writeln!(out, "\nTop {} Similar Timeline Entries:", MAX_RESULTS)?;
    writeln!(out, "{}", separator)?;

    for (i, record) in results.iter().enumerate() {
        writeln!(out, "\nEntry {}:", i + 1)?;
        match record {
            Value::Object(fields) => {
                for (key, value) in fields {
                    writeln!(out, "{}: {}", key, format_value(value))?;
                }
            }
            other => writeln!(out, "value: {}", format_value(other))?,
        }
        writeln!(out, "{}", separator)?;
    }

    Ok(())
}

/// Strings print bare, everything else as compact JSON
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
