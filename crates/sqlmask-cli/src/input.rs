//! Input handling for the SQL argument, files and stdin.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::Path;

/// Resolve the SQL to anonymize.
///
/// The positional argument is used verbatim. Otherwise the query is read from
/// `file`, or from stdin when it is not a terminal. One trailing line break is
/// dropped from file and stdin input.
pub fn read_sql(sql: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(sql) = sql {
        return Ok(sql.to_string());
    }
    if let Some(path) = file {
        return read_from_file(path);
    }
    if io::stdin().is_terminal() {
        bail!("no SQL given: pass a query argument, --file, or pipe SQL on stdin");
    }
    read_from_stdin()
}

/// Read SQL from stdin
fn read_from_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    Ok(strip_line_break(content))
}

/// Read SQL from a file
fn read_from_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(strip_line_break(content))
}

fn strip_line_break(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}
