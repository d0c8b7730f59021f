//! Reading agenda sources and writing the finished calendar.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

const STDIN_PATH: &str = "-";

/// How a source is named in diagnostics.
pub fn display_name(path: &Path) -> String {
    if path == Path::new(STDIN_PATH) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Read a whole source. Invalid UTF-8 is replaced rather than rejected.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = if path == Path::new(STDIN_PATH) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(path)?
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the calendar to `path`, or to stdout when `None`.
pub fn write_output(path: Option<&Path>, document: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("Failed to write calendar to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write calendar to standard output")
        }
    }
}
