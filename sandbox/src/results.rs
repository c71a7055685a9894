//! Semicolon-separated statistics file.

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use gridpath_search::{RunStatistics, StatsSink};

use crate::config::{CSV_DELIMITER, CSV_HEADER};

/// Appends one row per run to a CSV file, creating the file (and its
/// directory) with a header row on first use.
#[derive(Debug, Clone)]
pub struct CsvStatsSink {
    path: PathBuf,
}

impl CsvStatsSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Quote a field holding the delimiter, a quote or a line break; inner
/// quotes are doubled.
fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([CSV_DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Format one record as a row, without the line terminator.
pub fn csv_row(stats: &RunStatistics) -> String {
    let found = if stats.found { "True" } else { "False" };
    let fields = [
        stats.algorithm_name().to_string(),
        stats.path_length.to_string(),
        stats.visited_count.to_string(),
        stats.max_frontier_size.to_string(),
        stats.runtime_seconds.to_string(),
        found.to_string(),
        stats.map_label().to_string(),
    ];
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(&CSV_DELIMITER.to_string())
}

impl StatsSink for CsvStatsSink {
    fn record(&mut self, stats: &RunStatistics) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let fresh = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut w = BufWriter::new(file);
        if fresh {
            writeln!(w, "{}", CSV_HEADER.join(&CSV_DELIMITER.to_string()))?;
        }
        writeln!(w, "{}", csv_row(stats))?;
        w.flush()?;
        log::debug!("Recorded {} run in {}", stats.algorithm_name(), self.path.display());
        Ok(())
    }
}
