use std::{
    fs::{File, OpenOptions},
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Local};
use stackfall_engine::GameSummary;
use tracing::{debug, info};

pub const HEADER: &str = "score    line    time    scorePtime    linePtime    scorePline    date";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only text file holding one line per finished game.
#[derive(Debug)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    /// Opens the score file at `path`, creating it if needed.
    ///
    /// The column header is appended unless the file already starts with it.
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        let has_header = starts_with_header(&path)
            .with_context(|| format!("Failed to read score file: {}", path.display()))?;
        if !has_header {
            let mut file = open_append(&path)?;
            writeln!(file, "{HEADER}")
                .with_context(|| format!("Failed to write score file: {}", path.display()))?;
            debug!(path = %path.display(), "wrote score file header");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a record for `summary`. Games that scored nothing are skipped.
    ///
    /// Returns whether a record was written.
    pub fn append(&self, summary: &GameSummary, finished_at: DateTime<Local>) -> anyhow::Result<bool> {
        if summary.score() == 0 {
            return Ok(false);
        }
        let mut file = open_append(&self.path)?;
        writeln!(file, "{}", format_record(summary, finished_at))
            .with_context(|| format!("Failed to write score file: {}", self.path.display()))?;
        info!(
            score = summary.score(),
            lines = summary.cleared_lines(),
            path = %self.path.display(),
            "saved score"
        );
        Ok(true)
    }
}

fn starts_with_header(path: &Path) -> io::Result<bool> {
    const MARKER: &[u8] = b"score";
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let mut prefix = Vec::with_capacity(MARKER.len());
    file.take(MARKER.len() as u64).read_to_end(&mut prefix)?;
    Ok(prefix == MARKER)
}

fn open_append(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open score file: {}", path.display()))
}

/// Formats one record line, without the trailing newline.
///
/// Columns are left-aligned and padded to the widths of [`HEADER`]. A rate
/// whose denominator is zero is written as `-`.
pub fn format_record(summary: &GameSummary, finished_at: DateTime<Local>) -> String {
    let rate = |value: Option<f64>| value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"));
    format!(
        "{score:<9}{lines:<8}{time:<8.2}{score_per_time:<14}{lines_per_time:<13}{score_per_line:<14}{date}",
        score = summary.score(),
        lines = summary.cleared_lines(),
        time = summary.elapsed().as_secs_f64(),
        score_per_time = rate(summary.score_per_second()),
        lines_per_time = rate(summary.lines_per_second()),
        score_per_line = rate(summary.score_per_line()),
        date = finished_at.format(DATE_FORMAT),
    )
}
