//! Error types for the conversion pipeline.
//!
//! Three stages, three types: [`ConfigError`] before anything runs,
//! [`LoadError`] before any output file is written, [`WriteError`] mid-run.
//! None of them are retried; the first failure aborts the conversion.

use std::io;
use std::path::PathBuf;

use chrono_tz::Tz;
use thiserror::Error;

/// Invalid or missing CLI input. Nothing has been read or written yet.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("input file does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("output directory {} does not exist and could not be created", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported frontmatter {0:?}. Possible values: none, joplin")]
    Frontmatter(String),

    #[error("invalid timezone {0:?}. Should be an IANA name, for example Europe/Amsterdam")]
    Timezone(String),

    #[error("could not detect the system timezone: {0}")]
    TimezoneDetect(String),

    #[error("invalid value {0:?} for favorite-tag. Should be true/t or false/f")]
    FavoriteTag(String),

    #[error("no input file selected")]
    NoFileSelected,
}

/// The input table could not be read or failed validation.
/// Raised while loading, before any output file is written.
///
/// Row numbers count lines of the input file, so the first data row is
/// row 2 (the header is row 1).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: unparseable number {value:?} in column {column}")]
    Number {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: unparseable timestamp {value:?}")]
    Timestamp { row: usize, value: String },

    #[error("row {row}: timestamp {value:?} does not exist in timezone {zone}")]
    NonexistentTime {
        row: usize,
        value: String,
        zone: Tz,
    },

    #[error("row {row}: malformed duration {value:?}, expected H:MM")]
    Duration { row: usize, value: String },
}

/// Filesystem failure while writing one output file. Earlier writes stay
/// in place; there is no rollback.
#[derive(Debug, Error)]
#[error("failed to write {}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
