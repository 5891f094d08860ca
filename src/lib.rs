//! # garmin-to-md
//!
//! A CLI tool that converts a [Garmin Connect](https://connect.garmin.com) activities CSV
//! export into local Markdown notes, one file per activity.
//!
//! ## What it does
//!
//! Garmin Connect exports every activity into a single CSV with
//! locale-formatted numbers (decimal comma, `.` thousands separator, `--`
//! for missing values) and naive local timestamps. This tool reads that
//! table, normalizes each row, and writes a standalone Markdown file per
//! activity — optionally with Joplin-style frontmatter carrying the title,
//! creation timestamp and a `Favorite` tag.
//!
//! The input file is only ever read — your export is never modified.
//!
//! ## Usage
//!
//! ```sh
//! # Convert an export into ~/notes/workouts with Joplin frontmatter
//! garmin-to-md -f Activities.csv -d ~/notes/workouts -o joplin
//!
//! # Activities were recorded in a specific timezone
//! garmin-to-md -f Activities.csv -z Europe/Amsterdam
//! ```
//!
//! Run without `-f` to pick the CSV through a native file dialog.
//!
//! ## Collisions and re-runs
//!
//! Filenames are `<date>_<activity type>.md`, with `_1`, `_2`, … suffixes
//! for same-day duplicates. Uniqueness is tracked per run only: re-running
//! into a non-empty directory overwrites files left by earlier runs.

pub mod errors;
pub mod exporter;
pub mod importer;
pub mod picker;
pub mod sequential;
pub mod utils;
