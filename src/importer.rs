//! Loads a Garmin Connect activities CSV into [`Activity`] records.
//!
//! Garmin exports use a European locale: `,` as the decimal separator, `.`
//! as the thousands separator and `--` as the missing-value token.
//! Timestamps are naive wall-clock times in whatever zone the watch was set
//! to; the loader localizes them to the configured zone and stores UTC.
//!
//! The whole table is read and validated up front, so a [`LoadError`]
//! surfaces before any output file has been written.

use std::path::Path;

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use csv::ReaderBuilder;
use serde::Deserialize;

use crate::errors::LoadError;

/// Columns the converter needs. Garmin exports carry many more; the rest
/// are ignored.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "Activity Type",
    "Date",
    "Favorite",
    "Title",
    "Distance",
    "Calories",
    "Time",
    "Avg HR",
    "Max HR",
    "Avg Pace",
    "Best Pace",
    "Total Ascent",
];

/// Garmin's missing-value token.
const MISSING: &str = "--";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// One activity row, validated and normalized.
///
/// Absent optional fields are `None`, never a sentinel number; the exporter
/// elides their lines instead of printing placeholders.
#[derive(Debug, Clone)]
pub struct Activity {
    pub activity_type: String,
    /// Always stored as UTC; rendered in the configured display zone.
    pub date: DateTime<Utc>,
    pub favorite: bool,
    pub title: String,
    /// Kilometers for land activities, meters for swims. The unit is
    /// reinterpreted per category, never converted.
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    /// Raw `H:MM[:SS]` duration; shape is validated at load time.
    pub time: String,
    pub avg_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub avg_pace: Option<String>,
    pub best_pace: Option<String>,
    pub total_ascent: Option<f64>,
}

/// Raw CSV row as exported by Garmin Connect. Everything is a string at
/// this stage; coercion happens in [`convert_row`].
#[derive(Debug, Deserialize)]
struct RawActivity {
    #[serde(rename = "Activity Type")]
    activity_type: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Favorite")]
    favorite: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Distance")]
    distance: String,
    #[serde(rename = "Calories")]
    calories: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Avg HR")]
    avg_hr: String,
    #[serde(rename = "Max HR")]
    max_hr: String,
    #[serde(rename = "Avg Pace")]
    avg_pace: String,
    #[serde(rename = "Best Pace")]
    best_pace: String,
    #[serde(rename = "Total Ascent")]
    total_ascent: String,
}

/// Read and validate the whole table.
pub fn load_activities(path: &Path, timezone: Tz) -> Result<Vec<Activity>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut activities = Vec::new();
    for (index, record) in reader.deserialize::<RawActivity>().enumerate() {
        // The header is row 1, so data starts at row 2.
        let row = index + 2;
        let raw = record.map_err(|source| LoadError::Row { row, source })?;
        activities.push(convert_row(raw, row, timezone)?);
    }
    Ok(activities)
}

fn convert_row(raw: RawActivity, row: usize, timezone: Tz) -> Result<Activity, LoadError> {
    let date = parse_timestamp(&raw.date, row, timezone)?;
    validate_duration(&raw.time, row)?;

    Ok(Activity {
        activity_type: raw.activity_type,
        date,
        favorite: raw.favorite == "true",
        title: if raw.title == MISSING {
            String::new()
        } else {
            raw.title
        },
        distance: parse_locale_float(&raw.distance, row, "Distance")?,
        calories: parse_locale_float(&raw.calories, row, "Calories")?,
        time: raw.time,
        avg_hr: parse_locale_float(&raw.avg_hr, row, "Avg HR")?,
        max_hr: parse_locale_float(&raw.max_hr, row, "Max HR")?,
        avg_pace: optional_text(raw.avg_pace),
        best_pace: optional_text(raw.best_pace),
        total_ascent: parse_locale_float(&raw.total_ascent, row, "Total Ascent")?,
    })
}

fn optional_text(value: String) -> Option<String> {
    if value.is_empty() || value == MISSING {
        None
    } else {
        Some(value)
    }
}

/// Coerce a locale-formatted number: `.` thousands, `,` decimal, `--` or
/// empty means absent.
fn parse_locale_float(
    value: &str,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, LoadError> {
    if value.is_empty() || value == MISSING {
        return Ok(None);
    }
    let normalized = value.replace('.', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::Number {
            row,
            column,
            value: value.to_string(),
        })
}

/// Parse a naive timestamp, localize it to `timezone` and convert to UTC.
///
/// DST makes some wall-clock times ambiguous (the repeated hour resolves to
/// the earlier instant) and some nonexistent (an error).
fn parse_timestamp(value: &str, row: usize, timezone: Tz) -> Result<DateTime<Utc>, LoadError> {
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| LoadError::Timestamp {
            row,
            value: value.to_string(),
        })?;

    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(LoadError::NonexistentTime {
            row,
            value: value.to_string(),
            zone: timezone,
        }),
    }
}

/// The `Time` column must look like `H:MM[:SS]`; the exporter re-parses it
/// when rendering the duration line.
fn validate_duration(value: &str, row: usize) -> Result<(), LoadError> {
    let mut parts = value.split(':');
    let hours = parts.next().unwrap_or("");
    let minutes = parts.next();
    let ok = !hours.is_empty()
        && hours.chars().all(|c| c.is_ascii_digit())
        && minutes.is_some_and(|m| !m.is_empty() && m.chars().all(|c| c.is_ascii_digit()));
    if ok {
        Ok(())
    } else {
        Err(LoadError::Duration {
            row,
            value: value.to_string(),
        })
    }
}
