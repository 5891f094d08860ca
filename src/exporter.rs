//! Renders one activity as Markdown: optional Joplin frontmatter followed by
//! a fixed-order body. Pure given immutable inputs; only sink errors surface.
//!
//! Absent optional fields elide their whole line. Nothing here ever prints
//! "nan" or a zero placeholder.

use std::io::Write;

use crate::importer::Activity;
use crate::utils::{ConvertConfig, FrontmatterMode};

/// Activity-type category driving the unit-specific body block.
///
/// The set of types is open; anything unrecognized is `Other` and simply
/// gets no category block.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Category {
    LandDistance,
    Cycling,
    Swimming,
    Other,
}

impl Category {
    pub fn of(activity_type: &str) -> Self {
        match activity_type {
            "Running" | "Treadmill Running" | "Hiking" | "Walking" => Self::LandDistance,
            "Cycling" | "Mountain Biking" => Self::Cycling,
            "Open Water Swimming" | "Pool Swim" => Self::Swimming,
            _ => Self::Other,
        }
    }
}

/// Write the full note for one activity.
pub fn write_activity<W: Write>(
    writer: &mut W,
    activity: &Activity,
    config: &ConvertConfig,
) -> std::io::Result<()> {
    let local = activity.date.with_timezone(&config.timezone);

    if config.frontmatter == FrontmatterMode::Joplin {
        writeln!(writer, "---")?;
        writeln!(writer, "title: \"{}\"", activity.title)?;
        // The trailing Z is part of the established note format even though
        // the timestamp is local time, not UTC. Joplin imports it as-is.
        writeln!(writer, "created: {}Z", local.format("%Y-%m-%d %H:%M:%S"))?;
        if config.favorite_tag && activity.favorite {
            writeln!(writer, "tags:")?;
            writeln!(writer, "  - Favorite")?;
        }
        writeln!(writer, "---")?;
        writeln!(writer)?;
    } else {
        // Without frontmatter the title moves into the body.
        writeln!(writer, "**{}**", activity.title)?;
    }

    writeln!(writer, "Activity type: {}", activity.activity_type)?;
    writeln!(writer, "Date: {}", local.format("%A %B %-d %Y"))?;
    writeln!(writer, "Duration: {}", format_duration(&activity.time))?;

    match Category::of(&activity.activity_type) {
        Category::LandDistance => {
            if let Some(km) = activity.distance {
                writeln!(writer, "Distance: {km:.2} km")?;
            }
            if let (Some(avg), Some(best)) = (&activity.avg_pace, &activity.best_pace) {
                writeln!(writer, "Pace: {avg} min/km (average), {best} min/km (max)")?;
            }
            if let Some(ascent) = activity.total_ascent {
                writeln!(writer, "Ascent: {ascent:.0} m")?;
            }
        }
        Category::Cycling => {
            if let Some(km) = activity.distance {
                writeln!(writer, "Distance: {km:.2} km")?;
            }
            if let (Some(avg), Some(best)) = (&activity.avg_pace, &activity.best_pace) {
                // Garmin writes km/h with a decimal comma.
                writeln!(
                    writer,
                    "Speed: {} km/h (average), {} km/h (max)",
                    avg.replace(',', "."),
                    best.replace(',', ".")
                )?;
            }
            if let Some(ascent) = activity.total_ascent {
                writeln!(writer, "Ascent: {ascent:.0} m")?;
            }
        }
        Category::Swimming => {
            // Swim distances are exported in meters; the number is taken
            // as-is, only the unit label changes.
            if let Some(meters) = activity.distance {
                writeln!(writer, "Distance: {meters:.2} m")?;
            }
            if let Some(avg) = &activity.avg_pace {
                let best = activity.best_pace.as_deref().unwrap_or("-");
                writeln!(
                    writer,
                    "Speed: {avg} min/100m (average), {best} min/100m (max)"
                )?;
            }
        }
        Category::Other => {}
    }

    if let Some(calories) = activity.calories {
        writeln!(writer, "Calories: {calories:.0}")?;
    }
    if let (Some(avg), Some(max)) = (activity.avg_hr, activity.max_hr) {
        writeln!(writer, "Heart rate: {avg:.0} bpm (average), {max:.0} bpm (max)")?;
    }

    Ok(())
}

/// Render `H:MM[:SS]` as "H hour(s) and M minute(s)". The hours phrase
/// drops out when the hours component is "0"; singular forms apply exactly
/// at 1. The loader has already validated the shape, so the fallbacks here
/// never fire on real input.
pub fn format_duration(raw: &str) -> String {
    let mut parts = raw.split(':');
    let hours = parts.next().unwrap_or("0");
    let minutes: u32 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    let minute_word = if minutes == 1 { "minute" } else { "minutes" };
    if hours == "0" {
        format!("{minutes} {minute_word}")
    } else {
        let hour_word = if hours == "1" { "hour" } else { "hours" };
        format!("{hours} {hour_word} and {minutes} {minute_word}")
    }
}
