//! The conversion run: load everything, then write one Markdown file per
//! activity, strictly in row order.
//!
//! Sequential processing is a correctness requirement, not a convenience:
//! filename collisions are resolved against a registry whose suffix
//! numbering depends on row order.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::errors::WriteError;
use crate::exporter;
use crate::importer;
use crate::utils::ConvertConfig;

/// The main entry point for the conversion. Expects the output directory to
/// exist already; the resolver creates it.
pub fn execute(config: ConvertConfig) -> Result<()> {
    let activities = importer::load_activities(&config.csv_path, config.timezone)?;
    let total = activities.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Converting to markdown");
    pb.println(format!("Found {} activities.", total));

    let mut registry: HashSet<String> = HashSet::new();

    for activity in &activities {
        let stem = allocate_filename(
            &activity.date,
            &activity.activity_type,
            config.timezone,
            &mut registry,
        );
        let path = config.target_dir.join(format!("{}.md", stem));

        let file = File::create(&path).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        exporter::write_activity(&mut writer, activity, &config).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| WriteError { path, source })?;

        pb.inc(1);
    }

    pb.finish_and_clear();
    eprintln!("Done. {} activities converted.", total);

    Ok(())
}

/// Derive a unique filename stem for one activity and claim it in the
/// registry.
///
/// Base form is `YYYY-MM-DD_Activity_Type` (date in the display zone,
/// spaces replaced); collisions get `_1`, `_2`, … in row order. The
/// registry starts empty each run, so a re-run into a non-empty directory
/// overwrites files with reused names.
pub fn allocate_filename(
    date: &DateTime<Utc>,
    activity_type: &str,
    timezone: Tz,
    registry: &mut HashSet<String>,
) -> String {
    let base = format!(
        "{}_{}",
        date.with_timezone(&timezone).format("%Y-%m-%d"),
        activity_type
    )
    .replace(' ', "_");

    let mut name = base.clone();
    let mut suffix = 1;
    while registry.contains(&name) {
        name = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    registry.insert(name.clone());
    name
}
