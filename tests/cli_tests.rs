use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "Activity Type,Date,Favorite,Title,Distance,Calories,Time,Avg HR,Max HR,Avg Pace,Best Pace,Total Ascent";

const RUNNING_ROW: &str =
    r#"Running,2024-05-01 08:00:00,true,Morning Run,"5,20",300,0:32,140,160,6:10,5:45,50"#;

fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("Activities.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("garmin-to-md").unwrap()
}

#[test]
fn converts_a_running_row_end_to_end() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running garmin-to-md"));

    let note = fs::read_to_string(out.path().join("2024-05-01_Running.md")).unwrap();
    assert_eq!(
        note,
        "**Morning Run**\n\
         Activity type: Running\n\
         Date: Wednesday May 1 2024\n\
         Duration: 32 minutes\n\
         Distance: 5.20 km\n\
         Pace: 6:10 min/km (average), 5:45 min/km (max)\n\
         Ascent: 50 m\n\
         Calories: 300\n\
         Heart rate: 140 bpm (average), 160 bpm (max)\n"
    );
}

#[test]
fn joplin_mode_writes_frontmatter_with_favorite_tag() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC", "-o", "joplin"])
        .assert()
        .success();

    let note = fs::read_to_string(out.path().join("2024-05-01_Running.md")).unwrap();
    assert!(note.starts_with(
        "---\n\
         title: \"Morning Run\"\n\
         created: 2024-05-01 08:00:00Z\n\
         tags:\n\
         \x20 - Favorite\n\
         ---\n\
         \n\
         Activity type: Running\n"
    ));
    assert!(!note.contains("**Morning Run**"));
}

#[test]
fn favorite_tag_flag_disables_the_tags_block() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC", "-o", "joplin", "-t", "F"])
        .assert()
        .success();

    let note = fs::read_to_string(out.path().join("2024-05-01_Running.md")).unwrap();
    assert!(!note.contains("tags:"));
}

#[test]
fn duplicate_date_and_type_get_numbered_suffixes() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW, RUNNING_ROW, RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC"])
        .assert()
        .success();

    assert!(out.path().join("2024-05-01_Running.md").exists());
    assert!(out.path().join("2024-05-01_Running_1.md").exists());
    assert!(out.path().join("2024-05-01_Running_2.md").exists());
}

#[test]
fn swim_rows_render_distance_in_meters() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(
        dir.path(),
        &[r#"Pool Swim,2024-05-02 07:00:00,false,Laps,1000,350,0:40,--,--,2:05,--,--"#],
    );

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC"])
        .assert()
        .success();

    let note = fs::read_to_string(out.path().join("2024-05-02_Pool_Swim.md")).unwrap();
    assert!(note.contains("Distance: 1000.00 m"));
    assert!(note.contains("Speed: 2:05 min/100m (average), - min/100m (max)"));
    assert!(!note.contains("Heart rate"));
}

#[test]
fn timestamps_round_trip_through_the_configured_timezone() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "Europe/Amsterdam", "-o", "joplin"])
        .assert()
        .success();

    // Localized to Amsterdam, stored as UTC, rendered back in Amsterdam:
    // the wall-clock time from the CSV reappears unchanged.
    let note = fs::read_to_string(out.path().join("2024-05-01_Running.md")).unwrap();
    assert!(note.contains("created: 2024-05-01 08:00:00Z"));
}

#[test]
fn creates_a_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("notes").join("workouts");
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(&out)
        .args(["-z", "UTC"])
        .assert()
        .success();

    assert!(out.join("2024-05-01_Running.md").exists());
}

#[test]
fn rejects_unknown_frontmatter() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .args(["-o", "obsidian"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frontmatter"));
}

#[test]
fn rejects_invalid_timezone() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .args(["-z", "Mars/Olympus_Mons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IANA"));
}

#[test]
fn rejects_invalid_favorite_tag() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), &[RUNNING_ROW]);

    cmd()
        .arg("-f")
        .arg(&csv)
        .args(["-t", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("favorite-tag"));
}

#[test]
fn rejects_a_nonexistent_input_file() {
    cmd()
        .args(["-f", "/no/such/Activities.csv", "-z", "UTC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn reports_missing_columns_by_name() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let path = dir.path().join("Activities.csv");
    fs::write(&path, "Activity Type,Date,Favorite,Title\nRunning,2024-05-01 08:00:00,true,Run\n")
        .unwrap();

    cmd()
        .arg("-f")
        .arg(&path)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Avg HR"));
}

#[test]
fn a_bad_row_aborts_before_any_file_is_written() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = write_csv(
        dir.path(),
        &[
            RUNNING_ROW,
            r#"Running,not a date,true,Broken,"5,20",300,0:32,140,160,6:10,5:45,50"#,
        ],
    );

    cmd()
        .arg("-f")
        .arg(&csv)
        .arg("-d")
        .arg(out.path())
        .args(["-z", "UTC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 3"));

    // The whole table is validated before the first write.
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn help_prints_usage_and_exits_zero() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--frontmatter"));
}
