//! Native file-selection dialog, kept behind a single function so the rest
//! of the pipeline stays UI-free.

use std::env;
use std::path::PathBuf;

use crate::errors::ConfigError;

/// Ask the user to pick the activities CSV. Cancelling the dialog is a
/// [`ConfigError`], same as passing a nonexistent `--file`.
pub fn select_file() -> Result<PathBuf, ConfigError> {
    let start_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    rfd::FileDialog::new()
        .set_title("Select Garmin activities CSV")
        .add_filter("CSV", &["csv"])
        .set_directory(start_dir)
        .pick_file()
        .ok_or(ConfigError::NoFileSelected)
}
