use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::Result;

use garmin_to_md::errors::ConfigError;
use garmin_to_md::picker;
use garmin_to_md::sequential;
use garmin_to_md::utils::{self, ConvertConfig, FrontmatterMode};

/// Convert a Garmin Connect activities CSV export to Markdown notes,
/// one file per activity.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the activities CSV. Opens a file dialog if omitted.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory to write markdown files into, created if missing.
    /// Defaults to the current working directory.
    #[arg(short, long, value_name = "PATH")]
    directory: Option<PathBuf>,

    /// Frontmatter style: none | joplin.
    #[arg(short = 'o', long, value_name = "MODE", default_value = "none")]
    frontmatter: String,

    /// IANA timezone the activities were recorded in (e.g. Europe/Amsterdam).
    /// Defaults to the system timezone.
    #[arg(short = 'z', long, value_name = "ZONE")]
    timezone: Option<String>,

    /// Tag favorite activities in Joplin frontmatter: true/t or false/f.
    #[arg(short = 't', long, value_name = "BOOL", default_value = "true")]
    favorite_tag: String,
}

/// Validate the CLI arguments into an immutable [`ConvertConfig`].
///
/// Flag values are checked before the file picker opens, so a typo in
/// `--frontmatter` fails fast instead of after the dialog.
fn resolve_config(cli: Cli) -> Result<ConvertConfig, ConfigError> {
    let frontmatter: FrontmatterMode = cli.frontmatter.parse()?;
    let favorite_tag = utils::parse_favorite_tag(&cli.favorite_tag)?;
    let timezone = utils::resolve_timezone(cli.timezone.as_deref())?;

    let csv_path = match cli.file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::InputMissing(path));
            }
            path
        }
        None => picker::select_file()?,
    };

    let target_dir = match cli.directory {
        Some(dir) => {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(|source| ConfigError::Directory {
                    path: dir.clone(),
                    source,
                })?;
            }
            dir
        }
        None => std::env::current_dir().map_err(|source| ConfigError::Directory {
            path: PathBuf::from("."),
            source,
        })?,
    };

    Ok(ConvertConfig {
        csv_path,
        target_dir,
        frontmatter,
        timezone,
        favorite_tag,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli)?;

    println!(
        "Running garmin-to-md with the following parameters:\n   \
         Input file: {}\n   \
         Output directory: {}\n   \
         Frontmatter: {}\n   \
         Timezone: {}\n   \
         Add tags for favorites (Joplin): {}\n",
        config.csv_path.display(),
        config.target_dir.display(),
        config.frontmatter,
        config.timezone,
        config.favorite_tag,
    );

    sequential::execute(config)
}
