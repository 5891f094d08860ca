use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::errors::ConfigError;

/// Configuration required to run the conversion.
/// This decouples the logic from how the arguments were parsed.
#[derive(Clone)]
pub struct ConvertConfig {
    pub csv_path: PathBuf,
    pub target_dir: PathBuf,
    pub frontmatter: FrontmatterMode,
    pub timezone: Tz,
    pub favorite_tag: bool,
}

/// Which frontmatter block, if any, to prepend to each note.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrontmatterMode {
    None,
    Joplin,
}

impl FromStr for FrontmatterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "joplin" => Ok(Self::Joplin),
            other => Err(ConfigError::Frontmatter(other.to_string())),
        }
    }
}

impl fmt::Display for FrontmatterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Joplin => write!(f, "joplin"),
        }
    }
}

/// Parse the `t`/`true`/`f`/`false` favorite-tag flag, case-insensitively.
pub fn parse_favorite_tag(value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "t" | "true" => Ok(true),
        "f" | "false" => Ok(false),
        _ => Err(ConfigError::FavoriteTag(value.to_string())),
    }
}

/// Resolve the display timezone: an explicit IANA name if given, else the
/// system zone.
pub fn resolve_timezone(explicit: Option<&str>) -> Result<Tz, ConfigError> {
    match explicit {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| ConfigError::Timezone(name.to_string())),
        None => {
            let name = iana_time_zone::get_timezone()
                .map_err(|e| ConfigError::TimezoneDetect(e.to_string()))?;
            name.parse::<Tz>().map_err(|_| ConfigError::Timezone(name))
        }
    }
}
