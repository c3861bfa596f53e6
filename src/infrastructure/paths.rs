//! Path resolution via the platform's standard directories.
//!
//! | What            | Location (Linux)                               |
//! |-----------------|------------------------------------------------|
//! | data directory  | `~/.local/share/movieflix`                     |
//! | session file    | `<data dir>/session.json`                      |
//! | config file     | `<data dir>/movieflix.toml`                    |
//! | CSV exports     | `~/Downloads`, falling back to the working dir |

use std::path::{Path, PathBuf};

const APP_DIR: &str = "movieflix";
const SESSION_FILE: &str = "session.json";
const CONFIG_FILE: &str = "movieflix.toml";

/// Returns the directory holding the session snapshot and traces.
///
/// Falls back to `./.movieflix` when the platform reports no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".movieflix"), |dir| dir.join(APP_DIR))
}

/// Returns where exported CSV files are written by default.
#[must_use]
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[must_use]
pub fn session_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

#[must_use]
pub fn config_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a tilde, and all paths when no home directory is known, are
/// returned unchanged.
///
/// ```
/// use movieflix::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
