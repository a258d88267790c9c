use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the TUI writes its log, since stdout belongs to the terminal UI.
    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("padwork.log"))
    }

    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("padwork"),
            )
        } else {
            ProjectDirs::from("", "", "padwork").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
