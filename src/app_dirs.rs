use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default log file: `$HOME/.local/state/rps-duel/rps-duel.log`
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("rps-duel");
            Some(state_dir.join("rps-duel.log"))
        } else {
            ProjectDirs::from("", "", "rps-duel")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("rps-duel.log"))
        }
    }
}
