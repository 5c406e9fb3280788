use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Results database under `$HOME/.local/state/tadak`, with a
    /// platform-specific fallback when `HOME` is unset.
    pub fn db_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("tadak");
            Some(state_dir.join("results.db"))
        } else {
            ProjectDirs::from("", "", "tadak")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("results.db"))
        }
    }

    /// Persisted configuration file location.
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "tadak") {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("tadak_config.json")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_names_the_file() {
        let path = AppDirs::config_path();
        assert!(path.ends_with("config.json"));
    }
}
