//! Platform-specific state directory management

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

/// Manages platform-specific application directories for persisted sessions and logs
#[derive(Debug, Clone)]
pub struct StateDir {
    /// Project directories from the directories crate
    project_dirs: Option<ProjectDirs>,
    /// Override directory for testing or custom installations
    override_dir: Option<PathBuf>,
}

impl StateDir {
    /// Create a new StateDir instance
    pub fn new() -> Self {
        let project_dirs = ProjectDirs::from("com", "Adpanel", "adpanel");

        if project_dirs.is_none() {
            warn!("Failed to determine platform-specific directories, will use fallback");
        }

        Self {
            project_dirs,
            override_dir: None,
        }
    }

    /// Create a new StateDir rooted at an explicit directory
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            project_dirs: None,
            override_dir: Some(path.into()),
        }
    }

    /// Resolve from an optional override, falling back to platform directories
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        override_dir.map_or_else(Self::new, Self::with_override)
    }

    /// Get the configuration directory
    pub fn config_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("config");
        }

        if let Some(project_dirs) = &self.project_dirs {
            project_dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from("./config")
        }
    }

    /// Get the data directory for persistent storage
    pub fn data_dir(&self) -> PathBuf {
        if let Some(override_dir) = &self.override_dir {
            return override_dir.join("data");
        }

        if let Some(project_dirs) = &self.project_dirs {
            project_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("./data")
        }
    }

    /// Directory holding the persisted session slots
    pub fn session_dir(&self) -> PathBuf {
        self.data_dir().join("session")
    }

    /// Path of the CLI log file
    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("adpanel.log")
    }
}

impl Default for StateDir {
    fn default() -> Self {
        Self::new()
    }
}
