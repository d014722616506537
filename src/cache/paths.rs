// Workspace path utilities.
// Resolves the README, config file, and state file relative to a workspace root.

use std::path::{Path, PathBuf};

/// Directory holding persisted run state, relative to the workspace root.
pub const STATE_DIR: &str = ".github/.state";

/// State file name inside [`STATE_DIR`].
pub const STATE_FILE: &str = "state.json";

/// Optional config file, relative to the workspace root.
pub const CONFIG_FILE: &str = ".github/readme.config.json";

/// Target document, relative to the workspace root.
pub const README_FILE: &str = "README.md";

/// Files the tool reads and writes during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub readme: PathBuf,
    pub config_file: PathBuf,
    pub state_file: PathBuf,
}

impl WorkspacePaths {
    /// Default layout under `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            readme: root.join(README_FILE),
            config_file: root.join(CONFIG_FILE),
            state_file: root.join(STATE_DIR).join(STATE_FILE),
        }
    }

    /// Replace individual paths with explicit overrides.
    pub fn with_overrides(
        mut self,
        readme: Option<PathBuf>,
        config_file: Option<PathBuf>,
        state_file: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = readme {
            self.readme = path;
        }
        if let Some(path) = config_file {
            self.config_file = path;
        }
        if let Some(path) = state_file {
            self.state_file = path;
        }
        self
    }
}
