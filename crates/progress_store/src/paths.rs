use std::path::{Path, PathBuf};

pub const PROGRESS_DIR: &str = ".incident_root";
pub const PROGRESS_FILE: &str = "progress.json";

#[must_use]
pub fn progress_root(cwd: &Path) -> PathBuf {
    cwd.join(PROGRESS_DIR)
}

#[must_use]
pub fn progress_file(cwd: &Path) -> PathBuf {
    progress_root(cwd).join(PROGRESS_FILE)
}
