use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "flashdeck", "Flashdeck") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn backups_dir(root: &Path) -> PathBuf {
    root.join("backups")
}

pub fn logs_dir(root: &Path) -> PathBuf {
    root.join("logs")
}
