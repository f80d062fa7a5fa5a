use std::env;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";

/// Folder of the running binary, falling back to the working directory.
pub fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `LISTINGS_CONFIG_DIR` wins when set. Debug builds read the checked-in
/// `src/config`, release builds a `config` folder shipped beside the binary.
pub fn config_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("LISTINGS_CONFIG_DIR").filter(|v| !v.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if cfg!(debug_assertions) {
        PathBuf::from("src").join("config")
    } else {
        exe_dir().join("config")
    }
}

pub fn config_file_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    config_dir(lookup).join(CONFIG_FILE)
}
