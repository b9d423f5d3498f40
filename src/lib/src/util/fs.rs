use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR, DATALOOM};
use crate::error::LoomError;

/// $HOME/.config/dataloom
pub fn dataloom_config_dir() -> Result<PathBuf, LoomError> {
    match dirs::home_dir() {
        Some(home_dir) => Ok(home_dir.join(CONFIG_DIR).join(DATALOOM)),
        None => Err(LoomError::home_dir_not_found()),
    }
}

pub fn read_from_path(path: impl AsRef<Path>) -> Result<String, LoomError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) => {
            log::debug!("util::fs::read_from_path could not read {:?}: {}", path, err);
            Err(LoomError::IO(err))
        }
    }
}

pub fn write_to_path(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<(), LoomError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|err| LoomError::file_write_error(path, err))?;
        }
    }
    fs::write(path, data).map_err(|err| LoomError::file_write_error(path, err))
}

/// Replace characters that are not safe in a file name on any platform
pub fn sanitize_file_stem(stem: impl AsRef<str>) -> String {
    let options = sanitize_filename::Options {
        truncate: true,
        windows: true,
        replacement: "_",
    };
    sanitize_filename::sanitize_with_options(stem.as_ref().trim(), options)
}
