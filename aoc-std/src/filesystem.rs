use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    errors::FetchError,
    types::{Day, Year},
};

pub const INPUT_FILES: [&str; 2] = ["input1.txt", "input2.txt"];
pub const DESCRIPTION_FILE: &str = "README.md";

/// `<cwd>/<year>/<day>`
#[must_use]
pub fn puzzle_dir(cwd: &Path, year: &Year, day: &Day) -> PathBuf {
    cwd.join(year.as_str()).join(day.label())
}

/// Writes each `(filename, contents)` pair into the puzzle directory,
/// replacing whatever was there.
///
/// # Errors
///
/// Returns `Err` if the directory can not be created or a file can not be written.
pub fn write_puzzle_files(
    cwd: &Path,
    year: &Year,
    day: &Day,
    files: &[(&str, &str)],
) -> Result<Vec<PathBuf>, FetchError> {
    let dir = puzzle_dir(cwd, year, day);
    fs::create_dir_all(&dir).map_err(|err| FetchError::WriteFailed {
        path: dir.display().to_string(),
        reason: err.to_string(),
    })?;

    let mut written = Vec::with_capacity(files.len());
    for (filename, contents) in files {
        let file_path = dir.join(filename);
        fs::write(&file_path, contents).map_err(|err| FetchError::WriteFailed {
            path: file_path.display().to_string(),
            reason: err.to_string(),
        })?;

        info!("Wrote '{filename}' for {year}/{day}");
        debug!("Wrote {}", file_path.display());
        written.push(file_path);
    }

    Ok(written)
}
