use std::path::PathBuf;

use tracing::info;

use crate::{
    description::extract_description,
    errors::FetchError,
    filesystem::{puzzle_dir, write_puzzle_files, DESCRIPTION_FILE, INPUT_FILES},
    polling::{poll_until_ready, Clock, FetchRequest},
    requests::PuzzleRequestBuilder,
    settings::Settings,
};

/// Fetches the input (and the description when asked for) and only then
/// writes the files, so a failed fetch leaves nothing behind.
///
/// # Errors
///
/// Returns `Err` with [`FetchError::NotReady`] or [`FetchError::TimedOut`]
/// when the poll gave up, or with the transport/status/write failure.
pub fn fetch_puzzle(
    settings: &Settings,
    rb: &PuzzleRequestBuilder,
    clock: &impl Clock,
) -> Result<Vec<PathBuf>, FetchError> {
    let (year, day) = (&settings.year, &settings.day);

    let request = FetchRequest::new(
        rb.input_url(year, day),
        settings.wait,
        settings.timeout,
        clock,
    );
    let input = poll_until_ready(rb, clock, &request, &format!("input files for {year}/{day}"))
        .into_result()?;

    let readme = if settings.description {
        let request = FetchRequest::new(
            rb.description_url(year, day),
            settings.wait,
            settings.timeout,
            clock,
        );
        let page = poll_until_ready(rb, clock, &request, &format!("description for {year}/{day}"))
            .into_result()?;
        Some(extract_description(&page)?)
    } else {
        None
    };

    let mut files: Vec<(&str, &str)> = INPUT_FILES
        .iter()
        .map(|name| (*name, input.as_str()))
        .collect();
    if let Some(readme) = &readme {
        files.push((DESCRIPTION_FILE, readme.as_str()));
    }

    let written = write_puzzle_files(&settings.cwd, year, day, &files)?;
    info!(
        "Saved {} files to {}",
        written.len(),
        puzzle_dir(&settings.cwd, year, day).display()
    );
    Ok(written)
}
