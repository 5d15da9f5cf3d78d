//! Utility functions for the CLI.

use crate::progress::ProgressReader;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension added to compressed files.
pub const COMPRESSED_EXTENSION: &str = "huf";

const FALLBACK_EXTENSION: &str = "out";

/// Read a whole file into memory, optionally showing progress.
pub fn read_input(path: &Path, progress: bool) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut reader = ProgressReader::new(file, len, progress);

    let mut data = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    reader.read_to_end(&mut data)?;
    reader.finish();

    debug!(path = %path.display(), bytes = data.len(), "input loaded");
    Ok(data)
}

/// `INPUT.huf`
pub fn default_compressed_path(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// `INPUT` without `.huf`, or `INPUT.out` when there is no such extension.
pub fn default_decompressed_path(input: &Path) -> PathBuf {
    let is_compressed = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(COMPRESSED_EXTENSION));
    if is_compressed && input.file_stem().is_some() {
        input.with_extension("")
    } else {
        append_extension(input, FALLBACK_EXTENSION)
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Percentage of `part` in `whole`, 0 for an empty whole.
pub fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
