//! Progress display for reading input files.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Read;
use tracing::info;

/// Create a byte progress bar drawn on stderr, or a hidden one.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {binary_bytes}/{binary_total_bytes} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    // 8 Hz keeps redraw overhead low on fast reads.
    pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
    pb
}

/// A reader that advances a progress bar by the bytes it yields.
pub struct ProgressReader<R: Read> {
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressReader<R> {
    /// Wrap `reader`, expecting `total` bytes.
    pub fn new(reader: R, total: u64, enable: bool) -> Self {
        Self {
            reader,
            progress_bar: create_progress_bar(total, enable),
        }
    }

    /// Clear the bar and log the throughput.
    pub fn finish(self) {
        let total = self.progress_bar.position();
        let elapsed = self.progress_bar.elapsed().as_secs_f64();
        self.progress_bar.finish_and_clear();
        if elapsed > 0.0 {
            info!(
                "read {} in {:.2}s ({}/s avg)",
                fmt_size(total as f64),
                elapsed,
                fmt_size(total as f64 / elapsed)
            );
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.progress_bar.inc(n as u64);
        Ok(n)
    }
}

/// Format a byte count as "B, KiB, MiB, ...".
pub fn fmt_size(size_in_bytes: f64) -> String {
    let units = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut value = size_in_bytes;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < units.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }
    if unit_index > 0 {
        format!("{:.2}{}", value, units[unit_index])
    } else {
        format!("{:.0}{}", value, units[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_size() {
        assert_eq!(fmt_size(0.0), "0B");
        assert_eq!(fmt_size(100.0), "100B");
        assert_eq!(fmt_size(1023.0), "1023B");
        assert_eq!(fmt_size(12.0 * 1024.0), "12.00KiB");
        assert_eq!(fmt_size(7.0 * 1024.0 * 1024.0), "7.00MiB");
        assert_eq!(fmt_size(123.0 * 1024.0 * 1024.0 * 1024.0), "123.00GiB");
    }

    #[test]
    fn test_progress_reader_passes_data_through() {
        let data = vec![7u8; 10_000];
        let mut reader = ProgressReader::new(&data[..], data.len() as u64, false);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(reader.progress_bar.position(), 10_000);
        reader.finish();
        assert_eq!(out, data);
    }
}
