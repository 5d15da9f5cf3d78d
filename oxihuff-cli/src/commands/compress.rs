//! Compress command implementation.

use crate::utils::{default_compressed_path, read_input};
use oxihuff_core::BitStream;
use oxihuff_huffman::{CompressStats, compress};
use std::io::Cursor;
use std::path::Path;
use tracing::{info, warn};

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| default_compressed_path(input), Path::to_path_buf);
    let data = read_input(input, progress)?;

    // Both passes and the per-bit writes run in memory.
    let mut source = BitStream::new(Cursor::new(data));
    let mut packed = BitStream::new(Cursor::new(Vec::new()));
    let stats = compress(&mut source, &mut packed)?;
    let compressed = packed.close()?.into_inner();

    std::fs::write(&output, &compressed)?;
    info!(output = %output.display(), bytes = compressed.len(), "wrote compressed file");

    println!("Compressed {} -> {}", input.display(), output.display());
    print!("{}", format_report(&stats));
    if stats.is_expansion() {
        warn!("compressed output is larger than the input");
        println!("Warning: the compressed file is bigger than the original");
    }
    Ok(())
}

fn format_report(stats: &CompressStats) -> String {
    let mut report = format!("  Original size:   {} bytes\n", stats.input_bytes);
    report.push_str(&format!(
        "  Compressed size: {} bytes ({} header + {} body)\n",
        stats.output_bytes(),
        stats.header_bytes,
        stats.body_bits.div_ceil(8)
    ));
    report.push_str(&format!("  Distinct bytes:  {}\n", stats.distinct_bytes));
    // Empty input has no ratio to report.
    if let Some(percent) = stats.savings_percent() {
        report.push_str(&format!("  Space saved:     {percent:.1}%\n"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(input_bytes: u64, header_bytes: u64, body_bits: u64) -> CompressStats {
        CompressStats {
            input_bytes,
            header_bytes,
            body_bits,
            distinct_bytes: 1,
        }
    }

    #[test]
    fn test_report_lines() {
        let report = format_report(&stats(200, 10, 400));
        assert!(report.contains("  Original size:   200 bytes\n"));
        assert!(report.contains("  Compressed size: 60 bytes (10 header + 50 body)\n"));
        assert!(report.contains("  Space saved:     70.0%\n"));
    }

    #[test]
    fn test_report_empty_input_has_no_ratio() {
        let empty = stats(0, 2, 0);
        assert!(empty.is_expansion());
        let report = format_report(&empty);
        assert!(report.contains("  Original size:   0 bytes\n"));
        assert!(!report.contains("Space saved"));
    }
}
