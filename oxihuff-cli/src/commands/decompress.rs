//! Decompress command implementation.

use crate::utils::{default_decompressed_path, read_input};
use oxihuff_core::BitStream;
use oxihuff_huffman::decompress;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| default_decompressed_path(input), Path::to_path_buf);
    let data = read_input(input, progress)?;

    let mut packed = BitStream::new(Cursor::new(data));
    let mut restored = BitStream::new(Vec::new());
    let stats = decompress(&mut packed, &mut restored)?;
    let restored = restored.close()?;

    // Written only after a full decode so a corrupt input leaves no partial file.
    std::fs::write(&output, &restored)?;
    info!(output = %output.display(), bytes = restored.len(), "wrote decompressed file");

    println!("Decompressed {} -> {}", input.display(), output.display());
    println!("  Header:  {} bytes", stats.header_bytes);
    println!("  Body:    {} bits", stats.body_bits);
    println!("  Output:  {} bytes", stats.output_bytes);
    Ok(())
}
