//! Verify command implementation.

use super::compare::bit_differences;
use crate::utils::read_input;
use oxihuff_huffman::{compress_bytes, decompress_bytes};
use std::path::Path;
use tracing::info;

/// Outcome of an in-memory round trip.
#[derive(Debug, PartialEq, Eq)]
struct RoundTrip {
    original_bytes: usize,
    compressed_bytes: usize,
    differing_bits: u64,
}

fn round_trip(data: Vec<u8>) -> Result<RoundTrip, Box<dyn std::error::Error>> {
    let compressed = compress_bytes(&data)?;
    let restored = decompress_bytes(&compressed)?;
    Ok(RoundTrip {
        original_bytes: data.len(),
        compressed_bytes: compressed.len(),
        differing_bits: bit_differences(data, restored)?,
    })
}

pub fn cmd_verify(input: &Path, progress: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input, progress)?;

    println!("Verifying {}", input.display());
    let result = round_trip(data)?;
    info!(
        original = result.original_bytes,
        compressed = result.compressed_bytes,
        "round trip finished"
    );

    if result.differing_bits != 0 {
        return Err(format!(
            "round trip mismatch: {} bits differ",
            result.differing_bits
        )
        .into());
    }

    println!(
        "  OK: {} bytes -> {} bytes -> {} bytes",
        result.original_bytes, result.compressed_bytes, result.original_bytes
    );
    Ok(())
}
