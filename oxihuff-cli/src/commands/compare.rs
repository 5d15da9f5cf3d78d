//! Compare command implementation.

use crate::utils::{ratio_percent, read_input};
use oxihuff_core::{BitStream, count_bit_differences};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

pub fn cmd_compare(
    first: &Path,
    second: &Path,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let a = read_input(first, progress)?;
    let b = read_input(second, progress)?;
    let compared_bits = a.len().max(b.len()) as u64 * 8;
    debug!(first = a.len(), second = b.len(), "comparing");

    let differences = bit_differences(a, b)?;

    println!("Comparing {} and {}", first.display(), second.display());
    if differences == 0 {
        println!("  Files are identical");
    } else {
        println!(
            "  {} of {} bits differ ({:.2}%)",
            differences,
            compared_bits,
            ratio_percent(differences, compared_bits)
        );
    }
    Ok(())
}

/// Count differing bits between two buffers, surplus bits included.
pub(crate) fn bit_differences(a: Vec<u8>, b: Vec<u8>) -> oxihuff_core::Result<u64> {
    let mut a = BitStream::new(Cursor::new(a));
    let mut b = BitStream::new(Cursor::new(b));
    count_bit_differences(&mut a, &mut b)
}
