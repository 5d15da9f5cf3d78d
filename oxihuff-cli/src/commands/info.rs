//! Info command implementation.

use crate::utils::{ratio_percent, read_input};
use oxihuff_huffman::{CodeTable, FrequencyTable, HuffmanTree, format_code, read_header};
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

/// JSON serializable frequency entry.
#[derive(Debug, Serialize)]
struct SymbolJson {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    byte: Option<u8>,
    count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// JSON output for a compressed file.
#[derive(Debug, Serialize)]
struct FileInfoJson {
    file: String,
    file_size: u64,
    header_bytes: u64,
    body_bytes: u64,
    original_bytes: u64,
    distinct_bytes: usize,
    tree_depth: usize,
    max_code_length: usize,
    symbols: Vec<SymbolJson>,
}

/// Header-derived facts about a compressed file.
struct FileInfo {
    file_size: u64,
    header_bytes: u64,
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
}

impl FileInfo {
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let mut cursor = Cursor::new(data);
        let frequencies = read_header(&mut cursor)?;
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::from_tree(&tree);
        Ok(Self {
            file_size: data.len() as u64,
            header_bytes: cursor.position(),
            frequencies,
            tree,
            codes,
        })
    }

    fn body_bytes(&self) -> u64 {
        self.file_size - self.header_bytes
    }

    fn to_json(&self, file: &Path, with_codes: bool) -> FileInfoJson {
        let symbols = self
            .frequencies
            .iter()
            .map(|(symbol, count)| SymbolJson {
                symbol: symbol.to_string(),
                byte: symbol.byte(),
                count,
                code: if with_codes {
                    self.codes.get(symbol).map(format_code)
                } else {
                    None
                },
            })
            .collect();

        FileInfoJson {
            file: file.display().to_string(),
            file_size: self.file_size,
            header_bytes: self.header_bytes,
            body_bytes: self.body_bytes(),
            original_bytes: self.frequencies.total_bytes(),
            distinct_bytes: self.frequencies.distinct_bytes(),
            tree_depth: self.tree.depth(),
            max_code_length: self.codes.max_length(),
            symbols,
        }
    }
}

pub fn cmd_info(file: &Path, json: bool, codes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file, false)?;
    let info = FileInfo::parse(&data)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info.to_json(file, codes))?);
        return Ok(());
    }

    let original = info.frequencies.total_bytes();
    println!("Compressed File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", info.file_size);
    println!("  Header: {} bytes", info.header_bytes);
    println!("  Body:   {} bytes", info.body_bytes());
    println!("Original size: {} bytes", original);
    if original > 0 {
        println!(
            "Space saved: {:.1}%",
            100.0 - ratio_percent(info.file_size, original)
        );
    }
    println!("Distinct bytes: {}", info.frequencies.distinct_bytes());
    println!("Tree depth: {}", info.tree.depth());
    println!("Longest code: {} bits", info.codes.max_length());

    println!();
    if codes {
        println!("{:>6} {:>12} {:>7}  Code", "Symbol", "Count", "Share");
    } else {
        println!("{:>6} {:>12} {:>7}", "Symbol", "Count", "Share");
    }
    println!("{}", "-".repeat(40));
    let total = info.frequencies.total_bytes().saturating_add(1);
    for (symbol, count) in info.frequencies.iter() {
        let share = format!("{:.1}%", ratio_percent(count, total));
        let symbol_text = symbol.to_string();
        if codes {
            let code = info.codes.get(symbol).map(format_code).unwrap_or_default();
            println!("{:>6} {:>12} {:>7}  {}", symbol_text, count, share, code);
        } else {
            println!("{:>6} {:>12} {:>7}", symbol_text, count, share);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxihuff_huffman::compress_bytes;

    #[test]
    fn test_parse_scenario() {
        let compressed = compress_bytes(b"AAAAB").unwrap();
        let info = FileInfo::parse(&compressed).unwrap();
        assert_eq!(info.file_size, 9);
        assert_eq!(info.header_bytes, 8);
        assert_eq!(info.body_bytes(), 1);
        assert_eq!(info.frequencies.total_bytes(), 5);
        assert_eq!(info.tree.depth(), 2);
    }

    #[test]
    fn test_json_output() {
        let compressed = compress_bytes(b"AAAAB").unwrap();
        let info = FileInfo::parse(&compressed).unwrap();
        let value = serde_json::to_value(info.to_json(Path::new("a.huf"), true)).unwrap();

        assert_eq!(value["original_bytes"], 5);
        assert_eq!(value["distinct_bytes"], 2);
        assert_eq!(value["symbols"][0]["symbol"], "'A'");
        assert_eq!(value["symbols"][0]["byte"], 65);
        assert_eq!(value["symbols"][0]["code"], "1");
        assert_eq!(value["symbols"][2]["symbol"], "EOF");
        assert!(value["symbols"][2].get("byte").is_none());
        assert_eq!(value["symbols"][2]["code"], "01");
    }

    #[test]
    fn test_json_without_codes() {
        let compressed = compress_bytes(b"xyz").unwrap();
        let info = FileInfo::parse(&compressed).unwrap();
        let value = serde_json::to_value(info.to_json(Path::new("x.huf"), false)).unwrap();
        assert!(value["symbols"][0].get("code").is_none());
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert!(FileInfo::parse(b"9x").is_err());
    }
}
