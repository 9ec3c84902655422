//! # Huffpack
//!
//! A lossless byte-stream compressor built on Huffman coding.
//!
//! Compression counts byte frequencies, builds a prefix-code tree by greedily
//! merging the two least frequent nodes, and packs the concatenated codes into
//! a self-describing container that carries the frequency table and padding
//! count. Decompression rebuilds the identical tree from the stored table, so
//! no external state is needed.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{compress_data, decompress_data, HuffConfig};
//!
//! let original = b"Hello, world! This is test data.";
//! let compressed = compress_data(original, &HuffConfig::default()).unwrap();
//! let decompressed = decompress_data(&compressed).unwrap();
//! assert_eq!(original.to_vec(), decompressed);
//! ```
//!
//! ### Working with Files
//!
//! ```rust
//! use huffpack::{pipeline, HuffConfig};
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = BufReader::new(File::open("input.txt")?);
//! let mut writer = BufWriter::new(File::create("output.huff")?);
//!
//! let stats = pipeline::compress(&mut reader, &mut writer, &HuffConfig::default())?;
//! println!("Space saved: {:.2}%", stats.space_saved);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod coding;
pub mod config;
pub mod container;
pub mod error;
pub mod pipeline;

pub use coding::{BitStream, Code, CodeTable, CodeTree, FrequencyTable, Node};
pub use config::{HuffConfig, ReportFormat};
pub use container::Container;
pub use error::{HuffError, Result};
pub use pipeline::{compress, decompress, CompressionStats, ContainerInfo};

/// Compress data in memory, returning the container bytes.
///
/// Empty input is rejected with [`HuffError::EmptyInput`].
pub fn compress_data(data: &[u8], config: &HuffConfig) -> Result<Vec<u8>> {
    pipeline::compress_buffer(data, config).map(|(container, _)| container)
}

/// Decompress container bytes produced by [`compress_data`].
pub fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>> {
    pipeline::decompress_buffer(compressed_data)
}

/// Get information about a container without decoding it.
///
/// ```rust
/// use huffpack::{compress_data, inspect_data, HuffConfig};
///
/// let compressed = compress_data(&[7u8; 1000], &HuffConfig::default()).unwrap();
/// let info = inspect_data(&compressed).unwrap();
/// assert_eq!(info.original_size, 1000);
/// assert_eq!(info.table_size, 1);
/// ```
pub fn inspect_data(compressed_data: &[u8]) -> Result<ContainerInfo> {
    pipeline::inspect(&mut &compressed_data[..])
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress_data() {
        let original = b"Hello, world! This is a test of the huffpack library API.";
        let config = HuffConfig::default();

        let compressed = compress_data(original, &config).unwrap();
        assert!(!compressed.is_empty());

        let decompressed = decompress_data(&compressed).unwrap();
        assert_eq!(original.to_vec(), decompressed);
    }

    #[test]
    fn test_empty_data() {
        let result = compress_data(b"", &HuffConfig::default());
        assert!(matches!(result, Err(HuffError::EmptyInput)));
    }

    #[test]
    fn test_large_repetitive_data() {
        let original = vec![42u8; 10000];
        let compressed = compress_data(&original, &HuffConfig::default()).unwrap();
        // one bit per byte plus a one-entry table
        assert_eq!(compressed.len(), 4 + 5 + 4 + 1250);

        let decompressed = decompress_data(&compressed).unwrap();
        assert_eq!(original, decompressed);
    }

    #[test]
    fn test_corrupted_tail() {
        let compressed = compress_data(b"Test data for validation", &HuffConfig::default()).unwrap();
        let truncated = &compressed[..compressed.len() - 1];
        assert!(decompress_data(truncated).is_err());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
