use crate::coding::{self, CodeTree, FrequencyTable};
use crate::config::HuffConfig;
use crate::container::Container;
use crate::error::HuffError;
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
	pub original_size: u64,
	pub encoded_bits: u64,
	pub compressed_size: u64,
	pub distinct_symbols: usize,
	/// Percentage of the original bits saved by the encoding, ignoring the header.
	pub space_saved: f64,
	pub ratio: f64,
}

impl CompressionStats {
	fn new(original_size: u64, encoded_bits: u64, compressed_size: u64, distinct_symbols: usize) -> Self {
		let original_bits = original_size as f64 * 8.0;
		let space_saved = if original_size > 0 { (1.0 - encoded_bits as f64 / original_bits) * 100.0 } else { 0.0 };
		let ratio = if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 0.0 };
		Self { original_size, encoded_bits, compressed_size, distinct_symbols, space_saved, ratio }
	}
}

/// Summary of a container, read without decoding its stream.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
	pub table_size: usize,
	pub original_size: u64,
	pub encoded_bits: u64,
	pub padding_bits: u8,
	pub compressed_size: u64,
	pub max_code_length: usize,
	pub space_saved: f64,
}

/// Count `data` and build its code tree. Empty input is rejected.
pub fn build_tree(data: &[u8], config: &HuffConfig) -> Result<(FrequencyTable, CodeTree), HuffError> {
	config.validate()?;
	if data.is_empty() {
		return Err(HuffError::EmptyInput);
	}
	let table = FrequencyTable::analyze(data, config)?;
	let tree = CodeTree::build(&table)?;
	Ok((table, tree))
}

/// Encode `data` into a complete in-memory container.
pub fn compress_buffer(data: &[u8], config: &HuffConfig) -> Result<(Vec<u8>, CompressionStats), HuffError> {
	let (table, tree) = build_tree(data, config)?;
	let codes = tree.codes();
	debug!("derived {} codes, longest {} bits", codes.len(), codes.max_len());

	let stream = coding::encode(data, &codes)?;
	let container = Container::new(table, stream);

	let mut output = Vec::new();
	let compressed_size = container.write(&mut output)?;

	let stats = CompressionStats::new(data.len() as u64, container.stream.len() as u64, compressed_size, container.table.len());
	info!(
		"compressed {} bytes to {} bytes ({} bits encoded, {:.2}% saved)",
		stats.original_size, stats.compressed_size, stats.encoded_bits, stats.space_saved
	);
	if stats.compressed_size > stats.original_size {
		warn!("container is larger than its input ({} > {} bytes)", stats.compressed_size, stats.original_size);
	}
	Ok((output, stats))
}

/// Compress everything from `reader` into `writer`.
///
/// The container is built in memory first, so nothing reaches `writer` when
/// compression fails.
pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &HuffConfig,
) -> Result<CompressionStats, HuffError> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let (output, stats) = compress_buffer(&buffer, config)?;
	writer.write_all(&output)?;
	Ok(stats)
}

/// Decode a container held entirely in memory.
pub fn decompress_buffer(compressed: &[u8]) -> Result<Vec<u8>, HuffError> {
	let container = Container::read(&mut &compressed[..])?;
	let tree = CodeTree::build(&container.table)?;
	let data = coding::decode(&container.stream, &tree)?;

	if data.len() as u64 != container.table.total() {
		return Err(HuffError::CorruptStream(format!(
			"decoded {} bytes but the frequency table accounts for {}",
			data.len(),
			container.table.total()
		)));
	}
	info!("decompressed {} bytes to {} bytes", compressed.len(), data.len());
	Ok(data)
}

/// Decompress a container from `reader` into `writer`, returning the bytes written.
pub fn decompress<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<u64, HuffError> {
	let mut compressed = Vec::new();
	reader.read_to_end(&mut compressed)?;

	let data = decompress_buffer(&compressed)?;
	writer.write_all(&data)?;
	Ok(data.len() as u64)
}

pub fn inspect<R: Read>(reader: &mut R) -> Result<ContainerInfo, HuffError> {
	let container = Container::read(reader)?;
	let tree = CodeTree::build(&container.table)?;

	let original_size = container.table.total();
	let encoded_bits = container.stream.len() as u64;
	let compressed_size = Container::header_size(container.table.len()) + container.stream.as_bytes().len() as u64;
	let stats = CompressionStats::new(original_size, encoded_bits, compressed_size, container.table.len());

	Ok(ContainerInfo {
		table_size: container.table.len(),
		original_size,
		encoded_bits,
		padding_bits: container.stream.padding_bits(),
		compressed_size,
		max_code_length: tree.depth(),
		space_saved: stats.space_saved,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn config() -> HuffConfig {
		HuffConfig::default().with_threads(1)
	}

	#[test]
	fn test_round_trip_through_streams() {
		let input = b"she sells sea shells by the sea shore".to_vec();
		let mut compressed = Vec::new();
		let stats = compress(&mut Cursor::new(&input), &mut compressed, &config()).unwrap();

		assert_eq!(stats.original_size, input.len() as u64);
		assert_eq!(stats.compressed_size, compressed.len() as u64);
		assert!(stats.space_saved > 0.0);

		let mut restored = Vec::new();
		let written = decompress(&mut Cursor::new(&compressed), &mut restored).unwrap();
		assert_eq!(written, input.len() as u64);
		assert_eq!(restored, input);
	}

	#[test]
	fn test_empty_input_writes_nothing() {
		let mut output = Vec::new();
		let result = compress(&mut Cursor::new(Vec::<u8>::new()), &mut output, &config());
		assert!(matches!(result, Err(HuffError::EmptyInput)));
		assert!(output.is_empty());
	}

	#[test]
	fn test_two_symbol_stats() {
		let (compressed, stats) = compress_buffer(b"aaaab", &config()).unwrap();
		assert_eq!(stats.encoded_bits, 5);
		assert_eq!(stats.distinct_symbols, 2);
		assert_eq!(stats.space_saved, (1.0 - 5.0 / 40.0) * 100.0);
		assert_eq!(decompress_buffer(&compressed).unwrap(), b"aaaab".to_vec());
	}

	#[test]
	fn test_frequency_mismatch_is_corrupt() {
		let (mut compressed, _) = compress_buffer(b"aaaab", &config()).unwrap();
		// bump the count of 'a' from 4 to 5 without touching the stream
		compressed[5] = 5;
		assert!(matches!(decompress_buffer(&compressed), Err(HuffError::CorruptStream(_))));
	}

	#[test]
	fn test_inspect() {
		let data = vec![b'a'; 5000];
		let (compressed, stats) = compress_buffer(&data, &config()).unwrap();
		let info = inspect(&mut Cursor::new(&compressed)).unwrap();

		assert_eq!(info.table_size, 1);
		assert_eq!(info.original_size, 5000);
		assert_eq!(info.encoded_bits, 5000);
		assert_eq!(info.padding_bits, 0);
		assert_eq!(info.max_code_length, 1);
		assert_eq!(info.compressed_size, stats.compressed_size);
	}

	#[test]
	fn test_invalid_config_rejected() {
		let result = compress_buffer(b"abc", &HuffConfig::default().with_threads(0));
		assert!(matches!(result, Err(HuffError::ConfigError(_))));
	}
}
