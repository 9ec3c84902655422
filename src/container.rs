//! Self-describing container layout.
//!
//! ```text
//! u32 LE   table size (distinct symbols, 1..=256)
//! repeat   u8 symbol, u32 LE frequency   (ascending symbol order)
//! u32 LE   padding bit count (0..=7)
//! ...      encoded bits, packed MSB first, zero padded to a byte boundary
//! ```

use crate::coding::{BitStream, FrequencyTable, ALPHABET_SIZE};
use crate::error::HuffError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

pub const MAX_PADDING_BITS: u32 = 7;

const TABLE_ENTRY_SIZE: u64 = 1 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
	pub table: FrequencyTable,
	pub stream: BitStream,
}

impl Container {
	pub fn new(table: FrequencyTable, stream: BitStream) -> Self {
		Self { table, stream }
	}

	/// Bytes taken by everything before the packed stream.
	pub fn header_size(table_size: usize) -> u64 {
		4 + table_size as u64 * TABLE_ENTRY_SIZE + 4
	}

	/// Serialize the container, returning the number of bytes written.
	pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64, HuffError> {
		let entries = self
			.table
			.iter()
			.map(|(symbol, count)| u32::try_from(count).map(|c| (symbol, c)).map_err(|_| HuffError::FrequencyOverflow(symbol)))
			.collect::<Result<Vec<_>, HuffError>>()?;

		writer.write_u32::<LittleEndian>(entries.len() as u32)?;
		for (symbol, count) in &entries {
			writer.write_u8(*symbol)?;
			writer.write_u32::<LittleEndian>(*count)?;
		}
		writer.write_u32::<LittleEndian>(self.stream.padding_bits() as u32)?;
		writer.write_all(self.stream.as_bytes())?;

		Ok(Self::header_size(entries.len()) + self.stream.as_bytes().len() as u64)
	}

	/// Parse a container, consuming `reader` to its end.
	pub fn read<R: Read>(reader: &mut R) -> Result<Self, HuffError> {
		let table_size = reader.read_u32::<LittleEndian>().map_err(|e| HuffError::from_read(e, "table size"))?;
		if table_size == 0 || table_size as usize > ALPHABET_SIZE {
			return Err(HuffError::InvalidFormat(format!("table size {} out of range 1..={}", table_size, ALPHABET_SIZE)));
		}

		let mut table = FrequencyTable::new();
		for i in 0..table_size {
			let symbol = reader.read_u8().map_err(|e| HuffError::from_read(e, "table entry"))?;
			let count = reader.read_u32::<LittleEndian>().map_err(|e| HuffError::from_read(e, "table entry"))?;
			if count == 0 {
				return Err(HuffError::InvalidFormat(format!("table entry {} has zero frequency", i)));
			}
			if table.insert(symbol, count as u64) != 0 {
				return Err(HuffError::InvalidFormat(format!("symbol 0x{:02x} listed twice", symbol)));
			}
		}

		let padding = reader.read_u32::<LittleEndian>().map_err(|e| HuffError::from_read(e, "padding count"))?;
		if padding > MAX_PADDING_BITS {
			return Err(HuffError::InvalidFormat(format!("padding count {} exceeds {}", padding, MAX_PADDING_BITS)));
		}

		let mut packed = Vec::new();
		reader.read_to_end(&mut packed)?;
		if packed.is_empty() && padding > 0 {
			return Err(HuffError::InvalidFormat("padding declared without any packed bytes".to_string()));
		}

		let bit_len = packed.len() * 8 - padding as usize;
		let stream = BitStream::from_packed(packed, bit_len)?;
		Ok(Self { table, stream })
	}
}
