//! Bit-level encoding and tree-walk decoding.

use crate::coding::tree::{Code, CodeTable, CodeTree, Node};
use crate::error::HuffError;

/// Growable bit sequence packed most-significant-bit first.
///
/// Bits past `len` in the final byte are always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    len: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { bytes: Vec::with_capacity((bits + 7) / 8), len: 0 }
    }

    /// Wrap packed bytes holding `len` meaningful bits.
    pub fn from_packed(bytes: Vec<u8>, len: usize) -> Result<Self, HuffError> {
        if (len + 7) / 8 != bytes.len() {
            return Err(HuffError::InvalidFormat(format!(
                "{} bits cannot be packed into {} bytes",
                len,
                bytes.len()
            )));
        }
        let stream = Self { bytes, len };
        if stream.padding_bits() > 0 {
            let mask = (1u8 << stream.padding_bits()) - 1;
            if stream.bytes[stream.bytes.len() - 1] & mask != 0 {
                return Err(HuffError::InvalidFormat("padding bits are not zero".to_string()));
            }
        }
        Ok(stream)
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << (7 - offset);
        }
        self.len += 1;
    }

    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push(bit);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// Zero bits needed to fill the final byte, always in `0..=7`.
    pub fn padding_bits(&self) -> u8 {
        ((8 - self.len % 8) % 8) as u8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Concatenate the code of every input byte, in input order.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<BitStream, HuffError> {
    let mut bits = BitStream::new();
    for &byte in data {
        let code = codes.get(byte).ok_or(HuffError::MissingCode(byte))?;
        bits.push_code(code);
    }
    Ok(bits)
}

/// Walk `tree` bit by bit, emitting a symbol at every leaf.
///
/// The stream must end exactly on a symbol boundary.
pub fn decode(bits: &BitStream, tree: &CodeTree) -> Result<Vec<u8>, HuffError> {
    let root = tree.root();
    let mut output = Vec::new();

    if let Node::Leaf { symbol, .. } = root {
        for (i, bit) in bits.iter().enumerate() {
            if bit {
                return Err(HuffError::CorruptStream(format!(
                    "unexpected 1 bit at offset {} for single-symbol code",
                    i
                )));
            }
            output.push(*symbol);
        }
        return Ok(output);
    }

    let mut node = root;
    for bit in bits.iter() {
        // node is internal here: the walk resets to root at every leaf
        if let Node::Internal { left, right, .. } = node {
            node = if bit { right.as_ref() } else { left.as_ref() };
        }
        if let Node::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(HuffError::CorruptStream(format!(
            "stream of {} bits ends in the middle of a code",
            bits.len()
        )));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::analyzer::FrequencyTable;

    fn tree_for(data: &[u8]) -> CodeTree {
        CodeTree::build(&FrequencyTable::from_bytes(data)).unwrap()
    }

    #[test]
    fn test_bits_pack_msb_first() {
        let mut bits = BitStream::new();
        for bit in [true, false, true, true, false, false, false, false, true] {
            bits.push(bit);
        }
        assert_eq!(bits.len(), 9);
        assert_eq!(bits.as_bytes(), &[0b1011_0000, 0b1000_0000]);
        assert_eq!(bits.padding_bits(), 7);
        assert_eq!(bits.get(8), Some(true));
        assert_eq!(bits.get(9), None);
    }

    #[test]
    fn test_from_packed_checks_length_and_padding() {
        assert!(BitStream::from_packed(vec![0b1010_0000], 3).is_ok());
        assert!(matches!(BitStream::from_packed(vec![0b1010_0001], 3), Err(HuffError::InvalidFormat(_))));
        assert!(matches!(BitStream::from_packed(vec![0, 0], 3), Err(HuffError::InvalidFormat(_))));
        assert!(BitStream::from_packed(Vec::new(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_encode_two_symbols() {
        let data = b"aaaab";
        let tree = tree_for(data);
        let bits = encode(data, &tree.codes()).unwrap();

        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![true, true, true, true, false]);
        assert_eq!(decode(&bits, &tree).unwrap(), data.to_vec());
    }

    #[test]
    fn test_round_trip_text() {
        let data = b"It was the best of times, it was the worst of times.";
        let tree = tree_for(data);
        let bits = encode(data, &tree.codes()).unwrap();
        assert_eq!(decode(&bits, &tree).unwrap(), data.to_vec());
    }

    #[test]
    fn test_single_symbol_stream() {
        let data = vec![b'a'; 5000];
        let tree = tree_for(&data);
        let bits = encode(&data, &tree.codes()).unwrap();

        assert_eq!(bits.len(), 5000);
        assert_eq!(decode(&bits, &tree).unwrap(), data);
    }

    #[test]
    fn test_single_symbol_rejects_one_bits() {
        let tree = tree_for(b"aaa");
        let mut bits = BitStream::new();
        bits.push(false);
        bits.push(true);
        assert!(matches!(decode(&bits, &tree), Err(HuffError::CorruptStream(_))));
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let data = b"abcdefgh";
        let tree = tree_for(data);
        let bits = encode(data, &tree.codes()).unwrap();

        let mut truncated = BitStream::new();
        for bit in bits.iter().take(bits.len() - 1) {
            truncated.push(bit);
        }
        assert!(matches!(decode(&truncated, &tree), Err(HuffError::CorruptStream(_))));
    }

    #[test]
    fn test_missing_code() {
        let codes = tree_for(b"abc").codes();
        assert!(matches!(encode(b"abz", &codes), Err(HuffError::MissingCode(b'z'))));
    }
}
