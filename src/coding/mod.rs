pub mod analyzer;
pub mod codec;
pub mod tree;

pub use analyzer::{FrequencyTable, ALPHABET_SIZE};
pub use codec::{decode, encode, BitStream};
pub use tree::{Code, CodeTable, CodeTree, Node};
