//! Prefix-code tree construction and code derivation.
//!
//! The tree is a pure function of the frequency table: leaves are seeded in
//! ascending symbol order and every heap entry carries a creation sequence
//! number that breaks frequency ties. Rebuilding from a stored table yields the
//! exact tree used when the stream was encoded.

use crate::coding::analyzer::FrequencyTable;
use crate::error::HuffError;
use log::debug;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;
use std::io::{self, Write};

const RENDER_GAP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `first` becomes the `0` branch.
    pub fn merge(first: Node, second: Node) -> Node {
        Node::Internal {
            weight: first.weight() + second.weight(),
            left: Box::new(first),
            right: Box::new(second),
        }
    }

    fn collect_codes(&self, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Code>) {
        match self {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code { bits: path.clone() });
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                left.collect_codes(path, codes);
                path.pop();
                path.push(true);
                right.collect_codes(path, codes);
                path.pop();
            }
        }
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        match self {
            Node::Leaf { symbol, weight } => {
                out.push_str(&format!("{}'{}'({})\n", " ".repeat(indent), symbol_label(*symbol), weight));
            }
            Node::Internal { weight, left, right } => {
                right.render_into(out, indent + RENDER_GAP);
                out.push_str(&format!("{}[{}]\n", " ".repeat(indent), weight));
                left.render_into(out, indent + RENDER_GAP);
            }
        }
    }
}

/// Min-heap entry ordered by (weight, creation sequence).
struct HeapEntry {
    seq: usize,
    node: Node,
}

impl HeapEntry {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: Node,
}

impl CodeTree {
    /// Greedily merge the two lightest nodes until a single root remains.
    ///
    /// A table with one distinct symbol produces a lone leaf whose code is the
    /// single bit `0`.
    pub fn build(table: &FrequencyTable) -> Result<Self, HuffError> {
        if table.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let mut heap: BinaryHeap<Reverse<HeapEntry>> = table
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| Reverse(HeapEntry { seq, node: Node::Leaf { symbol, weight } }))
            .collect();
        let mut next_seq = heap.len();

        let root = loop {
            let Some(Reverse(first)) = heap.pop() else {
                return Err(HuffError::EmptyInput);
            };
            let Some(Reverse(second)) = heap.pop() else {
                break first.node;
            };
            heap.push(Reverse(HeapEntry { seq: next_seq, node: Node::merge(first.node, second.node) }));
            next_seq += 1;
        };

        let tree = CodeTree { root };
        debug!("built code tree: {} symbols, depth {}", table.len(), tree.depth());
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Walk root to leaves, appending `0` for the first child and `1` for the second.
    pub fn codes(&self) -> CodeTable {
        let mut codes = BTreeMap::new();
        match &self.root {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code { bits: vec![false] });
            }
            internal => internal.collect_codes(&mut Vec::new(), &mut codes),
        }
        CodeTable { codes }
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root).max(1)
    }

    /// Text drawing of the tree rotated 90 degrees, right subtree on top.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.root.render_into(&mut out, 0);
        out
    }
}

/// Bit sequence assigned to one symbol; `true` is a `1` bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a [`CodeTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Total encoded length in bits of an input with these frequencies.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, Code::len) as u64)
            .sum()
    }

    /// Write `symbol,code,bits` rows in ascending symbol order.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "symbol,code,bits")?;
        for (symbol, code) in self.iter() {
            writeln!(writer, "{},{},{}", symbol_label(symbol), code, code.len())?;
        }
        Ok(())
    }
}

fn symbol_label(symbol: u8) -> String {
    match symbol {
        b'\n' => "\\n".to_string(),
        b' ' => "SPC".to_string(),
        b',' | b'"' | b'\'' => format!("0x{:02x}", symbol),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => format!("0x{:02x}", s),
    }
}
