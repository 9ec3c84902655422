//! Byte frequency analysis.
//!
//! Produces the [`FrequencyTable`] every later stage is derived from. Large
//! inputs can be counted in shards on a rayon pool; shard tables are always
//! merged back in input order.

use crate::config::HuffConfig;
use crate::error::HuffError;
use log::debug;
use rayon::prelude::*;

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value seen in an input.
///
/// Iteration always yields symbols in ascending order, so anything derived
/// from a table is independent of how the counts were gathered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; ALPHABET_SIZE] }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data` on the current thread.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count `data`, sharding across a thread pool when `config` allows it.
    pub fn analyze(data: &[u8], config: &HuffConfig) -> Result<Self, HuffError> {
        if !config.counts_in_parallel(data.len()) {
            return Ok(Self::from_bytes(data));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| HuffError::ConfigError(e.to_string()))?;

        let shard_len = ((data.len() + config.threads - 1) / config.threads).max(1);
        let shards: Vec<FrequencyTable> =
            pool.install(|| data.par_chunks(shard_len).map(Self::from_bytes).collect());

        debug!("counted {} bytes in {} shards", data.len(), shards.len());

        let mut table = Self::new();
        for shard in &shards {
            table.merge(shard);
        }
        Ok(table)
    }

    /// Set the count for `symbol`, returning the previous count.
    pub fn insert(&mut self, symbol: u8, count: u64) -> u64 {
        std::mem::replace(&mut self.counts[symbol as usize], count)
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn merge(&mut self, other: &FrequencyTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Number of distinct symbols with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sum of all counts; equals the length of the analyzed input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` pairs with a non-zero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
