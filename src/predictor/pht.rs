//! Implementation of a pattern history table (PHT).

use std::collections::HashMap;
use itertools::Itertools;
use crate::bits::*;
use crate::error::*;
use crate::predictor::table::*;

/// A table of saturating counter blocks indexed by a bit vector.
///
/// Both the index and the blocks have a fixed width. Writes or lookups with
/// a vector of any other width are rejected.
#[derive(Clone, Debug)]
pub struct PatternHistoryTable {
    name: String,

    /// Width of an index
    index_bits: usize,

    /// Width of a block (the saturating counter)
    block_bits: usize,

    data: HashMap<BitVector, BitVector>,
}
impl PatternHistoryTable {
    pub fn new(name: impl ToString, index_bits: usize, block_bits: usize)
        -> Self
    {
        Self {
            name: name.to_string(),
            index_bits,
            block_bits,
            data: HashMap::new(),
        }
    }

    pub fn index_bits(&self) -> usize { self.index_bits }
    pub fn block_bits(&self) -> usize { self.block_bits }

    /// An all-zero block, used to lazily initialize new entries.
    pub fn default_block(&self) -> BitVector { zeros(self.block_bits) }

    /// Read the block at `idx`, first inserting an all-zero block if the
    /// entry does not exist yet. Existing entries are never overwritten.
    pub fn read_or_init(&mut self, idx: &Bits) -> Result<BitVector> {
        self.put_if_absent(idx, self.default_block())?;
        let block = self.get(idx)?
            .cloned()
            .unwrap_or_else(|| self.default_block());
        Ok(block)
    }

    fn check_entry(&self, idx: &Bits, entry: &Bits) -> Result<()> {
        check_width("PHT index", self.index_bits, idx.len())?;
        check_width("PHT block", self.block_bits, entry.len())
    }

    /// A description of every entry in the table, ordered by index.
    pub fn monitor(&self) -> String {
        let lines = self.data.iter()
            .sorted_by(|x, y| x.0.cmp(y.0))
            .map(|(idx, blk)| format!("  {} -> {}\n", to_string(idx), to_string(blk)))
            .join("");
        format!("{} ({} entries):\n{}", self.name, self.data.len(), lines)
    }
}

impl PredictorTable for PatternHistoryTable {
    type Index = Bits;
    type Entry = BitVector;

    fn size(&self) -> usize { self.data.len() }

    fn get(&self, idx: &Bits) -> Result<Option<&BitVector>> {
        check_width("PHT index", self.index_bits, idx.len())?;
        Ok(self.data.get(idx))
    }

    fn put(&mut self, idx: &Bits, entry: BitVector) -> Result<()> {
        self.check_entry(idx, &entry)?;
        self.data.insert(idx.to_bitvec(), entry);
        Ok(())
    }

    fn put_if_absent(&mut self, idx: &Bits, entry: BitVector) -> Result<()> {
        self.check_entry(idx, &entry)?;
        self.data.entry(idx.to_bitvec()).or_insert(entry);
        Ok(())
    }
}
