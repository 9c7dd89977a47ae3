//! Types for implementing a table of predictor state.

use crate::error::*;

/// Interface to a table of predictor state, indexed by some key.
///
/// Tables are sparse: an entry only exists once it has been written.
pub trait PredictorTable {
    /// The type of an index into the table.
    type Index: ?Sized;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries currently present in the table.
    fn size(&self) -> usize;

    /// Returns a reference to an entry in the table, if present.
    fn get(&self, idx: &Self::Index) -> Result<Option<&Self::Entry>>;

    /// Write an entry, replacing any existing entry with the same index.
    fn put(&mut self, idx: &Self::Index, entry: Self::Entry) -> Result<()>;

    /// Write an entry only if no entry with the same index exists.
    fn put_if_absent(&mut self, idx: &Self::Index, entry: Self::Entry)
        -> Result<()>;

    /// Returns true if an entry with this index exists.
    fn contains(&self, idx: &Self::Index) -> Result<bool> {
        Ok(self.get(idx)?.is_some())
    }
}
