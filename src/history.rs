
use bitvec::prelude::*;
use crate::bits::*;
use crate::error::*;

/// A named, fixed-width shift register.
///
/// Used for branch history (BHR) and for the counter latch (SC) that holds
/// a pattern history table block between a prediction and its update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    name: String,
    data: BitVector,
}

// NOTE: Bits are printed in register order: the leftmost character is the
// oldest bit (index 0), the rightmost is the most recently inserted one.
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", to_string(&self.data))
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(name: impl ToString, len: usize) -> Self {
        Self {
            name: name.to_string(),
            data: zeros(len),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return the current content of the register.
    pub fn read(&self) -> &Bits { &self.data }
}

impl HistoryRegister {
    /// Overwrite the whole register.
    pub fn load(&mut self, value: &Bits) -> Result<()> {
        check_width("register load", self.len(), value.len())?;
        self.data.copy_from_bitslice(value);
        Ok(())
    }

    /// Shift the register by one bit towards index 0.
    /// The oldest bit is discarded and `bit` becomes the newest bit.
    pub fn insert(&mut self, bit: Bit) {
        if self.data.is_empty() {
            return;
        }
        let last = self.data.len() - 1;
        self.data.shift_left(1);
        self.data.set(last, bit);
    }

    /// A one-line description of the register.
    pub fn monitor(&self) -> String {
        format!("{}: {}\n", self.name, self)
    }
}
