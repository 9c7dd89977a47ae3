//! Implementations of different two-level adaptive branch predictors.
//!
//! Every predictor combines a first level of branch history (one global
//! register, or a bank of registers selected per address or per set) with a
//! second level of saturating counters (a pattern history table). The
//! variants only differ in how the history register and the table index are
//! selected:
//!
//! | Predictor | History register    | Table index              |
//! |-----------|---------------------|--------------------------|
//! | [GAg]     | global              | history                  |
//! | [GAs]     | global              | hash(address) ++ history |
//! | [PAg]     | per address         | history                  |
//! | [PAp]     | per address         | address ++ history       |
//! | [SAg]     | per set (hashed)    | history                  |
//! | [SAp]     | per set (hashed)    | address ++ history       |
//! | [SAs]     | per set (hashed)    | hash(address) ++ history |

pub mod table;
pub mod pht;
pub mod gag;
pub mod gas;
pub mod pag;
pub mod pap;
pub mod sag;
pub mod sap;
pub mod sas;

pub use table::*;
pub use pht::*;
pub use gag::*;
pub use gas::*;
pub use pag::*;
pub use pap::*;
pub use sag::*;
pub use sap::*;
pub use sas::*;

use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::history::HistoryRegister;

/// Interface to a predictor that forecasts a conditional branch and is then
/// told the real outcome.
///
/// Calls must be paired: each [`update`] commits the outcome for the
/// instruction passed to the most recent [`predict`].
///
/// [`predict`]: BranchPredictor::predict
/// [`update`]: BranchPredictor::update
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return the predicted outcome for this instruction.
    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome>;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>;

    /// A human-readable snapshot of every register and table.
    fn monitor(&self) -> String;
}

/// The saturating counter register (SC) shared by all predictors.
///
/// [`BranchPredictor::predict`] latches the block it read from the pattern
/// history table, along with the address it was read for. The matching
/// [`BranchPredictor::update`] takes the counter back out of the latch
/// instead of reading the table a second time, so it must name the same
/// address. Anything else fails with [`Error::UnmatchedUpdate`].
#[derive(Clone, Debug)]
pub struct CounterLatch {
    reg: HistoryRegister,

    /// Address of the outstanding prediction, if any
    pending: Option<BitVector>,
}
impl CounterLatch {
    pub fn new(len: usize) -> Self {
        Self {
            reg: HistoryRegister::new("SC", len),
            pending: None,
        }
    }

    /// Hold `block` until the outcome for `addr` is known.
    pub fn latch(&mut self, addr: &Bits, block: &Bits) -> Result<()> {
        self.reg.load(block)?;
        self.pending = Some(addr.to_bitvec());
        Ok(())
    }

    /// Release the counter latched for `addr`.
    /// A mismatched release leaves the latch untouched.
    pub fn release(&mut self, addr: &Bits) -> Result<BitVector> {
        if self.pending.as_deref() != Some(addr) {
            return Err(Error::UnmatchedUpdate);
        }
        self.pending = None;
        Ok(self.reg.read().to_bitvec())
    }

    pub fn is_pending(&self) -> bool { self.pending.is_some() }
    pub fn counter(&self) -> &Bits { self.reg.read() }
    pub fn monitor(&self) -> String { self.reg.monitor() }
}

/// The leading bit of a counter block is the predicted direction.
pub fn leading_outcome(block: &Bits) -> Outcome {
    Outcome::from(block.first().map(|b| *b).unwrap_or(false))
}

/// Reject an instruction whose address is not `width` bits wide.
pub fn check_instruction(inst: &BranchInstruction, width: usize) -> Result<()> {
    check_width("branch instruction", width, inst.len())
}

/// Reject a zero-width register, table, or hash.
pub fn require_nonzero(what: &str, value: usize) -> Result<()> {
    if value == 0 {
        Err(Error::InvalidConfig(format!("{} must be non-zero", what)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn latch_requires_matching_address() {
        let a = parse("0001").unwrap();
        let b = parse("0010").unwrap();
        let mut sc = CounterLatch::new(2);

        assert_eq!(sc.release(&a), Err(Error::UnmatchedUpdate));

        sc.latch(&a, &parse("10").unwrap()).unwrap();
        assert_eq!(sc.release(&b), Err(Error::UnmatchedUpdate));
        assert!(sc.is_pending());

        assert_eq!(sc.release(&a), Ok(parse("10").unwrap()));
        assert!(!sc.is_pending());
        assert_eq!(sc.release(&a), Err(Error::UnmatchedUpdate));
    }

    #[test]
    fn leading_bit_predicts() {
        assert_eq!(leading_outcome(&parse("10").unwrap()), Outcome::T);
        assert_eq!(leading_outcome(&parse("01").unwrap()), Outcome::N);
        assert_eq!(leading_outcome(&parse("").unwrap()), Outcome::N);
    }
}
