//! The GAs predictor: global history, per-set pattern history tables.

use log::{ debug, trace };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::history::HistoryRegister;
use crate::logic::*;
use crate::predictor::*;

/// A single global history register, concatenated with a K-bit hash of the
/// branch address to select a counter.
///
/// The hash picks one of 2^K "sets" of counters, and the global history
/// picks a counter within that set.
#[derive(Clone, Debug)]
pub struct GAs {
    /// Width of a branch address
    branch_instruction_size: usize,

    /// Width of the address hash
    k_size: usize,
    hash_mode: HashMode,

    /// Global branch history register
    bhr: HistoryRegister,

    /// Per-set pattern history table, indexed by hash(address) ++ BHR
    pht: PatternHistoryTable,

    sc: CounterLatch,
}
impl GAs {
    pub fn new(
        bhr_size: usize,
        sc_size: usize,
        branch_instruction_size: usize,
        k_size: usize,
        hash_mode: HashMode,
    ) -> Result<Self>
    {
        require_nonzero("BHR size", bhr_size)?;
        require_nonzero("SC size", sc_size)?;
        require_nonzero("branch instruction size", branch_instruction_size)?;
        require_nonzero("K size", k_size)?;
        debug!("GAs: {}-bit BHR, {}-bit counters, {}-bit sets from {}-bit addresses",
            bhr_size, sc_size, k_size, branch_instruction_size
        );
        Ok(Self {
            branch_instruction_size,
            k_size,
            hash_mode,
            bhr: HistoryRegister::new("BHR", bhr_size),
            pht: PatternHistoryTable::new("PSPHT", k_size + bhr_size, sc_size),
            sc: CounterLatch::new(sc_size),
        })
    }

    pub fn bhr(&self) -> &Bits { self.bhr.read() }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }

    /// Concatenate the hashed address with the global history.
    fn index(&self, inst: &BranchInstruction) -> Result<BitVector> {
        check_instruction(inst, self.branch_instruction_size)?;
        let set = hash(inst.address(), self.k_size, self.hash_mode)?;
        Ok(concat(&set, self.bhr.read()))
    }
}

impl BranchPredictor for GAs {
    fn name(&self) -> &'static str { "GAs" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        let idx = self.index(inst)?;
        let block = self.pht.read_or_init(&idx)?;
        self.sc.latch(inst.address(), &block)?;

        let outcome = leading_outcome(&block);
        trace!("GAs predict {}: PHT[{}]={} -> {}",
            inst, to_string(&idx), to_string(&block), outcome
        );
        Ok(outcome)
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        let idx = self.index(inst)?;
        let latched = self.sc.release(inst.address())?;
        let counted = count(&latched, outcome.is_taken(), CountMode::Saturating);

        self.pht.put(&idx, counted)?;
        self.bhr.insert(outcome.is_taken());

        trace!("GAs update {} ({}): BHR={}", inst, outcome, self.bhr);
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAs predictor snapshot:\n{}{}{}",
            self.bhr.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}
