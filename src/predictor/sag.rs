//! The SAg predictor: per-set history, global pattern history table.

use log::{ debug, trace };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::bank::RegisterBank;
use crate::logic::*;
use crate::predictor::*;

/// Branch addresses are hashed into 2^K sets, each owning a history
/// register; all of them index the same table of counters.
#[derive(Clone, Debug)]
pub struct SAg {
    branch_instruction_size: usize,
    k_size: usize,
    hash_mode: HashMode,

    /// Per-set branch history registers, keyed by hash(address)
    bank: RegisterBank,

    /// Pattern history table, indexed by the selected BHR
    pht: PatternHistoryTable,

    sc: CounterLatch,
}
impl SAg {
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
        debug!("SAg: {}-bit BHRs, {}-bit counters, {}-bit sets from {}-bit addresses",
            bhr_size, sc_size, k_size, branch_instruction_size
        );
        Ok(Self {
            branch_instruction_size,
            k_size,
            hash_mode,
            bank: RegisterBank::new("PSBHR", k_size, bhr_size),
            pht: PatternHistoryTable::new("PHT", bhr_size, sc_size),
            sc: CounterLatch::new(sc_size),
        })
    }

    pub fn bank(&self) -> &RegisterBank { &self.bank }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }

    /// The set selecting a history register for this instruction.
    pub fn set_of(&self, inst: &BranchInstruction) -> Result<BitVector> {
        check_instruction(inst, self.branch_instruction_size)?;
        hash(inst.address(), self.k_size, self.hash_mode)
    }
}

impl BranchPredictor for SAg {
    fn name(&self) -> &'static str { "SAg" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        let set = self.set_of(inst)?;
        let bhr = self.bank.read(&set)?;

        let block = self.pht.read_or_init(bhr.read())?;
        self.sc.latch(inst.address(), &block)?;
        self.bank.write(&set, bhr.read())?;

        let outcome = leading_outcome(&block);
        trace!("SAg predict {}: set={} BHR={} SC={} -> {}",
            inst, to_string(&set), bhr, to_string(&block), outcome
        );
        Ok(outcome)
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        let set = self.set_of(inst)?;
        let latched = self.sc.release(inst.address())?;
        let counted = count(&latched, outcome.is_taken(), CountMode::Saturating);

        let mut bhr = self.bank.read(&set)?;
        self.pht.put(bhr.read(), counted)?;
        bhr.insert(outcome.is_taken());
        self.bank.write(&set, bhr.read())?;

        trace!("SAg update {} ({}): BHR={}", inst, outcome, bhr);
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("SAg predictor snapshot:\n{}{}{}",
            self.bank.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}
