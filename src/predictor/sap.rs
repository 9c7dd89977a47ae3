//! The SAp predictor: per-set history, per-address pattern history tables.

use log::{ debug, trace };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::bank::RegisterBank;
use crate::logic::*;
use crate::predictor::*;

/// Branch addresses are hashed into 2^K sets, each owning a history
/// register. Counters are private to each address: the table index is the
/// full address followed by the history of the address's set.
///
/// The register bank is keyed by the set for both the lookup and the
/// write-back.
#[derive(Clone, Debug)]
pub struct SAp {
    branch_instruction_size: usize,
    k_size: usize,
    hash_mode: HashMode,

    /// Per-set branch history registers, keyed by hash(address)
    bank: RegisterBank,

    /// Per-address pattern history table, indexed by address ++ BHR
    pht: PatternHistoryTable,

    sc: CounterLatch,
}
impl SAp {
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
        debug!("SAp: {}-bit BHRs, {}-bit counters, {}-bit sets from {}-bit addresses",
            bhr_size, sc_size, k_size, branch_instruction_size
        );
        Ok(Self {
            branch_instruction_size,
            k_size,
            hash_mode,
            bank: RegisterBank::new("PSBHR", k_size, bhr_size),
            pht: PatternHistoryTable::new(
                "PAPHT", branch_instruction_size + bhr_size, sc_size
            ),
            sc: CounterLatch::new(sc_size),
        })
    }

    pub fn bank(&self) -> &RegisterBank { &self.bank }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }

    pub fn set_of(&self, inst: &BranchInstruction) -> Result<BitVector> {
        check_instruction(inst, self.branch_instruction_size)?;
        hash(inst.address(), self.k_size, self.hash_mode)
    }
}

impl BranchPredictor for SAp {
    fn name(&self) -> &'static str { "SAp" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        let set = self.set_of(inst)?;
        let addr = inst.address();
        let bhr = self.bank.read(&set)?;
        let idx = concat(addr, bhr.read());

        let block = self.pht.read_or_init(&idx)?;
        self.sc.latch(addr, &block)?;
        self.bank.write(&set, bhr.read())?;

        let outcome = leading_outcome(&block);
        trace!("SAp predict {}: set={} PHT[{}]={} -> {}",
            inst, to_string(&set), to_string(&idx), to_string(&block), outcome
        );
        Ok(outcome)
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        let set = self.set_of(inst)?;
        let addr = inst.address();
        let latched = self.sc.release(addr)?;
        let counted = count(&latched, outcome.is_taken(), CountMode::Saturating);

        let mut bhr = self.bank.read(&set)?;
        let idx = concat(addr, bhr.read());
        self.pht.put(&idx, counted)?;
        bhr.insert(outcome.is_taken());
        self.bank.write(&set, bhr.read())?;

        trace!("SAp update {} ({}): BHR={}", inst, outcome, bhr);
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("SAp predictor snapshot:\n{}{}{}",
            self.bank.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}
