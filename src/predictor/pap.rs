//! The PAp predictor: per-address history, per-address pattern history
//! tables.

use log::{ debug, trace };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::bank::RegisterBank;
use crate::logic::*;
use crate::predictor::*;

/// Each branch address owns a history register and its own set of counters.
///
/// The table index is the full address followed by the selected history,
/// so no two addresses ever share a counter.
#[derive(Clone, Debug)]
pub struct PAp {
    branch_instruction_size: usize,

    /// Per-address branch history registers, keyed by the full address
    bank: RegisterBank,

    /// Per-address pattern history table, indexed by address ++ BHR
    pht: PatternHistoryTable,

    sc: CounterLatch,
}
impl PAp {
    pub fn new(bhr_size: usize, sc_size: usize, branch_instruction_size: usize)
        -> Result<Self>
    {
        require_nonzero("BHR size", bhr_size)?;
        require_nonzero("SC size", sc_size)?;
        require_nonzero("branch instruction size", branch_instruction_size)?;
        debug!("PAp: {}-bit BHRs, {}-bit counters, {}-bit addresses",
            bhr_size, sc_size, branch_instruction_size
        );
        Ok(Self {
            branch_instruction_size,
            bank: RegisterBank::new("PABHR", branch_instruction_size, bhr_size),
            pht: PatternHistoryTable::new(
                "PAPHT", branch_instruction_size + bhr_size, sc_size
            ),
            sc: CounterLatch::new(sc_size),
        })
    }

    pub fn bank(&self) -> &RegisterBank { &self.bank }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }
}

impl BranchPredictor for PAp {
    fn name(&self) -> &'static str { "PAp" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        check_instruction(inst, self.branch_instruction_size)?;
        let addr = inst.address();
        let bhr = self.bank.read(addr)?;
        let idx = concat(addr, bhr.read());

        let block = self.pht.read_or_init(&idx)?;
        self.sc.latch(addr, &block)?;
        self.bank.write(addr, bhr.read())?;

        let outcome = leading_outcome(&block);
        trace!("PAp predict {}: PHT[{}]={} -> {}",
            inst, to_string(&idx), to_string(&block), outcome
        );
        Ok(outcome)
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        check_instruction(inst, self.branch_instruction_size)?;
        let addr = inst.address();
        let latched = self.sc.release(addr)?;
        let counted = count(&latched, outcome.is_taken(), CountMode::Saturating);

        let mut bhr = self.bank.read(addr)?;
        let idx = concat(addr, bhr.read());
        self.pht.put(&idx, counted)?;
        bhr.insert(outcome.is_taken());
        self.bank.write(addr, bhr.read())?;

        trace!("PAp update {} ({}): BHR={}", inst, outcome, bhr);
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("PAp predictor snapshot:\n{}{}{}",
            self.bank.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}
