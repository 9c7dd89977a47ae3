//! The PAg predictor: per-address history, global pattern history table.

use log::{ debug, trace };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::bank::RegisterBank;
use crate::logic::*;
use crate::predictor::*;

/// Each branch address owns a history register; all of them index the same
/// table of counters.
#[derive(Clone, Debug)]
pub struct PAg {
    branch_instruction_size: usize,

    /// Per-address branch history registers, keyed by the full address
    bank: RegisterBank,

    /// Pattern history table, indexed by the selected BHR
    pht: PatternHistoryTable,

    sc: CounterLatch,
}
impl PAg {
    pub fn new(bhr_size: usize, sc_size: usize, branch_instruction_size: usize)
        -> Result<Self>
    {
        require_nonzero("BHR size", bhr_size)?;
        require_nonzero("SC size", sc_size)?;
        require_nonzero("branch instruction size", branch_instruction_size)?;
        debug!("PAg: {}-bit BHRs, {}-bit counters, {}-bit addresses",
            bhr_size, sc_size, branch_instruction_size
        );
        Ok(Self {
            branch_instruction_size,
            bank: RegisterBank::new("PABHR", branch_instruction_size, bhr_size),
            pht: PatternHistoryTable::new("PHT", bhr_size, sc_size),
            sc: CounterLatch::new(sc_size),
        })
    }

    pub fn bank(&self) -> &RegisterBank { &self.bank }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }
}

impl BranchPredictor for PAg {
    fn name(&self) -> &'static str { "PAg" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        check_instruction(inst, self.branch_instruction_size)?;
        let addr = inst.address();
        let bhr = self.bank.read(addr)?;

        let block = self.pht.read_or_init(bhr.read())?;
        self.sc.latch(addr, &block)?;
        self.bank.write(addr, bhr.read())?;

        let outcome = leading_outcome(&block);
        trace!("PAg predict {}: BHR={} SC={} -> {}",
            inst, bhr, to_string(&block), outcome
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
        self.pht.put(bhr.read(), counted)?;
        bhr.insert(outcome.is_taken());
        self.bank.write(addr, bhr.read())?;

        trace!("PAg update {} ({}): BHR={}", inst, outcome, bhr);
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("PAg predictor snapshot:\n{}{}{}",
            self.bank.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn history_is_per_address() {
        let mut p = PAg::new(2, 2, 4).unwrap();
        let a = BranchInstruction::from_pc(0x3, 4);
        let b = BranchInstruction::from_pc(0x9, 4);

        p.predict(&a).unwrap();
        p.update(&a, Outcome::T).unwrap();
        p.predict(&b).unwrap();
        p.update(&b, Outcome::N).unwrap();

        assert_eq!(p.bank().peek(a.address()), Some(parse("01").unwrap().as_bitslice()));
        assert_eq!(p.bank().peek(b.address()), Some(parse("00").unwrap().as_bitslice()));

        // Both started from the all-zero history, so they share PHT[00].
        // 'a' counted it up, 'b' counted it back down.
        assert_eq!(p.pht().get(&parse("00").unwrap()).unwrap(), Some(&parse("00").unwrap()));
    }

    #[test]
    fn predict_materializes_register() {
        let mut p = PAg::new(3, 2, 4).unwrap();
        let a = BranchInstruction::from_pc(0x5, 4);
        assert_eq!(p.predict(&a).unwrap(), Outcome::N);
        assert_eq!(p.bank().len(), 1);
        assert_eq!(p.bank().peek(a.address()), Some(zeros(3).as_bitslice()));
    }
}
