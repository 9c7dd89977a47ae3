//! The GAg predictor: global history, global pattern history table.

use log::{ debug, trace };
use serde::{ Deserialize, Serialize };
use crate::bits::*;
use crate::branch::*;
use crate::error::*;
use crate::history::HistoryRegister;
use crate::logic::*;
use crate::predictor::*;

/// How [`GAg`] advances its global history register after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GAgHistory {
    /// Shift in the outcome bit, like every other predictor.
    #[default]
    Shift,

    /// Overwrite the register with the updated counter value.
    /// The register and the counters must have the same width.
    LoadCounter,
}

/// A single global history register selects a counter in a single table.
///
/// The branch address takes no part in the prediction, so instructions of
/// any width are accepted.
#[derive(Clone, Debug)]
pub struct GAg {
    /// Global branch history register
    bhr: HistoryRegister,

    /// Pattern history table, indexed by the BHR
    pht: PatternHistoryTable,

    /// Counter latched by the last prediction
    sc: CounterLatch,

    history: GAgHistory,
}
impl GAg {
    pub fn new(bhr_size: usize, sc_size: usize) -> Result<Self> {
        Self::with_history(bhr_size, sc_size, GAgHistory::Shift)
    }

    pub fn with_history(bhr_size: usize, sc_size: usize, history: GAgHistory)
        -> Result<Self>
    {
        require_nonzero("BHR size", bhr_size)?;
        require_nonzero("SC size", sc_size)?;
        if history == GAgHistory::LoadCounter && bhr_size != sc_size {
            return Err(Error::InvalidConfig(format!(
                "loading a {}-bit counter into a {}-bit BHR", sc_size, bhr_size
            )));
        }
        debug!("GAg: {}-bit BHR, {}-bit counters, {:?} history",
            bhr_size, sc_size, history
        );
        Ok(Self {
            bhr: HistoryRegister::new("BHR", bhr_size),
            pht: PatternHistoryTable::new("PHT", bhr_size, sc_size),
            sc: CounterLatch::new(sc_size),
            history,
        })
    }

    pub fn bhr(&self) -> &Bits { self.bhr.read() }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }
}

impl BranchPredictor for GAg {
    fn name(&self) -> &'static str { "GAg" }

    fn predict(&mut self, inst: &BranchInstruction) -> Result<Outcome> {
        let idx = self.bhr.read().to_bitvec();
        let block = self.pht.read_or_init(&idx)?;
        self.sc.latch(inst.address(), &block)?;

        let outcome = leading_outcome(&block);
        trace!("GAg predict {}: BHR={} SC={} -> {}",
            inst, self.bhr, to_string(&block), outcome
        );
        Ok(outcome)
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        let latched = self.sc.release(inst.address())?;
        let counted = count(&latched, outcome.is_taken(), CountMode::Saturating);

        let idx = self.bhr.read().to_bitvec();
        self.pht.put(&idx, counted.clone())?;
        match self.history {
            GAgHistory::Shift => self.bhr.insert(outcome.is_taken()),
            GAgHistory::LoadCounter => self.bhr.load(&counted)?,
        }

        trace!("GAg update {} ({}): PHT[{}]={} BHR={}",
            inst, outcome, to_string(&idx), to_string(&counted), self.bhr
        );
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAg predictor snapshot:\n{}{}{}",
            self.bhr.monitor(), self.sc.monitor(), self.pht.monitor()
        )
    }
}
