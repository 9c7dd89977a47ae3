//! Driving a predictor over a trace.

use log::{ debug, trace };
use crate::branch::*;
use crate::error::*;
use crate::predictor::BranchPredictor;
use crate::stats::BranchStats;
use crate::trace::*;

/// Run `predictor` over every record in `trace`.
///
/// Each record is truncated to its low `addr_bits` bits, predicted, and then
/// immediately resolved with the recorded outcome.
///
/// The statistics stay keyed by the full program counter. Two PCs that agree
/// in their low `addr_bits` bits share all predictor state, but are still
/// reported as separate branches.
pub fn evaluate(
    predictor: &mut dyn BranchPredictor,
    trace: &Trace,
    addr_bits: usize,
) -> Result<BranchStats>
{
    let mut stats = BranchStats::new();
    debug!("evaluating {} over {} ({} records)",
        predictor.name(), trace.name(), trace.num_entries()
    );
    for record in trace.as_slice() {
        let prediction = step(predictor, record, addr_bits)?;
        stats.record(record, prediction);
    }
    debug!("{}: {}/{} hits", predictor.name(),
        stats.global_hits(), stats.global_brns()
    );
    Ok(stats)
}

/// Predict a single record, then update with its outcome.
/// Only the low `addr_bits` bits of the PC reach the predictor.
/// Returns the prediction.
pub fn step(
    predictor: &mut dyn BranchPredictor,
    record: &TraceRecord,
    addr_bits: usize,
) -> Result<Outcome>
{
    let inst = BranchInstruction::from_pc(record.pc, addr_bits);
    let prediction = predictor.predict(&inst)?;
    predictor.update(&inst, record.outcome)?;
    trace!("{:#x}: predicted {} actual {}", record.pc, prediction, record.outcome);
    Ok(prediction)
}
