//! Helpers for collecting statistics.

use std::collections::*;
use itertools::*;
use crate::bits::*;
use crate::branch::*;
use crate::trace::TraceRecord;

/// Container for recording simple statistics while evaluating a predictor.
#[derive(Clone, Debug, Default)]
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value).
    pub data: BTreeMap<usize, BranchData>,

    /// Number of correct predictions
    pub global_hits: usize,

    /// Number of times any branch instruction was executed
    pub global_brns: usize,
}
impl BranchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the global hit rate, or zero when nothing was recorded.
    pub fn hit_rate(&self) -> f64 {
        if self.global_brns == 0 {
            return 0.0;
        }
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Record a prediction for this branch, updating both the global and the
    /// per-branch statistics.
    pub fn record(&mut self, record: &TraceRecord, prediction: Outcome) {
        self.update_global(record, prediction);
        self.update_per_branch(record, prediction);
    }

    /// Update global statistics.
    pub fn update_global(&mut self, record: &TraceRecord, prediction: Outcome) {
        self.global_brns += 1;
        if prediction == record.outcome { self.global_hits += 1; }
    }

    /// Update per-branch statistics.
    pub fn update_per_branch(&mut self,
        record: &TraceRecord, prediction: Outcome)
    {
        let hit = prediction == record.outcome;
        let data = self.get_mut(record.pc);
        data.occ += 1;
        data.pat.push(record.outcome.is_taken());
        if hit { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: usize) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: usize) -> &mut BranchData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of branches that are always taken
    pub fn num_always_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_always_taken()).count()
    }

    /// Returns the number of branches that are never taken
    pub fn num_never_taken(&self) -> usize {
        self.data.values().filter(|entry| entry.is_never_taken()).count()
    }

    /// The `n` most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(usize, &BranchData)> {
        self.data.iter()
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ).then(y.0.cmp(x.0)))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }

    /// Up to `n` branches executed at least `min_occ` times whose hit rate is
    /// at or below `max_rate`, most frequent first.
    pub fn get_low_rate_branches(&self, n: usize, min_occ: usize, max_rate: f64)
        -> Vec<(usize, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.occ >= min_occ && s.hit_rate() <= max_rate)
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ).then(y.0.cmp(x.0)))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Clone, Debug, Default)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVector,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        if self.occ == 0 {
            return 0.0;
        }
        self.hits as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    // NOTE: Only useful for telling whether a sequence of outcomes is mixed
    // or uniform.
    pub fn shannon_entropy(&self) -> f64 {
        let n   = self.pat.len() as f64;
        let p_t = self.pat.count_ones() as f64 / n;
        let p_f = self.pat.count_zeros() as f64 / n;

        let res = -(p_t * p_t.log2() + p_f * p_f.log2());
        if res.is_nan() { 0.0 } else { res }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rec(pc: usize, outcome: Outcome) -> TraceRecord {
        TraceRecord::new(pc, outcome)
    }

    #[test]
    fn global_and_per_branch() {
        let mut s = BranchStats::new();
        assert_eq!(s.hit_rate(), 0.0);

        s.record(&rec(0x10, Outcome::T), Outcome::T);
        s.record(&rec(0x10, Outcome::T), Outcome::N);
        s.record(&rec(0x20, Outcome::N), Outcome::N);
        s.record(&rec(0x10, Outcome::N), Outcome::N);

        assert_eq!(s.global_brns(), 4);
        assert_eq!(s.global_hits(), 3);
        assert_eq!(s.global_miss(), 1);
        assert_eq!(s.hit_rate(), 0.75);
        assert_eq!(s.num_unique_branches(), 2);

        let d = s.get(0x10).unwrap();
        assert_eq!(d.occ, 3);
        assert_eq!(d.hits, 2);
        assert_eq!(d.times_taken(), 2);
        assert_eq!(s.num_never_taken(), 1);
        assert_eq!(s.num_always_taken(), 0);
    }

    #[test]
    fn low_rate_branches_most_frequent_first() {
        let mut s = BranchStats::new();
        for _ in 0..4 { s.record(&rec(0x1, Outcome::T), Outcome::N); }
        for _ in 0..6 { s.record(&rec(0x2, Outcome::T), Outcome::N); }
        for _ in 0..8 { s.record(&rec(0x3, Outcome::T), Outcome::T); }
        s.record(&rec(0x4, Outcome::T), Outcome::N);

        let low: Vec<usize> = s.get_low_rate_branches(10, 2, 0.5)
            .iter().map(|(pc, _)| *pc).collect();
        assert_eq!(low, vec![0x2, 0x1]);

        let common: Vec<usize> = s.get_common_branches(2)
            .iter().map(|(pc, _)| *pc).collect();
        assert_eq!(common, vec![0x3, 0x2]);
    }

    #[test]
    fn entropy() {
        let mut d = BranchData::default();
        d.pat = crate::bits::parse("1111").unwrap();
        assert_eq!(d.shannon_entropy(), 0.0);
        d.pat = crate::bits::parse("1010").unwrap();
        assert_eq!(d.shannon_entropy(), 1.0);
    }
}
