//! Branch traces: a plain-text format, and synthetic traces built from
//! simple outcome patterns.
//!
//! The text format has one conditional branch per line: a hexadecimal
//! program counter and the resolved outcome.
//!
//! ```text
//! # pc      outcome
//! 0x4005d0  T
//! 4005e8    n
//! 0x4005d0  1
//! ```

use rand::prelude::*;
use rand::seq::index;
use crate::branch::*;
use crate::error::*;

/// A single resolved conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// The program counter value for this branch
    pub pc: usize,

    /// The outcome evaluated for this branch
    pub outcome: Outcome,
}
impl TraceRecord {
    pub fn new(pc: usize, outcome: Outcome) -> Self {
        Self { pc, outcome }
    }
}

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch whose outcome is only periodically "not-taken".
    /// Otherwise, the branch is "taken" by default.
    NotTakenPeriodic(usize),

    /// A branch with an arbitrary repeating pattern of outcomes.
    Pattern(Vec<Outcome>),
}
impl BranchPattern {
    /// Reject a pattern with nothing to repeat: a zero period, or an empty
    /// list of outcomes.
    pub fn validate(self) -> Result<Self> {
        match &self {
            Self::TakenPeriodic(0) | Self::NotTakenPeriodic(0) => {
                Err(Error::InvalidConfig("branch pattern period must be non-zero".into()))
            },
            Self::Pattern(p) if p.is_empty() => {
                Err(Error::InvalidConfig("branch pattern must not be empty".into()))
            },
            _ => Ok(self),
        }
    }

    /// Generate the outcome for the `ctr`-th execution of the branch.
    ///
    /// Panics on a pattern that [`BranchPattern::validate`] rejects.
    pub fn outcome(&self, ctr: usize) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::T } else { Outcome::N }
            },
            Self::NotTakenPeriodic(p) => {
                if ctr % p == (p - 1) { Outcome::N } else { Outcome::T }
            },
            Self::Pattern(p) => p[ctr % p.len()],
        }
    }

    /// Pick a random pattern.
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..5) {
            0 => Self::AlwaysTaken,
            1 => Self::NeverTaken,
            2 => Self::TakenPeriodic(rng.gen_range(2..=8)),
            3 => Self::NotTakenPeriodic(rng.gen_range(2..=8)),
            _ => {
                let len = rng.gen_range(2..=6);
                Self::Pattern((0..len).map(|_| Outcome::from(rng.gen::<bool>())).collect())
            },
        }
    }
}

/// A sequence of resolved conditional branches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    pub name: String,
    pub data: Vec<TraceRecord>,
}
impl Trace {
    pub fn new(name: impl ToString, data: Vec<TraceRecord>) -> Self {
        Self { name: name.to_string(), data }
    }

    /// Return the number of records
    pub fn num_entries(&self) -> usize { self.data.len() }

    pub fn name(&self) -> &str { &self.name }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[TraceRecord] { &self.data }

    /// Parse a trace in the text format.
    pub fn parse(name: impl ToString, text: &str) -> Result<Self> {
        let mut data = Vec::new();
        for (num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            data.push(parse_record(line).map_err(|msg| {
                Error::Parse { line: num + 1, msg }
            })?);
        }
        Ok(Self::new(name, data))
    }

    /// Generate a trace of `len` records from `num_branches` branches.
    ///
    /// Each branch gets a distinct program counter below `2^addr_bits` and
    /// a random [`BranchPattern`]. Branches are interleaved at random. The
    /// same seed always yields the same trace.
    pub fn synthetic(seed: u64, num_branches: usize, len: usize, addr_bits: usize)
        -> Result<Self>
    {
        if num_branches == 0 {
            return Err(Error::InvalidConfig("synthetic trace needs branches".into()));
        }
        let space = if addr_bits >= usize::BITS as usize {
            usize::MAX
        } else {
            (1usize << addr_bits) - 1
        };
        if space < num_branches - 1 {
            return Err(Error::InvalidConfig(format!(
                "{} distinct branches do not fit in {} address bits",
                num_branches, addr_bits
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        // NOTE: A full 64-bit address space loses its top address here.
        let pcs = index::sample(&mut rng, space.saturating_add(1), num_branches)
            .into_vec();
        let patterns: Vec<BranchPattern> = (0..num_branches)
            .map(|_| BranchPattern::random(&mut rng))
            .collect();

        let mut ctr = vec![0usize; num_branches];
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            let idx = rng.gen_range(0..num_branches);
            data.push(TraceRecord::new(pcs[idx], patterns[idx].outcome(ctr[idx])));
            ctr[idx] += 1;
        }
        Ok(Self::new(format!("synthetic-{}", seed), data))
    }
}

fn parse_record(line: &str) -> std::result::Result<TraceRecord, String> {
    let mut fields = line.split_whitespace();
    let (pc, outcome) = match (fields.next(), fields.next(), fields.next()) {
        (Some(pc), Some(outcome), None) => (pc, outcome),
        _ => return Err("expected '<pc> <outcome>'".to_string()),
    };

    let digits = pc.strip_prefix("0x")
        .or_else(|| pc.strip_prefix("0X"))
        .unwrap_or(pc);
    let pc = usize::from_str_radix(digits, 16)
        .map_err(|e| format!("bad program counter {:?}: {}", pc, e))?;

    let outcome = match outcome {
        "T" | "t" | "1" => Outcome::T,
        "N" | "n" | "0" => Outcome::N,
        _ => return Err(format!("bad outcome {:?}", outcome)),
    };
    Ok(TraceRecord::new(pc, outcome))
}
