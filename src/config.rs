//! Configuration for building a predictor.
//!
//! A [`PredictorConfig`] can be written by hand, parsed from TOML, or
//! assembled from command-line flags. For example:
//!
//! ```toml
//! kind = "SAs"
//! bhr_size = 6
//! sc_size = 2
//! branch_instruction_size = 16
//! k_size = 4
//! hash_mode = "xor"
//! ```

use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use crate::error::*;
use crate::logic::HashMode;
use crate::predictor::*;

/// The available predictor organizations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub enum PredictorKind {
    GAg,
    GAs,
    PAg,
    PAp,
    SAg,
    SAp,
    SAs,
}
impl PredictorKind {
    pub const ALL: [Self; 7] = [
        Self::GAg, Self::GAs, Self::PAg, Self::PAp, Self::SAg, Self::SAp, Self::SAs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::GAg => "GAg",
            Self::GAs => "GAs",
            Self::PAg => "PAg",
            Self::PAp => "PAp",
            Self::SAg => "SAg",
            Self::SAp => "SAp",
            Self::SAs => "SAs",
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// NOTE: Case-insensitive, so "gag", "GAG" and "GAg" all work on the
// command line.
impl FromStr for PredictorKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::Config(format!("unknown predictor {:?}", s)))
    }
}

/// Parameters for any of the predictors in [`PredictorKind`].
///
/// Fields that a predictor does not use are ignored (GAg and the PA*
/// predictors never hash, GAg never looks at the address).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    pub kind: PredictorKind,

    /// Width of each branch history register
    pub bhr_size: usize,

    /// Width of each saturating counter
    pub sc_size: usize,

    /// Width of a branch address
    pub branch_instruction_size: usize,

    /// Width of the address hash selecting a set
    pub k_size: usize,

    pub hash_mode: HashMode,

    /// History update rule for GAg
    pub gag_history: GAgHistory,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::GAg,
            bhr_size: 4,
            sc_size: 2,
            branch_instruction_size: 8,
            k_size: 4,
            hash_mode: HashMode::Xor,
            gag_history: GAgHistory::Shift,
        }
    }
}

impl PredictorConfig {
    /// Default parameters for a particular kind of predictor.
    pub fn new(kind: PredictorKind) -> Self {
        Self { kind, ..Default::default() }
    }

    /// Parse a configuration from TOML. Missing fields take their default.
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Use this configuration to create a new predictor.
    pub fn build(&self) -> Result<Box<dyn BranchPredictor + Send>> {
        let p: Box<dyn BranchPredictor + Send> = match self.kind {
            PredictorKind::GAg => Box::new(GAg::with_history(
                self.bhr_size, self.sc_size, self.gag_history
            )?),
            PredictorKind::GAs => Box::new(GAs::new(
                self.bhr_size, self.sc_size,
                self.branch_instruction_size, self.k_size, self.hash_mode
            )?),
            PredictorKind::PAg => Box::new(PAg::new(
                self.bhr_size, self.sc_size, self.branch_instruction_size
            )?),
            PredictorKind::PAp => Box::new(PAp::new(
                self.bhr_size, self.sc_size, self.branch_instruction_size
            )?),
            PredictorKind::SAg => Box::new(SAg::new(
                self.bhr_size, self.sc_size,
                self.branch_instruction_size, self.k_size, self.hash_mode
            )?),
            PredictorKind::SAp => Box::new(SAp::new(
                self.bhr_size, self.sc_size,
                self.branch_instruction_size, self.k_size, self.hash_mode
            )?),
            PredictorKind::SAs => Box::new(SAs::new(
                self.bhr_size, self.sc_size,
                self.branch_instruction_size, self.k_size, self.hash_mode
            )?),
        };
        Ok(p)
    }
}
