//! Two-level adaptive branch predictors.
//!
//! The first level is a branch history register (global, per address, or per
//! set of hashed addresses). The second level is a pattern history table of
//! saturating counters, indexed by the history and optionally by the branch
//! address or a hash of it. See [`predictor`] for the seven organizations.

pub mod bits;
pub mod error;
pub mod branch;
pub mod history;
pub mod bank;
pub mod logic;
pub mod predictor;
pub mod config;
pub mod trace;
pub mod stats;
pub mod sim;

pub use error::{ Error, Result };
pub use branch::*;
pub use history::*;
pub use bank::*;
pub use predictor::*;
pub use config::*;
pub use trace::*;
