//! Errors reported by predictors and their building blocks.

/// Things that can go wrong while building or driving a predictor.
///
/// Nearly all of these are structural: a register, table, or instruction
/// of the wrong width. Nothing is ever truncated or padded to make a
/// mismatched vector fit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bit vector did not have the width required by its destination.
    WidthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A predictor (or one of its parts) was configured with parameters
    /// that cannot describe a working predictor.
    InvalidConfig(String),

    /// [`update`] was called without a pending prediction for the same
    /// instruction.
    ///
    /// [`update`]: crate::predictor::BranchPredictor::update
    UnmatchedUpdate,

    /// A character other than '0' or '1' in a binary string.
    InvalidBit(char),

    /// A malformed line in a text trace.
    Parse { line: usize, msg: String },

    /// A malformed configuration file.
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::WidthMismatch { what, expected, found } => {
                write!(f, "{} must be {} bits wide (got {})",
                    what, expected, found
                )
            },
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::UnmatchedUpdate => {
                write!(f, "update without a matching prediction")
            },
            Self::InvalidBit(c) => write!(f, "invalid bit {:?}", c),
            Self::Parse { line, msg } => write!(f, "line {}: {}", line, msg),
            Self::Config(msg) => write!(f, "config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Fail with [`Error::WidthMismatch`] unless `found == expected`.
pub fn check_width(what: &'static str, expected: usize, found: usize)
    -> Result<()>
{
    if found == expected {
        Ok(())
    } else {
        Err(Error::WidthMismatch { what, expected, found })
    }
}
