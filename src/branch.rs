//! Types for representing branches and branch outcomes.

use crate::bits::*;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    pub fn is_taken(&self) -> bool {
        matches!(self, Self::T)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "T",
            Self::N => "N",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> Self {
        x.is_taken()
    }
}

/// The address of a conditional branch, as seen by a predictor.
///
/// The width of the address is fixed when the instruction is created.
/// Predictors reject instructions whose width differs from their configured
/// `branch_instruction_size`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BranchInstruction {
    addr: BitVector,
}
impl BranchInstruction {
    pub fn new(addr: BitVector) -> Self {
        Self { addr }
    }

    /// Build an instruction from the low `width` bits of a program counter.
    pub fn from_pc(pc: usize, width: usize) -> Self {
        Self { addr: from_usize(pc, width) }
    }

    pub fn address(&self) -> &Bits { &self.addr }
    pub fn len(&self) -> usize { self.addr.len() }
    pub fn is_empty(&self) -> bool { self.addr.is_empty() }
}

impl std::fmt::Display for BranchInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", to_string(&self.addr))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_bit_conversions() {
        assert_eq!(Outcome::from(true), Outcome::T);
        assert_eq!(Outcome::from(false), Outcome::N);
        assert!(bool::from(Outcome::T));
        assert!(!Outcome::N.is_taken());
        assert_eq!(!Outcome::N, Outcome::T);
    }

    #[test]
    fn instruction_from_pc() {
        let inst = BranchInstruction::from_pc(0x1234_00a5, 8);
        assert_eq!(inst.len(), 8);
        assert_eq!(inst.to_string(), "10100101");
    }
}
