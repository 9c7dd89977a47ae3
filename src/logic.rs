//! Pure combinational functions shared by every predictor.

use serde::{ Deserialize, Serialize };
use crate::bits::*;
use crate::error::*;

/// Behavior of [`count`] at the ends of the counter's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Clamp at all-zeros and all-ones.
    #[default]
    Saturating,
    /// Wrap around from all-ones to all-zeros (and back).
    Wrapping,
}

/// Strategy used by [`hash`] to fold an address into fewer bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMode {
    /// Bit `i` of the input is XOR'ed into bit `i % k` of the output.
    #[default]
    Xor,
}

/// Move an unsigned counter one step up (`taken`) or down.
///
/// The counter is the bit string `current` read as a binary number with the
/// leading bit most significant. The result has the same width.
pub fn count(current: &Bits, taken: bool, mode: CountMode) -> BitVector {
    let mut res = current.to_bitvec();
    let at_limit = if taken { res.all() } else { res.not_any() };
    if at_limit {
        if mode == CountMode::Wrapping {
            res.fill(!taken);
        }
        return res;
    }

    // Incrementing flips the lowest zero and clears everything below it.
    // Decrementing flips the lowest one and sets everything below it.
    let pivot = if taken { res.last_zero() } else { res.last_one() };
    if let Some(idx) = pivot {
        res.set(idx, taken);
        res[idx + 1..].fill(!taken);
    }
    res
}

/// Fold the bits of `bits` into a `k`-bit value.
///
/// Output positions that receive no input bit (when `k` exceeds the input
/// width) are zero.
pub fn hash(bits: &Bits, k: usize, mode: HashMode) -> Result<BitVector> {
    if k == 0 {
        return Err(Error::InvalidConfig("hash width must be non-zero".into()));
    }
    let mut res = zeros(k);
    match mode {
        HashMode::Xor => {
            for (i, bit) in bits.iter().by_vals().enumerate() {
                let j = i % k;
                let acc = res[j] ^ bit;
                res.set(j, acc);
            }
        },
    }
    Ok(res)
}
