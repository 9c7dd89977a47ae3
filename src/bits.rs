//! Bit vectors with binary-string semantics.
//!
//! Everything in this crate (addresses, history, table keys, counters) is a
//! [`BitVector`]. Index 0 is the leading bit: the most-significant bit of a
//! counter, and the oldest outcome in a history register.

use bitvec::prelude::*;
use crate::error::*;

/// A single bit.
pub type Bit = bool;

/// An owned, ordered sequence of bits.
pub type BitVector = BitVec<usize, Msb0>;

/// A borrowed view of a [`BitVector`].
pub type Bits = BitSlice<usize, Msb0>;

/// Return a vector of `len` zero bits.
pub fn zeros(len: usize) -> BitVector {
    bitvec![usize, Msb0; 0; len]
}

/// Concatenate two bit vectors: `hi` becomes the leading bits.
pub fn concat(hi: &Bits, lo: &Bits) -> BitVector {
    let mut res = BitVector::with_capacity(hi.len() + lo.len());
    res.extend_from_bitslice(hi);
    res.extend_from_bitslice(lo);
    res
}

/// Take the low `width` bits of `value`, most-significant first.
///
/// Bits beyond [`usize::BITS`] are zero.
pub fn from_usize(value: usize, width: usize) -> BitVector {
    let mut res = zeros(width);
    if width == 0 {
        return res;
    }
    let lo = width.saturating_sub(usize::BITS as usize);
    res[lo..].store_be(value);
    res
}

/// Interpret the bits as an unsigned integer (most-significant first).
///
/// Only the low [`usize::BITS`] bits survive for wider vectors.
pub fn to_usize(bits: &Bits) -> usize {
    if bits.is_empty() {
        return 0;
    }
    let lo = bits.len().saturating_sub(usize::BITS as usize);
    bits[lo..].load_be::<usize>()
}

/// Parse a string of '0' and '1' characters.
pub fn parse(s: &str) -> Result<BitVector> {
    s.chars().map(|c| match c {
        '0' => Ok(false),
        '1' => Ok(true),
        _ => Err(Error::InvalidBit(c)),
    }).collect()
}

/// Format bits as a string of '0' and '1' characters.
pub fn to_string(bits: &Bits) -> String {
    bits.iter().by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}
