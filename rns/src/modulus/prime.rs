use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::MontgomeryPrecomp;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    pub montgomery: MontgomeryPrecomp<O>,
    pub barrett: BarrettPrecomp<O>,
    /// Euler's totient of q, i.e. q-1.
    pub phi: O,
}

/// Walks the NTT-friendly primes of a fixed bit size, i.e. the primes
/// `p = k * nth_root + 1` with `2^(bit_size-1) <= p < 2^bit_size`,
/// from the largest to the smallest.
pub struct NTTFriendlyPrimesGenerator<O> {
    pub bit_size: usize,
    pub nth_root: O,
    pub next_candidate: O,
    pub lower_bound: O,
    pub exhausted: bool,
}
