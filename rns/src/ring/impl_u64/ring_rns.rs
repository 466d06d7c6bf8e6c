use crate::error::RnsError;
use crate::modulus::barrett::Barrett;
use crate::modulus::REDUCEMOD;
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};
use num_bigint::BigUint;
use std::sync::Arc;

impl RingRNS<u64> {
    /// Returns the product ring over the given primes.
    /// Fails if moduli is empty, contains duplicates or invalid primes.
    pub fn new(n: usize, moduli: &[u64]) -> Result<Self, RnsError> {
        RingRNS(Vec::new()).extend(n, moduli)
    }

    /// Returns a ring over the primes of self followed by the given ones.
    /// The rings of self are shared, not rebuilt.
    pub fn extend(&self, n: usize, moduli: &[u64]) -> Result<Self, RnsError> {
        if self.0.is_empty() && moduli.is_empty() {
            return Err(RnsError::EmptyBasis);
        }
        let mut rings: Vec<Arc<Ring<u64>>> = self.0.clone();
        for &q in moduli {
            if rings.iter().any(|r| r.modulus.q == q) {
                return Err(RnsError::DuplicateModulus(q));
            }
            rings.push(Arc::new(Ring::new(n, q)?));
        }
        Ok(RingRNS(rings))
    }

    pub fn moduli(&self) -> Vec<u64> {
        self.0.iter().map(|r| r.modulus.q).collect()
    }

    /// Product of all moduli.
    pub fn modulus(&self) -> BigUint {
        self.0
            .iter()
            .fold(BigUint::from(1u64), |acc, r| acc * r.modulus.q)
    }

    /// Writes the signed coefficients into every residue of a.
    pub fn from_i64(&self, coeffs: &[i64], a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.from_i64(coeffs, a.at_mut(i)));
    }
}

impl RingRNS<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.ntt_inplace::<LAZY>(&mut a.0[i]));
    }

    pub fn intt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.intt_inplace::<LAZY>(&mut a.0[i]));
    }

    pub fn ntt<const LAZY: bool>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.ntt::<LAZY>(&a.0[i], &mut b.0[i]));
    }

    pub fn intt<const LAZY: bool>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.intt::<LAZY>(&a.0[i], &mut b.0[i]));
    }
}

impl RingRNS<u64> {
    #[inline(always)]
    pub fn a_add_b_into_b<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_add_b_into_b::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn a_add_b_into_c<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_add_b_into_c::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    #[inline(always)]
    pub fn a_sub_b_into_a<const REDUCE: REDUCEMOD>(&self, b: &PolyRNS<u64>, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_sub_b_into_a::<REDUCE>(&b.0[i], &mut a.0[i]));
    }

    #[inline(always)]
    pub fn a_sub_b_into_c<const REDUCE: REDUCEMOD>(
        &self,
        a: &PolyRNS<u64>,
        b: &PolyRNS<u64>,
        c: &mut PolyRNS<u64>,
    ) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_sub_b_into_c::<REDUCE>(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    #[inline(always)]
    pub fn a_neg_into_a<const REDUCE: REDUCEMOD>(&self, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_neg_into_a::<REDUCE>(&mut a.0[i]));
    }

    #[inline(always)]
    pub fn a_neg_into_b<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_neg_into_b::<REDUCE>(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn a_mul_b_into_c(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_mul_b_into_c(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    #[inline(always)]
    pub fn a_mul_b_into_b(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_mul_b_into_b(&a.0[i], &mut b.0[i]));
    }

    #[inline(always)]
    pub fn a_mul_b_add_c_into_c(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_mul_b_add_c_into_c(&a.0[i], &b.0[i], &mut c.0[i]));
    }

    /// Multiplies the i-th residue of a by the scalar b[i].
    #[inline(always)]
    pub fn a_mul_b_scalar_barrett_into_a<const REDUCE: REDUCEMOD>(
        &self,
        b: &[Barrett<u64>],
        a: &mut PolyRNS<u64>,
    ) {
        debug_assert!(b.len() > self.level(), "b.len()={} <= self.level()={}", b.len(), self.level());
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.a_mul_b_scalar_barrett_into_a::<REDUCE>(&b[i], &mut a.0[i]));
    }

    /// Writes into b, for every modulus of self, the i-th base-2^log_base
    /// digit of the single-modulus polynomial a.
    pub fn a_ith_digit_unsigned_base_scalar_b_into_c(
        &self,
        i: usize,
        a: &Poly<u64>,
        log_base: &usize,
        b: &mut PolyRNS<u64>,
    ) {
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0.iter().enumerate().for_each(|(j, ring)| {
            ring.a_ith_digit_unsigned_base_scalar_b_into_c(i, a, log_base, &mut b.0[j])
        });
    }
}
