use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::REDUCEMOD;
use crate::modulus::{ScalarOperations, VectorOperations};
use crate::{apply_sv, apply_svv, apply_v, apply_vv, apply_vvv};

impl ScalarOperations<u64> for Prime<u64> {
    /// Applies a modular reduction on x based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if x >= q.
    /// - TWICE: subtracts 2q if x >= 2q.
    /// - FOURTIMES: subtracts 4q if x >= 4q.
    /// - BARRETT: maps x to x mod q using Barrett reduction.
    /// - BARRETTLAZY: maps x to x mod q using Barrett reduction with values in [0, 2q-1].
    #[inline(always)]
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(a);
    }

    #[inline(always)]
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(c);
    }

    #[inline(always)]
    fn sa_add_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        *b = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(b);
    }

    #[inline(always)]
    fn sa_sub_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(self.q.wrapping_sub(*b));
        self.sa_reduce_into_sa::<REDUCE>(c);
    }

    #[inline(always)]
    fn sa_sub_sb_into_sa<const REDUCE: REDUCEMOD>(&self, b: &u64, a: &mut u64) {
        *a = a.wrapping_add(self.q.wrapping_sub(*b));
        self.sa_reduce_into_sa::<REDUCE>(a);
    }

    #[inline(always)]
    fn sa_neg_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        *a = self.q.wrapping_sub(*a);
        self.sa_reduce_into_sa::<REDUCE>(a)
    }

    #[inline(always)]
    fn sa_neg_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        *b = self.q.wrapping_sub(*a);
        self.sa_reduce_into_sa::<REDUCE>(b)
    }

    #[inline(always)]
    fn sa_mul_sb_into_sc(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = self.barrett.mul(*a, *b);
    }

    #[inline(always)]
    fn sa_mul_sb_into_sb(&self, a: &u64, b: &mut u64) {
        *b = self.barrett.mul(*a, *b);
    }

    #[inline(always)]
    fn sa_mul_sb_add_sc_into_sc(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = self
            .barrett
            .reduce_u128(*a as u128 * *b as u128 + *c as u128);
    }

    #[inline(always)]
    fn sa_barrett_mul_sb_into_sc<const REDUCE: REDUCEMOD>(
        &self,
        a: &Barrett<u64>,
        b: &u64,
        c: &mut u64,
    ) {
        *c = self.barrett.mul_external::<REDUCE>(*a, *b);
    }

    #[inline(always)]
    fn sa_barrett_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &Barrett<u64>, b: &mut u64) {
        self.barrett.mul_external_assign::<REDUCE>(*a, b);
    }
}

impl VectorOperations<u64> for Prime<u64> {
    /// Applies a modular reduction on x based on REDUCE.
    #[inline(always)]
    fn va_reduce_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [u64]) {
        apply_v!(self, Self::sa_reduce_into_sa::<REDUCE>, a, CHUNK);
    }

    #[inline(always)]
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_add_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &mut [u64],
    ) {
        apply_vv!(self, Self::sa_add_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_sub_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_sub_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_sub_vb_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        b: &[u64],
        a: &mut [u64],
    ) {
        apply_vv!(self, Self::sa_sub_sb_into_sa::<REDUCE>, b, a, CHUNK);
    }

    #[inline(always)]
    fn va_neg_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [u64]) {
        apply_v!(self, Self::sa_neg_into_sa::<REDUCE>, a, CHUNK);
    }

    #[inline(always)]
    fn va_neg_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_neg_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_into_vc<const CHUNK: usize>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        apply_vvv!(self, Self::sa_mul_sb_into_sc, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_into_vb<const CHUNK: usize>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_mul_sb_into_sb, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_add_vc_into_vc<const CHUNK: usize>(&self, a: &[u64], b: &[u64], c: &mut [u64]) {
        apply_vvv!(self, Self::sa_mul_sb_add_sc_into_sc, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn sa_barrett_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &Barrett<u64>,
        b: &mut [u64],
    ) {
        apply_sv!(self, Self::sa_barrett_mul_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn sa_barrett_mul_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &Barrett<u64>,
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_svv!(self, Self::sa_barrett_mul_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::ONCE;

    #[test]
    fn vector_kernels_match_scalar_reference() {
        let prime: Prime<u64> = Prime::new(0x1fffffffffe00001).unwrap();
        let q: u128 = prime.q as u128;
        let a: Vec<u64> = (0..19u64).map(|i| i.wrapping_mul(0x9e3779b97f4a7c15) % prime.q).collect();
        let b: Vec<u64> = (0..19u64).map(|i| i.wrapping_mul(0xc2b2ae3d27d4eb4f).wrapping_add(7) % prime.q).collect();

        let mut c: Vec<u64> = vec![0; 19];
        prime.va_add_vb_into_vc::<8, ONCE>(&a, &b, &mut c);
        (0..19).for_each(|i| assert_eq!(c[i] as u128, (a[i] as u128 + b[i] as u128) % q));

        prime.va_sub_vb_into_vc::<8, ONCE>(&a, &b, &mut c);
        (0..19).for_each(|i| assert_eq!(c[i] as u128, (a[i] as u128 + q - b[i] as u128) % q));

        prime.va_mul_vb_into_vc::<8>(&a, &b, &mut c);
        (0..19).for_each(|i| assert_eq!(c[i] as u128, (a[i] as u128 * b[i] as u128) % q));

        let mut d: Vec<u64> = b.clone();
        prime.va_mul_vb_add_vc_into_vc::<8>(&a, &b, &mut d);
        (0..19).for_each(|i| {
            assert_eq!(d[i] as u128, (a[i] as u128 * b[i] as u128 + b[i] as u128) % q)
        });

        let mut e: Vec<u64> = a.clone();
        prime.va_neg_into_va::<8, ONCE>(&mut e);
        (0..19).for_each(|i| assert_eq!((e[i] as u128 + a[i] as u128) % q, 0));

        let w: Barrett<u64> = prime.barrett.prepare(31337);
        prime.sa_barrett_mul_vb_into_vc::<8, ONCE>(&w, &a, &mut c);
        (0..19).for_each(|i| assert_eq!(c[i] as u128, (31337 * a[i] as u128) % q));
    }
}
