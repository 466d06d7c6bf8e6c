use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::ReduceOnce;
use crate::modulus::{ONCE, REDUCEMOD};

impl MontgomeryPrecomp<u64> {
    /// Returns a new instance of MontgomeryPrecomp<u64>.
    /// The modulus q must be odd and smaller than 2^62.
    pub fn new(q: u64) -> MontgomeryPrecomp<u64> {
        assert!(q & 1 == 1, "invalid argument: q={} is not odd", q);
        assert!(q >> 62 == 0, "invalid argument: q={} >= 2^62", q);
        // Newton iteration, each step doubles the number of correct low bits.
        let mut q_inv: u64 = q;
        for _ in 0..5 {
            q_inv = q_inv.wrapping_mul(2u64.wrapping_sub(q.wrapping_mul(q_inv)));
        }
        let mut precomp = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            barrett: BarrettPrecomp::new(q),
            q_inv,
            one: 0,
            minus_one: 0,
        };
        precomp.one = precomp.prepare::<ONCE>(1);
        precomp.minus_one = q - precomp.one;
        precomp
    }

    /// Returns 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn one(&self) -> Montgomery<u64> {
        self.one
    }

    /// Returns (q-1) * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn minus_one(&self) -> Montgomery<u64> {
        self.minus_one
    }

    /// Applies a modular reduction on x based on REDUCE.
    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(x)
    }

    /// Returns lhs * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn prepare<const REDUCE: REDUCEMOD>(&self, lhs: u64) -> Montgomery<u64> {
        let mut r: u64 = (((lhs as u128) << 64) % self.q as u128) as u64;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Returns lhs * (2^64)^-1 mod q as a u64.
    #[inline(always)]
    pub fn unprepare<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>) -> u64 {
        self.mul_external::<REDUCE>(lhs, 1)
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q, in [0, 2q) before REDUCE.
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: u64) -> u64 {
        debug_assert!(lhs < self.q, "lhs={} >= q={}", lhs, self.q);
        let t: u128 = lhs as u128 * rhs as u128;
        let m: u64 = (t as u64).wrapping_mul(self.q_inv);
        let mq_hi: u64 = ((m as u128 * self.q as u128) >> 64) as u64;
        let mut r: u64 = ((t >> 64) as u64).wrapping_sub(mq_hi).wrapping_add(self.q);
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        *rhs = self.mul_external::<REDUCE>(lhs, *rhs)
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn mul_internal<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: Montgomery<u64>,
    ) -> Montgomery<u64> {
        self.mul_external::<REDUCE>(lhs, rhs)
    }

    #[inline(always)]
    pub fn mul_internal_assign<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: &mut Montgomery<u64>,
    ) {
        self.mul_external_assign::<REDUCE>(lhs, rhs);
    }

    /// Returns (x^exponent) * 2^64 mod q.
    #[inline(always)]
    pub fn pow(&self, x: Montgomery<u64>, exponent: u64) -> Montgomery<u64> {
        let mut y: Montgomery<u64> = self.one();
        let mut x_mut: Montgomery<u64> = x;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                self.mul_internal_assign::<ONCE>(x_mut, &mut y);
            }
            self.mul_internal_assign::<ONCE>(x_mut, &mut x_mut);
            i >>= 1;
        }
        y.reduce_once_assign(self.q);
        y
    }
}
