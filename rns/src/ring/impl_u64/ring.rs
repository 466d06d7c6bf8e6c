use crate::dft::ntt::Table;
use crate::error::RnsError;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::{ScalarOperations, VectorOperations};
use crate::modulus::{BARRETT, REDUCEMOD};
use crate::poly::Poly;
use crate::ring::Ring;
use crate::CHUNK;

impl Ring<u64> {
    /// Returns the ring Z_q[X]/(X^n + 1).
    /// Fails unless n is a power of two >= 2 and q is a prime with q = 1 mod 2n.
    pub fn new(n: usize, q: u64) -> Result<Self, RnsError> {
        if n < 2 || n & (n - 1) != 0 {
            return Err(RnsError::InvalidDegree(n));
        }
        let prime: Prime<u64> = Prime::<u64>::new(q)?;
        let dft: Table<u64> = Table::<u64>::new(prime.clone(), (2 * n) as u64)?;
        Ok(Self {
            n,
            modulus: prime,
            dft: Box::new(dft),
        })
    }

    /// Writes the signed coefficients into a, reduced modulo q.
    pub fn from_i64(&self, coeffs: &[i64], a: &mut Poly<u64>) {
        debug_assert!(coeffs.len() <= a.n(), "coeffs.len()={} > a.n()={}", coeffs.len(), a.n());
        let q: u64 = self.modulus.q;
        a.zero();
        a.0.iter_mut().zip(coeffs).for_each(|(a, c)| {
            let r: u64 = c.unsigned_abs() % q;
            *a = if *c < 0 && r != 0 { q - r } else { r };
        });
    }
}

impl Ring<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.forward_inplace_lazy(&mut poly.0),
            false => self.dft.forward_inplace(&mut poly.0),
        }
    }

    pub fn intt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.backward_inplace_lazy(&mut poly.0),
            false => self.dft.backward_inplace(&mut poly.0),
        }
    }

    pub fn ntt<const LAZY: bool>(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.ntt_inplace::<LAZY>(poly_out);
    }

    pub fn intt<const LAZY: bool>(&self, poly_in: &Poly<u64>, poly_out: &mut Poly<u64>) {
        poly_out.0.copy_from_slice(&poly_in.0);
        self.intt_inplace::<LAZY>(poly_out);
    }
}

impl Ring<u64> {
    #[inline(always)]
    pub fn a_add_b_into_b<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_add_vb_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    #[inline(always)]
    pub fn a_add_b_into_c<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_add_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn a_sub_b_into_a<const REDUCE: REDUCEMOD>(&self, b: &Poly<u64>, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_sub_vb_into_va::<CHUNK, REDUCE>(&b.0, &mut a.0);
    }

    #[inline(always)]
    pub fn a_sub_b_into_c<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Poly<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_sub_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn a_neg_into_a<const REDUCE: REDUCEMOD>(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus.va_neg_into_va::<CHUNK, REDUCE>(&mut a.0);
    }

    #[inline(always)]
    pub fn a_neg_into_b<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus.va_neg_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    /// Coefficient-wise product, i.e. the ring product when a and b are
    /// in the NTT domain.
    #[inline(always)]
    pub fn a_mul_b_into_c(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus.va_mul_vb_into_vc::<CHUNK>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn a_mul_b_into_b(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus.va_mul_vb_into_vb::<CHUNK>(&a.0, &mut b.0);
    }

    #[inline(always)]
    pub fn a_mul_b_add_c_into_c(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_mul_vb_add_vc_into_vc::<CHUNK>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn a_mul_b_scalar_barrett_into_a<const REDUCE: REDUCEMOD>(
        &self,
        b: &Barrett<u64>,
        a: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus
            .sa_barrett_mul_vb_into_vb::<CHUNK, REDUCE>(b, &mut a.0);
    }

    #[inline(always)]
    pub fn a_mul_b_scalar_barrett_into_c<const REDUCE: REDUCEMOD>(
        &self,
        a: &Poly<u64>,
        b: &Barrett<u64>,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .sa_barrett_mul_vb_into_vc::<CHUNK, REDUCE>(b, &a.0, &mut c.0);
    }

    /// Writes into c the i-th base-2^log_base digit of every coefficient
    /// of a, reduced modulo q. The coefficients of a may come from
    /// another modulus.
    pub fn a_ith_digit_unsigned_base_scalar_b_into_c(
        &self,
        i: usize,
        a: &Poly<u64>,
        log_base: &usize,
        c: &mut Poly<u64>,
    ) {
        debug_assert!(*log_base > 0 && *log_base < 64, "invalid log_base={}", log_base);
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        let shift: usize = i * log_base;
        let mask: u64 = (1 << log_base) - 1;
        if shift >= 64 {
            c.zero();
            return;
        }
        a.0.iter().zip(c.0.iter_mut()).for_each(|(a, c)| {
            *c = (a >> shift) & mask;
            self.modulus.sa_reduce_into_sa::<BARRETT>(c);
        });
    }
}
