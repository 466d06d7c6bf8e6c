use crate::dft::DFT;
use crate::error::RnsError;
use crate::modulus::barrett::Barrett;
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::ReduceOnce;
use crate::modulus::WordOps;
use crate::modulus::{BARRETT, NONE, ONCE};
use itertools::izip;

/// Twiddle factors of the negacyclic NTT modulo one prime, stored in
/// bit-reversed order and prepared for Shoup multiplication.
pub struct Table<O> {
    prime: Prime<O>,
    psi: O,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    n_inv: Barrett<u64>,
    q: O,
    two_q: O,
    four_q: O,
}

impl Table<u64> {
    /// Builds the tables of the size nth_root/2 negacyclic transform.
    /// Fails if nth_root is not a power of two dividing q-1.
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Result<Table<u64>, RnsError> {
        let psi: u64 = prime.primitive_nth_root(nth_root)?;
        let n: usize = (nth_root >> 1) as usize;

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);
        let psi_inv_mont: Montgomery<u64> = prime.montgomery.pow(psi_mont, prime.phi - 1);

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];

        psi_forward_rev[0] = prime.barrett.prepare(1);
        psi_backward_rev[0] = prime.barrett.prepare(1);

        let log_n: u32 = n.log2() as _;

        let mut powers_forward: u64 = 1u64;
        let mut powers_backward: u64 = 1u64;

        for i in 1..n {
            let i_rev: usize = i.reverse_bits_msb(log_n);

            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_mont, &mut powers_forward);
            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_inv_mont, &mut powers_backward);

            psi_forward_rev[i_rev] = prime.barrett.prepare(powers_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(powers_backward);
        }

        let n_inv: Barrett<u64> = prime.barrett.prepare(prime.inv(n as u64));
        let q: u64 = prime.q();

        Ok(Self {
            prime,
            psi,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
            q,
            two_q: q << 1,
            four_q: q << 2,
        })
    }

    /// Primitive 2n-th root of unity the tables are generated from.
    pub fn psi(&self) -> u64 {
        self.psi
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward_inplace::<false>(a)
    }

    fn forward_inplace_lazy(&self, a: &mut [u64]) {
        self.forward_inplace::<true>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward_inplace::<false>(a)
    }

    fn backward_inplace_lazy(&self, a: &mut [u64]) {
        self.backward_inplace::<true>(a)
    }
}

impl Table<u64> {
    /// Cooley-Tukey forward transform, natural order in, bit-reversed out.
    /// Input in [0, 4q), output in [0, q), or [0, 2q) if LAZY.
    pub fn forward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_forward_rev.len(),
            "invalid a.len()={} != n={}",
            n,
            self.psi_forward_rev.len()
        );
        let log_n: u32 = usize::BITS - (n - 1).leading_zeros();

        for layer in 0..log_n {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == log_n - 1 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    if LAZY {
                        self.dit_inplace::<false>(&mut a[0], &mut b[0], *psi);
                    } else {
                        self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.prime.barrett.reduce_assign::<BARRETT>(&mut a[0]);
                        self.prime.barrett.reduce_assign::<BARRETT>(&mut b[0]);
                    }
                });
            } else if size >= 8 {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dit_inplace::<true>(&mut a[0], &mut b[0], *psi);
                        self.dit_inplace::<true>(&mut a[1], &mut b[1], *psi);
                        self.dit_inplace::<true>(&mut a[2], &mut b[2], *psi);
                        self.dit_inplace::<true>(&mut a[3], &mut b[3], *psi);
                        self.dit_inplace::<true>(&mut a[4], &mut b[4], *psi);
                        self.dit_inplace::<true>(&mut a[5], &mut b[5], *psi);
                        self.dit_inplace::<true>(&mut a[6], &mut b[6], *psi);
                        self.dit_inplace::<true>(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_forward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dit_inplace::<true>(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dit_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.four_q, "a:{} 4q:{}", a, self.four_q);
        debug_assert!(*b < self.four_q, "b:{} 4q:{}", b, self.four_q);
        a.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.barrett.mul_external::<NONE>(t, *b);
        *b = *a + self.two_q - bt;
        *a += bt;
        if !LAZY {
            a.reduce_once_assign(self.two_q);
            b.reduce_once_assign(self.two_q);
        }
    }

    /// Gentleman-Sande backward transform, bit-reversed in, natural order
    /// out, scaled by n^-1. Input in [0, 2q), output in [0, q), or [0, 2q)
    /// if LAZY.
    pub fn backward_inplace<const LAZY: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_backward_rev.len(),
            "invalid a.len()={} != n={}",
            n,
            self.psi_backward_rev.len()
        );
        let log_n: u32 = usize::BITS - (n - 1).leading_zeros();

        for layer in (0..log_n).rev() {
            let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
            let t: usize = 2 * size;
            if layer == 0 {
                // Last layer has a single twiddle, n^-1 is folded into it.
                let psi: Barrett<u64> = self.prime.barrett.prepare(
                    self.prime
                        .barrett
                        .mul_external::<ONCE>(self.n_inv, self.psi_backward_rev[1].0),
                );
                let (a, b) = a.split_at_mut(size);
                izip!(a, b).for_each(|(a, b)| self.dif_last_inplace::<LAZY>(a, b, psi));
            } else if size >= 8 {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a.chunks_exact_mut(8), b.chunks_exact_mut(8)).for_each(|(a, b)| {
                        self.dif_inplace(&mut a[0], &mut b[0], *psi);
                        self.dif_inplace(&mut a[1], &mut b[1], *psi);
                        self.dif_inplace(&mut a[2], &mut b[2], *psi);
                        self.dif_inplace(&mut a[3], &mut b[3], *psi);
                        self.dif_inplace(&mut a[4], &mut b[4], *psi);
                        self.dif_inplace(&mut a[5], &mut b[5], *psi);
                        self.dif_inplace(&mut a[6], &mut b[6], *psi);
                        self.dif_inplace(&mut a[7], &mut b[7], *psi);
                    });
                });
            } else {
                izip!(a.chunks_exact_mut(t), &self.psi_backward_rev[m..]).for_each(|(a, psi)| {
                    let (a, b) = a.split_at_mut(size);
                    izip!(a, b).for_each(|(a, b)| self.dif_inplace(a, b, *psi));
                });
            }
        }
    }

    #[inline(always)]
    fn dif_inplace(&self, a: &mut u64, b: &mut u64, t: Barrett<u64>) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external::<NONE>(t, *a + self.two_q - *b);
        *a += *b;
        a.reduce_once_assign(self.two_q);
        *b = d;
    }

    #[inline(always)]
    fn dif_last_inplace<const LAZY: bool>(&self, a: &mut u64, b: &mut u64, psi: Barrett<u64>) {
        debug_assert!(*a < self.two_q, "a:{} 2q:{}", a, self.two_q);
        debug_assert!(*b < self.two_q, "b:{} 2q:{}", b, self.two_q);
        if LAZY {
            let d: u64 = self
                .prime
                .barrett
                .mul_external::<NONE>(psi, *a + self.two_q - *b);
            *a = self.prime.barrett.mul_external::<NONE>(self.n_inv, *a + *b);
            *b = d;
        } else {
            let d: u64 = self
                .prime
                .barrett
                .mul_external::<ONCE>(psi, *a + self.two_q - *b);
            *a = self.prime.barrett.mul_external::<ONCE>(self.n_inv, *a + *b);
            *b = d;
            debug_assert!(*a < self.q, "a:{} q:{}", a, self.q);
            debug_assert!(*b < self.q, "b:{} q:{}", b, self.q);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negacyclic_schoolbook(a: &[u64], b: &[u64], q: u64) -> Vec<u64> {
        let n: usize = a.len();
        let mut c: Vec<u128> = vec![0; n];
        for i in 0..n {
            for j in 0..n {
                let p: u128 = a[i] as u128 * b[j] as u128 % q as u128;
                if i + j < n {
                    c[i + j] = (c[i + j] + p) % q as u128;
                } else {
                    c[i + j - n] = (c[i + j - n] + q as u128 - p) % q as u128;
                }
            }
        }
        c.into_iter().map(|x| x as u64).collect()
    }

    #[test]
    fn test_ntt() {
        let prime: Prime<u64> = Prime::<u64>::new(0x800000000004001).unwrap();
        let n: u64 = 32;
        let ntt_table: Table<u64> = Table::<u64>::new(prime, n << 1).unwrap();
        let mut a: Vec<u64> = vec![0; n as usize];
        for i in 0..a.len() {
            a[i] = i as u64;
        }

        let b: Vec<u64> = a.clone();
        ntt_table.forward_inplace::<false>(&mut a);
        ntt_table.backward_inplace::<false>(&mut a);
        assert!(a == b);

        ntt_table.forward_inplace::<true>(&mut a);
        ntt_table.backward_inplace::<true>(&mut a);
        a.iter_mut().for_each(|x| x.reduce_once_assign(ntt_table.q));
        assert!(a == b);
    }

    #[test]
    fn test_ntt_negacyclic_product() {
        let q: u64 = 12289;
        for log_n in 1..7 {
            let n: usize = 1 << log_n;
            let table: Table<u64> = Table::new(Prime::new(q).unwrap(), (n as u64) << 1).unwrap();
            let a: Vec<u64> = (0..n as u64).map(|i| (i * 7919 + 3) % q).collect();
            let b: Vec<u64> = (0..n as u64).map(|i| (i * i * 131 + 11) % q).collect();
            let want: Vec<u64> = negacyclic_schoolbook(&a, &b, q);

            let mut a_ntt: Vec<u64> = a.clone();
            let mut b_ntt: Vec<u64> = b.clone();
            table.forward_inplace::<false>(&mut a_ntt);
            table.forward_inplace::<false>(&mut b_ntt);
            let mut c: Vec<u64> = izip!(&a_ntt, &b_ntt).map(|(x, y)| x * y % q).collect();
            table.backward_inplace::<false>(&mut c);
            assert_eq!(c, want, "n={}", n);
        }
    }

    #[test]
    fn test_ntt_rejects_unfriendly_prime() {
        assert!(Table::new(Prime::new(12289).unwrap(), 1 << 14).is_err());
    }
}
