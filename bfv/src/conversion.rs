//! Conversions between the plaintext space, Q and the extended basis QP.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::plaintext::Plaintext;
use itertools::izip;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rns::modulus::barrett::Barrett;
use rns::modulus::prime::Prime;
use rns::modulus::{ScalarOperations, ONCE};
use rns::num_bigint::{rem_u64, Div};
use rns::poly::PolyRNS;

impl Context {
    /// Fails unless pt fits the ring degree and is reduced modulo t.
    pub(crate) fn check_plaintext(&self, pt: &Plaintext) -> Result<()> {
        let n: usize = self.ring_degree();
        let t: u64 = self.plain_modulus();
        if pt.len() > n {
            return Err(Error::PlaintextTooLarge(format!(
                "{} coefficients for ring degree {}",
                pt.len(),
                n
            )));
        }
        if let Some(m) = pt.coeffs().iter().find(|m| **m >= t) {
            return Err(Error::PlaintextTooLarge(format!(
                "coefficient {} is not reduced modulo {}",
                m, t
            )));
        }
        Ok(())
    }

    /// Adds (or subtracts when SUB) round(Q*m/t) into a, given in
    /// coefficient form over Q. The scaled value is Delta*m plus
    /// floor(((Q mod t)*m + floor(t/2))/t).
    pub(crate) fn add_scaled_plain<const SUB: bool>(&self, pt: &Plaintext, a: &mut PolyRNS<u64>) {
        let t: u128 = self.plain_modulus() as u128;
        let q_mod_t: u128 = self.q_mod_t as u128;
        let correction: Vec<u64> = pt
            .coeffs()
            .iter()
            .map(|m| ((q_mod_t * *m as u128 + (t >> 1)) / t) as u64)
            .collect();
        self.ring_q.0.iter().enumerate().for_each(|(i, ring)| {
            let prime: &Prime<u64> = &ring.modulus;
            let delta: Barrett<u64> = self.delta[i];
            let a_i: &mut [u64] = &mut a.at_mut(i).0;
            izip!(pt.coeffs().iter(), correction.iter(), a_i.iter_mut()).for_each(|(m, r, a)| {
                let mut v: u64 = prime.barrett.mul_external::<ONCE>(delta, *m % prime.q);
                prime.sa_add_sb_into_sb::<ONCE>(&(*r % prime.q), &mut v);
                if SUB {
                    prime.sa_sub_sb_into_sa::<ONCE>(&v, a);
                } else {
                    prime.sa_add_sb_into_sb::<ONCE>(&v, a);
                }
            });
        });
    }

    /// Centered representatives of the plaintext coefficients:
    /// m >= ceil(t/2) maps to m - t.
    pub(crate) fn centered_plain(&self, pt: &Plaintext) -> Vec<i64> {
        let t: u64 = self.plain_modulus();
        let half: u64 = t.div_ceil(2);
        pt.coeffs()
            .iter()
            .map(|m| {
                if *m >= half {
                    -((t - m) as i64)
                } else {
                    *m as i64
                }
            })
            .collect()
    }

    /// Lifts a, over Q, to b, over QP, coefficient by coefficient through
    /// the representative in (-Q/2, Q/2].
    pub(crate) fn lift_centered(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        let level_q: usize = self.ring_q.level();
        let aux: Vec<u64> = self.aux_moduli();
        (0..=level_q).for_each(|i| b.at_mut(i).copy_from(a.at(i)));
        let mut residues: Vec<u64> = vec![0; level_q + 1];
        (0..self.ring_degree()).for_each(|j| {
            residues
                .iter_mut()
                .enumerate()
                .for_each(|(i, r)| *r = a.0[i].0[j]);
            let u: BigUint = self.crt_q.reconstruct(&residues);
            let negative: bool = &u > self.crt_q.half_product();
            aux.iter().enumerate().for_each(|(k, p)| {
                let mut r: u64 = rem_u64(&u, *p);
                if negative {
                    // u - Q mod p
                    r = if r >= self.q_mod_aux[k] {
                        r - self.q_mod_aux[k]
                    } else {
                        r + p - self.q_mod_aux[k]
                    };
                }
                b.0[level_q + 1 + k].0[j] = r;
            });
        });
    }

    /// Writes into b, over Q, round(t*x/Q) for every centered coefficient
    /// x of a, over QP. Ties round away from zero.
    pub(crate) fn scale_down(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        let t: BigInt = BigInt::from(self.plain_modulus());
        let q: BigInt = BigInt::from(self.crt_q.product().clone());
        let mut residues_qp: Vec<u64> = vec![0; self.ring_qp.level() + 1];
        let mut residues_q: Vec<u64> = vec![0; self.ring_q.level() + 1];
        (0..self.ring_degree()).for_each(|j| {
            residues_qp
                .iter_mut()
                .enumerate()
                .for_each(|(i, r)| *r = a.0[i].0[j]);
            let x: BigInt = self.crt_qp.reconstruct_signed(&residues_qp);
            self.crt_q.decompose_signed(&(x * &t).div_round(&q), &mut residues_q);
            residues_q
                .iter()
                .enumerate()
                .for_each(|(i, r)| b.0[i].0[j] = *r);
        });
    }

    /// Recovers m = round(t*x/Q) mod t from x over Q in coefficient form.
    pub(crate) fn decode(&self, x: &PolyRNS<u64>) -> Plaintext {
        let t: u64 = self.plain_modulus();
        let q: &BigUint = self.crt_q.product();
        let mut residues: Vec<u64> = vec![0; self.ring_q.level() + 1];
        let coeffs: Vec<u64> = (0..self.ring_degree())
            .map(|j| {
                residues
                    .iter_mut()
                    .enumerate()
                    .for_each(|(i, r)| *r = x.0[i].0[j]);
                let (mag, negative) = self.crt_q.reconstruct_centered(&residues);
                let m: u64 = rem_u64(&(mag * t).div_round(q), t);
                if negative && m != 0 {
                    t - m
                } else {
                    m
                }
            })
            .collect();
        Plaintext::new(coeffs)
    }

    /// Bits left before x over Q, in coefficient form, stops decoding
    /// correctly: bits(Q) - bits(||[t*x]_Q||) - 1, clamped at zero.
    pub(crate) fn noise_budget(&self, x: &PolyRNS<u64>) -> u32 {
        let t: u64 = self.plain_modulus();
        let mut residues: Vec<u64> = vec![0; self.ring_q.level() + 1];
        let mut max: BigUint = BigUint::zero();
        (0..self.ring_degree()).for_each(|j| {
            self.ring_q.0.iter().enumerate().for_each(|(i, ring)| {
                let prime: &Prime<u64> = &ring.modulus;
                residues[i] = prime.barrett.mul(x.0[i].0[j], t % prime.q);
            });
            let (mag, _) = self.crt_q.reconstruct_centered(&residues);
            if mag > max {
                max = mag;
            }
        });
        let budget: i64 = self.crt_q.bit_count() as i64 - max.bits() as i64 - 1;
        budget.max(0) as u32
    }
}
