use crate::error::RnsError;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::ONCE;
use crate::num_bigint::rem_u64;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Chinese remainder reconstruction over a basis of distinct primes.
#[derive(Debug, Clone)]
pub struct CrtBasis {
    primes: Vec<Prime<u64>>,
    product: BigUint,
    half_product: BigUint,
    /// Q / q_i.
    punctured: Vec<BigUint>,
    /// (Q / q_i)^-1 mod q_i.
    punctured_inv: Vec<Barrett<u64>>,
}

impl CrtBasis {
    pub fn new(moduli: &[u64]) -> Result<Self, RnsError> {
        if moduli.is_empty() {
            return Err(RnsError::EmptyBasis);
        }
        let mut primes: Vec<Prime<u64>> = Vec::with_capacity(moduli.len());
        for &q in moduli {
            if primes.iter().any(|p| p.q == q) {
                return Err(RnsError::DuplicateModulus(q));
            }
            primes.push(Prime::new(q)?);
        }

        let product: BigUint = moduli
            .iter()
            .fold(BigUint::from(1u64), |acc, q| acc * *q);
        let half_product: BigUint = &product >> 1;

        let punctured: Vec<BigUint> = moduli.iter().map(|q| &product / *q).collect();
        let punctured_inv: Vec<Barrett<u64>> = primes
            .iter()
            .zip(punctured.iter())
            .map(|(p, qi)| p.barrett.prepare(p.inv(rem_u64(qi, p.q))))
            .collect();

        Ok(Self {
            primes,
            product,
            half_product,
            punctured,
            punctured_inv,
        })
    }

    pub fn moduli(&self) -> Vec<u64> {
        self.primes.iter().map(|p| p.q).collect()
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn product(&self) -> &BigUint {
        &self.product
    }

    pub fn half_product(&self) -> &BigUint {
        &self.half_product
    }

    /// Bit length of the product.
    pub fn bit_count(&self) -> usize {
        self.product.bits() as usize
    }

    /// Returns the unique x in [0, Q) with x = residues[i] mod q_i.
    pub fn reconstruct(&self, residues: &[u64]) -> BigUint {
        debug_assert_eq!(residues.len(), self.primes.len());
        let x: BigUint = self
            .primes
            .iter()
            .zip(residues.iter())
            .zip(self.punctured_inv.iter().zip(self.punctured.iter()))
            .fold(BigUint::zero(), |acc, ((p, r), (inv, qi))| {
                acc + qi * p.barrett.mul_external::<ONCE>(*inv, *r)
            });
        x % &self.product
    }

    /// Returns (|x|, x < 0) for the representative x of the residues in
    /// (-Q/2, Q/2].
    pub fn reconstruct_centered(&self, residues: &[u64]) -> (BigUint, bool) {
        let x: BigUint = self.reconstruct(residues);
        if x > self.half_product {
            (&self.product - x, true)
        } else {
            (x, false)
        }
    }

    pub fn reconstruct_signed(&self, residues: &[u64]) -> BigInt {
        let (mag, negative) = self.reconstruct_centered(residues);
        if negative {
            BigInt::from_biguint(Sign::Minus, mag)
        } else {
            BigInt::from_biguint(Sign::Plus, mag)
        }
    }

    pub fn decompose(&self, x: &BigUint, residues: &mut [u64]) {
        debug_assert_eq!(residues.len(), self.primes.len());
        self.primes
            .iter()
            .zip(residues.iter_mut())
            .for_each(|(p, r)| *r = rem_u64(x, p.q));
    }

    /// Writes x mod q_i, for a possibly negative x.
    pub fn decompose_signed(&self, x: &BigInt, residues: &mut [u64]) {
        debug_assert_eq!(residues.len(), self.primes.len());
        let negative: bool = x.sign() == Sign::Minus;
        let mag: &BigUint = x.magnitude();
        self.primes.iter().zip(residues.iter_mut()).for_each(|(p, r)| {
            let m: u64 = rem_u64(mag, p.q);
            *r = if negative && m != 0 { p.q - m } else { m };
        });
    }
}
