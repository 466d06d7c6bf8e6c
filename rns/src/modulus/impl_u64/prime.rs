use crate::error::RnsError;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::{NTTFriendlyPrimesGenerator, Prime};
use crate::modulus::ONCE;
use primal_check::miller_rabin as is_prime;

impl Prime<u64> {
    /// Largest supported modulus bit size.
    pub const MAX_BITS: usize = 61;

    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not a prime or does not fit in [`Self::MAX_BITS`] bits.
    pub fn new(q: u64) -> Result<Self, RnsError> {
        if q >> Self::MAX_BITS != 0 {
            return Err(RnsError::ModulusTooLarge {
                q,
                max_bits: Self::MAX_BITS,
            });
        }
        if q <= 2 || !is_prime(q) {
            return Err(RnsError::NotPrime(q));
        }
        Ok(Self::new_unchecked(q))
    }

    /// Returns a new instance of Prime<u64> without primality checks.
    pub fn new_unchecked(q: u64) -> Self {
        assert!(
            q >> Self::MAX_BITS == 0,
            "invalid argument: q={} has more than {} bits",
            q,
            Self::MAX_BITS
        );
        Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            montgomery: MontgomeryPrecomp::new(q),
            barrett: BarrettPrecomp::new(q),
            phi: q - 1,
        }
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns x^-1 mod q. x must be non-zero mod q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> u64 {
        debug_assert!(x % self.q != 0, "inv: x={} is zero mod q={}", x, self.q);
        self.pow(x, self.phi - 1)
    }

    /// Returns true if q = 1 mod nth_root.
    pub fn supports_root(&self, nth_root: u64) -> bool {
        nth_root != 0 && self.phi % nth_root == 0
    }

    /// Returns a primitive nth_root-th root of unity mod q, where nth_root
    /// is a power of two dividing q-1. Candidates g = x^((q-1)/nth_root)
    /// are taken for x = 2, 3, ... until g^(nth_root/2) = -1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> Result<u64, RnsError> {
        if nth_root < 2 || nth_root & (nth_root - 1) != 0 {
            return Err(RnsError::InvalidRootOrder(nth_root));
        }
        if !self.supports_root(nth_root) {
            return Err(RnsError::NotNttFriendly {
                q: self.q,
                nth_root,
            });
        }
        let exponent: u64 = self.phi / nth_root;
        let minus_one: u64 = self.q - 1;
        // Half of all x are quadratic non-residues, which always succeed.
        (2..self.q)
            .map(|x| self.pow(x, exponent))
            .find(|g| self.pow(*g, nth_root >> 1) == minus_one)
            .ok_or(RnsError::NotNttFriendly {
                q: self.q,
                nth_root,
            })
    }
}

/// Returns true if q is a prime and q = 1 mod 2*degree.
pub fn is_ntt_friendly(q: u64, degree: usize) -> bool {
    let nth_root: u64 = (degree as u64) << 1;
    nth_root != 0 && q > 2 && q % nth_root == 1 && is_prime(q)
}

impl NTTFriendlyPrimesGenerator<u64> {
    pub fn new(bit_size: usize, nth_root: u64) -> Result<Self, RnsError> {
        if bit_size < 2 || bit_size > Prime::<u64>::MAX_BITS {
            return Err(RnsError::InvalidBitSize(bit_size));
        }
        if nth_root < 2 || nth_root & (nth_root - 1) != 0 {
            return Err(RnsError::InvalidRootOrder(nth_root));
        }
        let upper_bound: u64 = (1u64 << bit_size) - 1;
        let lower_bound: u64 = 1u64 << (bit_size - 1);
        // Largest k * nth_root + 1 below 2^bit_size.
        let next_candidate: u64 = ((upper_bound - 1) / nth_root) * nth_root + 1;
        Ok(Self {
            bit_size,
            nth_root,
            next_candidate,
            lower_bound,
            exhausted: next_candidate < lower_bound,
        })
    }

    /// Returns the next smaller NTT-friendly prime of the configured bit
    /// size, or None once the range is exhausted.
    pub fn next_downstream_prime(&mut self) -> Option<u64> {
        while !self.exhausted {
            let candidate: u64 = self.next_candidate;
            if candidate < self.lower_bound + self.nth_root {
                self.exhausted = true;
            } else {
                self.next_candidate -= self.nth_root;
            }
            if candidate >= self.lower_bound && candidate > 2 && is_prime(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Returns the `count` largest primes p of exactly `bit_size` bits with
/// p = 1 mod 2*ntt_size, in decreasing order.
pub fn get_primes(bit_size: usize, count: usize, ntt_size: usize) -> Result<Vec<u64>, RnsError> {
    if ntt_size == 0 || ntt_size & (ntt_size - 1) != 0 {
        return Err(RnsError::InvalidDegree(ntt_size));
    }
    let nth_root: u64 = (ntt_size as u64) << 1;
    let mut generator: NTTFriendlyPrimesGenerator<u64> =
        NTTFriendlyPrimesGenerator::new(bit_size, nth_root)?;
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    while primes.len() < count {
        match generator.next_downstream_prime() {
            Some(p) => primes.push(p),
            None => {
                return Err(RnsError::NotEnoughPrimes {
                    bit_size,
                    count,
                    nth_root,
                    found: primes.len(),
                })
            }
        }
    }
    Ok(primes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_validation() {
        assert!(Prime::<u64>::new(12289).is_ok());
        assert_eq!(Prime::<u64>::new(12288), Err(RnsError::NotPrime(12288)));
        assert_eq!(Prime::<u64>::new(2), Err(RnsError::NotPrime(2)));
        assert!(matches!(
            Prime::<u64>::new(u64::MAX),
            Err(RnsError::ModulusTooLarge { .. })
        ));
    }

    #[test]
    fn inverse_and_root() {
        let prime: Prime<u64> = Prime::new(12289).unwrap();
        assert_eq!(prime.pow(prime.inv(1234), 1) * 1234 % 12289, 1);
        let psi: u64 = prime.primitive_nth_root(2048).unwrap();
        assert_eq!(prime.pow(psi, 1024), 12288);
        assert_eq!(prime.pow(psi, 2048), 1);
        assert!(prime.primitive_nth_root(1 << 13).is_err());
        assert!(prime.primitive_nth_root(3).is_err());
    }

    #[test]
    fn get_primes_is_deterministic_and_descending() {
        let a: Vec<u64> = get_primes(36, 3, 4096).unwrap();
        let b: Vec<u64> = get_primes(36, 3, 4096).unwrap();
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0] > w[1]));
        a.iter().for_each(|p| {
            assert_eq!(64 - p.leading_zeros(), 36);
            assert!(is_ntt_friendly(*p, 4096));
        });
    }

    #[test]
    fn get_primes_is_exhaustive() {
        // 14-bit primes congruent to 1 mod 2048: only 12289.
        assert_eq!(get_primes(14, 1, 1024).unwrap(), vec![12289]);
        assert_eq!(
            get_primes(14, 2, 1024),
            Err(RnsError::NotEnoughPrimes {
                bit_size: 14,
                count: 2,
                nth_root: 2048,
                found: 1
            })
        );
        assert!(get_primes(62, 1, 1024).is_err());
        assert!(get_primes(30, 1, 1000).is_err());
    }

    #[test]
    fn largest_small_primes() {
        // 17-bit primes congruent to 1 mod 16, from the top.
        let primes: Vec<u64> = get_primes(17, 4, 8).unwrap();
        let mut want: Vec<u64> = Vec::new();
        let mut c: u64 = (1 << 17) - 1;
        while want.len() < 4 {
            if c % 16 == 1 && (2..c).take_while(|d| d * d <= c).all(|d| c % d != 0) {
                want.push(c);
            }
            c -= 1;
        }
        assert_eq!(primes, want);
    }
}
