use crate::error::{Error, Result};
use num_bigint::BigUint;
use rns::modulus::is_ntt_friendly;

/// Default standard deviation of the error distribution.
pub const NOISE_STANDARD_DEVIATION: f64 = 3.2;

/// Largest number of primes in a coefficient modulus.
pub const MAX_COEFF_MODULI: usize = 64;

const MAX_PRIME_BITS: u32 = 61;

/// Validated BFV parameters. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    ring_degree: usize,
    coeff_moduli: Vec<u64>,
    plain_modulus: u64,
    noise_standard_deviation: f64,
    noise_max_deviation: f64,
}

impl ParameterSet {
    /// Parameters with the default error distribution.
    pub fn new(ring_degree: usize, coeff_moduli: &[u64], plain_modulus: u64) -> Result<Self> {
        Self::builder()
            .ring_degree(ring_degree)
            .coeff_moduli(coeff_moduli)
            .plain_modulus(plain_modulus)
            .build()
    }

    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    pub fn ring_degree(&self) -> usize {
        self.ring_degree
    }

    pub fn coeff_moduli(&self) -> &[u64] {
        &self.coeff_moduli
    }

    pub fn plain_modulus(&self) -> u64 {
        self.plain_modulus
    }

    pub fn noise_standard_deviation(&self) -> f64 {
        self.noise_standard_deviation
    }

    pub fn noise_max_deviation(&self) -> f64 {
        self.noise_max_deviation
    }

    /// Q, the product of the coefficient moduli.
    pub fn coeff_modulus(&self) -> BigUint {
        self.coeff_moduli
            .iter()
            .fold(BigUint::from(1u64), |acc, q| acc * *q)
    }

    /// Bit length of Q.
    pub fn coeff_modulus_bit_count(&self) -> usize {
        self.coeff_modulus().bits() as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParameterSetBuilder {
    ring_degree: Option<usize>,
    coeff_moduli: Vec<u64>,
    plain_modulus: Option<u64>,
    noise_standard_deviation: Option<f64>,
    noise_max_deviation: Option<f64>,
}

impl ParameterSetBuilder {
    pub fn ring_degree(mut self, ring_degree: usize) -> Self {
        self.ring_degree = Some(ring_degree);
        self
    }

    pub fn coeff_moduli(mut self, coeff_moduli: &[u64]) -> Self {
        self.coeff_moduli = coeff_moduli.to_vec();
        self
    }

    pub fn plain_modulus(mut self, plain_modulus: u64) -> Self {
        self.plain_modulus = Some(plain_modulus);
        self
    }

    /// Defaults to [`NOISE_STANDARD_DEVIATION`].
    pub fn noise_standard_deviation(mut self, sigma: f64) -> Self {
        self.noise_standard_deviation = Some(sigma);
        self
    }

    /// Samples of larger magnitude are rejected. Defaults to six standard
    /// deviations.
    pub fn noise_max_deviation(mut self, bound: f64) -> Self {
        self.noise_max_deviation = Some(bound);
        self
    }

    pub fn build(self) -> Result<ParameterSet> {
        let ring_degree: usize = self
            .ring_degree
            .ok_or_else(|| invalid("ring degree is not set"))?;
        if ring_degree < 2 || !ring_degree.is_power_of_two() {
            return Err(invalid(format!(
                "ring degree {} is not a power of two >= 2",
                ring_degree
            )));
        }
        let nth_root: usize = ring_degree
            .checked_mul(2)
            .ok_or_else(|| invalid(format!("ring degree {} is too large", ring_degree)))?;

        let moduli: Vec<u64> = self.coeff_moduli;
        if moduli.is_empty() {
            return Err(invalid("coefficient moduli are empty"));
        }
        if moduli.len() > MAX_COEFF_MODULI {
            return Err(invalid(format!(
                "{} coefficient moduli, at most {} are supported",
                moduli.len(),
                MAX_COEFF_MODULI
            )));
        }
        for (i, &q) in moduli.iter().enumerate() {
            if q >> MAX_PRIME_BITS != 0 {
                return Err(invalid(format!(
                    "coefficient modulus {} has more than {} bits",
                    q, MAX_PRIME_BITS
                )));
            }
            if moduli[..i].contains(&q) {
                return Err(invalid(format!("coefficient modulus {} is repeated", q)));
            }
            if !is_ntt_friendly(q, ring_degree) {
                return Err(invalid(format!(
                    "coefficient modulus {} is not a prime congruent to 1 mod {}",
                    q, nth_root
                )));
            }
        }

        let plain_modulus: u64 = self
            .plain_modulus
            .ok_or_else(|| invalid("plain modulus is not set"))?;
        let min_q: u64 = moduli.iter().copied().min().unwrap_or(0);
        if plain_modulus < 2 || plain_modulus >= min_q {
            return Err(invalid(format!(
                "plain modulus {} is not in [2, {})",
                plain_modulus, min_q
            )));
        }

        let sigma: f64 = self
            .noise_standard_deviation
            .unwrap_or(NOISE_STANDARD_DEVIATION);
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(invalid(format!("noise standard deviation {} is not positive", sigma)));
        }
        let bound: f64 = self.noise_max_deviation.unwrap_or(6.0 * sigma);
        if !bound.is_finite() || bound < sigma {
            return Err(invalid(format!(
                "noise max deviation {} is below the standard deviation {}",
                bound, sigma
            )));
        }

        Ok(ParameterSet {
            ring_degree,
            coeff_moduli: moduli,
            plain_modulus,
            noise_standard_deviation: sigma,
            noise_max_deviation: bound,
        })
    }
}

fn invalid<S: Into<String>>(msg: S) -> Error {
    Error::InvalidParameter(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_parameters() {
        let params: ParameterSet = ParameterSet::new(1024, &[12289], 256).unwrap();
        assert_eq!(params.ring_degree(), 1024);
        assert_eq!(params.coeff_moduli(), &[12289]);
        assert_eq!(params.coeff_modulus_bit_count(), 14);
        assert_eq!(params.noise_standard_deviation(), 3.2);
        assert!((params.noise_max_deviation() - 19.2).abs() < 1e-9);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let cases: [Result<ParameterSet>; 9] = [
            ParameterSet::new(1000, &[12289], 256),
            ParameterSet::new(1usize << (usize::BITS - 1), &[12289], 17),
            ParameterSet::new(1, &[12289], 256),
            ParameterSet::new(1024, &[], 256),
            ParameterSet::new(1024, &[12289, 12289], 256),
            ParameterSet::new(1024, &[12288], 256),
            ParameterSet::new(4096, &[12289], 256),
            ParameterSet::new(1024, &[12289], 1),
            ParameterSet::new(1024, &[12289], 12289),
        ];
        cases.into_iter().for_each(|r| {
            assert!(matches!(r, Err(Error::InvalidParameter(_))), "{:?}", r)
        });
    }

    #[test]
    fn builder_noise() {
        let params: ParameterSet = ParameterSet::builder()
            .ring_degree(16)
            .coeff_moduli(&[12289])
            .plain_modulus(17)
            .noise_standard_deviation(2.0)
            .build()
            .unwrap();
        assert_eq!(params.noise_max_deviation(), 12.0);
        assert!(ParameterSet::builder()
            .ring_degree(16)
            .coeff_moduli(&[12289])
            .plain_modulus(17)
            .noise_standard_deviation(2.0)
            .noise_max_deviation(1.0)
            .build()
            .is_err());
        assert!(ParameterSet::builder().coeff_moduli(&[12289]).plain_modulus(17).build().is_err());
    }
}
