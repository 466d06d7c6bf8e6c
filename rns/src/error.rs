use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RnsError {
    #[error("{0} is not a prime")]
    NotPrime(u64),
    #[error("modulus {q} does not fit in {max_bits} bits")]
    ModulusTooLarge { q: u64, max_bits: usize },
    #[error("modulus {q} is not congruent to 1 mod {nth_root}")]
    NotNttFriendly { q: u64, nth_root: u64 },
    #[error("invalid ring degree {0}: expected a power of two >= 2")]
    InvalidDegree(usize),
    #[error("invalid root order {0}: expected a power of two >= 2")]
    InvalidRootOrder(u64),
    #[error("modulus {0} appears more than once")]
    DuplicateModulus(u64),
    #[error("moduli cannot be empty")]
    EmptyBasis,
    #[error("invalid prime bit size {0}")]
    InvalidBitSize(usize),
    #[error("found {found} of {count} requested {bit_size}-bit primes congruent to 1 mod {nth_root}")]
    NotEnoughPrimes {
        bit_size: usize,
        count: usize,
        nth_root: u64,
        found: usize,
    },
}
