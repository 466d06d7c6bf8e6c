//! Default coefficient moduli.

use crate::error::{Error, Result};
use crate::security::{HomomorphicEncryptionStandard, SecurityLevel, SecurityTable};
use rns::modulus::get_primes;

/// Number of primes the default modulus is split into, per security level.
fn prime_count(degree: usize, level: SecurityLevel) -> Option<usize> {
    let counts: [usize; 3] = match degree {
        1024 | 2048 => [1, 1, 1],
        4096 => [3, 3, 3],
        8192 => [5, 4, 3],
        16384 => [9, 6, 5],
        32768 => [16, 11, 9],
        _ => return None,
    };
    match level {
        SecurityLevel::None => None,
        SecurityLevel::Tc128 => Some(counts[0]),
        SecurityLevel::Tc192 => Some(counts[1]),
        SecurityLevel::Tc256 => Some(counts[2]),
    }
}

/// Default coefficient moduli for `degree` at `level`, using the
/// HomomorphicEncryption.org bounds.
pub fn bfv_default(degree: usize, level: SecurityLevel) -> Result<Vec<u64>> {
    bfv_default_with(&HomomorphicEncryptionStandard, degree, level)
}

/// Default coefficient moduli sized against the given table. The largest
/// admissible bit count is split as evenly as possible, leftover bits going
/// to the last primes.
pub fn bfv_default_with(
    table: &dyn SecurityTable,
    degree: usize,
    level: SecurityLevel,
) -> Result<Vec<u64>> {
    let (total, count) = table
        .max_bit_count(degree, level)
        .zip(prime_count(degree, level))
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "no default coefficient modulus for degree {} at {} security",
                degree, level
            ))
        })?;
    let base: usize = total / count;
    let extra: usize = total % count;
    let mut moduli: Vec<u64> = get_primes(base, count - extra, degree)?;
    if extra > 0 {
        moduli.extend(get_primes(base + 1, extra, degree)?);
    }
    Ok(moduli)
}

/// The `count` largest `bit_size`-bit primes congruent to 1 mod 2*degree.
pub fn small_mods(bit_size: usize, count: usize, degree: usize) -> Result<Vec<u64>> {
    Ok(get_primes(bit_size, count, degree)?)
}
