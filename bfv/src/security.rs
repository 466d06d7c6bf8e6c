use std::fmt;

/// Classical security levels, ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    /// No guarantee. Only reachable through an explicit opt-out.
    None,
    Tc128,
    Tc192,
    Tc256,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLevel::None => write!(f, "none"),
            SecurityLevel::Tc128 => write!(f, "128-bit"),
            SecurityLevel::Tc192 => write!(f, "192-bit"),
            SecurityLevel::Tc256 => write!(f, "256-bit"),
        }
    }
}

/// Maps a ring degree to the largest coefficient modulus, in bits, that
/// still achieves a given security level.
pub trait SecurityTable: fmt::Debug + Send + Sync {
    /// Returns None when the table has no entry for (degree, level).
    fn max_bit_count(&self, degree: usize, level: SecurityLevel) -> Option<usize>;

    /// Strongest level whose bound admits a bit_count-bit modulus at degree.
    fn classify(&self, degree: usize, bit_count: usize) -> SecurityLevel {
        [SecurityLevel::Tc256, SecurityLevel::Tc192, SecurityLevel::Tc128]
            .into_iter()
            .find(|level| {
                self.max_bit_count(degree, *level)
                    .is_some_and(|max| bit_count <= max)
            })
            .unwrap_or(SecurityLevel::None)
    }
}

/// HomomorphicEncryption.org standard bounds for ternary secrets and
/// error standard deviation 3.2.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomomorphicEncryptionStandard;

impl SecurityTable for HomomorphicEncryptionStandard {
    fn max_bit_count(&self, degree: usize, level: SecurityLevel) -> Option<usize> {
        let bounds: [usize; 3] = match degree {
            1024 => [27, 19, 14],
            2048 => [54, 37, 29],
            4096 => [109, 75, 58],
            8192 => [218, 152, 118],
            16384 => [438, 305, 237],
            32768 => [881, 611, 476],
            _ => return None,
        };
        match level {
            SecurityLevel::None => None,
            SecurityLevel::Tc128 => Some(bounds[0]),
            SecurityLevel::Tc192 => Some(bounds[1]),
            SecurityLevel::Tc256 => Some(bounds[2]),
        }
    }
}
