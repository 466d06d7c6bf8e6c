/// Polynomial with coefficients modulo the plain modulus, lowest degree
/// first. Trailing zero coefficients are dropped, so two plaintexts are
/// equal exactly when they encode the same polynomial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plaintext {
    coeffs: Vec<u64>,
}

impl Plaintext {
    pub fn new(mut coeffs: Vec<u64>) -> Self {
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Coefficient of X^i, zero past the stored length.
    pub fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Number of stored coefficients, i.e. degree + 1 for a non-zero plaintext.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl From<u64> for Plaintext {
    fn from(value: u64) -> Self {
        Plaintext::constant(value)
    }
}
