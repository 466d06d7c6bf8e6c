use rns::RnsError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("insecure parameters: {bit_count}-bit coefficient modulus at ring degree {ring_degree}")]
    InsecureParameters { ring_degree: usize, bit_count: usize },

    #[error("operands were produced under different contexts")]
    ContextMismatch,

    #[error("plaintext too large: {0}")]
    PlaintextTooLarge(String),

    #[error("ciphertext size {size} exceeds the maximum of {max}")]
    CiphertextTooLarge { size: usize, max: usize },

    #[error("relinearization needs {required} key(s), {available} available")]
    InsufficientRelinKeys { required: usize, available: usize },
}

impl From<RnsError> for Error {
    fn from(e: RnsError) -> Self {
        Error::InvalidParameter(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
