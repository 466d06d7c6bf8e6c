//! Leveled BFV encryption over the RNS ring Z_Q[X]/(X^n + 1).
//!
//! A [`ParameterSet`] is validated into a shared [`Context`], from which a
//! [`KeyGenerator`] derives the key material used by [`Encryptor`],
//! [`Decryptor`] and [`Evaluator`].

pub mod ciphertext;
pub mod coeff_modulus;
pub mod context;
pub mod conversion;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod evaluator;
pub mod keygen;
pub mod keys;
pub mod params;
pub mod plaintext;
pub mod security;

pub use ciphertext::Ciphertext;
pub use context::{Context, ContextOptions};
pub use decryptor::Decryptor;
pub use encryptor::Encryptor;
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use keygen::KeyGenerator;
pub use keys::{KeySwitchKey, PublicKey, RelinKeys, SecretKey};
pub use params::{ParameterSet, ParameterSetBuilder};
pub use plaintext::Plaintext;
pub use security::{HomomorphicEncryptionStandard, SecurityLevel, SecurityTable};

/// Largest ciphertext size the evaluator produces.
pub const MAX_CIPHERTEXT_SIZE: usize = 16;
