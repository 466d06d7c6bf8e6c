use rns::poly::PolyRNS;
use std::fmt;

/// Ternary secret s over Q, in NTT form.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    pub(crate) value: PolyRNS<u64>,
    pub(crate) context_id: u64,
}

impl SecretKey {
    pub fn context_id(&self) -> u64 {
        self.context_id
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("context_id", &self.context_id)
            .finish_non_exhaustive()
    }
}

/// (-(a*s + e), a) over Q, in NTT form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) value: [PolyRNS<u64>; 2],
    pub(crate) context_id: u64,
}

impl PublicKey {
    pub fn context_id(&self) -> u64 {
        self.context_id
    }
}

/// Encryptions under s of a target ring element times the gadget
/// 2^(w*d) * (Q/q_j) * [(Q/q_j)^-1]_{q_j}, for every coefficient modulus
/// q_j and every base-2^w digit d of q_j. Entries are indexed [j][d] and
/// stored in NTT form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySwitchKey {
    pub(crate) b: Vec<Vec<PolyRNS<u64>>>,
    pub(crate) a: Vec<Vec<PolyRNS<u64>>>,
}

impl KeySwitchKey {
    /// Number of digits of the j-th coefficient modulus.
    pub fn digits(&self, j: usize) -> usize {
        self.b[j].len()
    }
}

/// Relinearization keys. Entry k switches s^(k+2) back to s, so that
/// `count()` entries relinearize ciphertexts of size up to `count() + 2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelinKeys {
    pub(crate) keys: Vec<KeySwitchKey>,
    pub(crate) decomposition_bit_count: usize,
    pub(crate) context_id: u64,
}

impl RelinKeys {
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn decomposition_bit_count(&self) -> usize {
        self.decomposition_bit_count
    }

    pub fn context_id(&self) -> u64 {
        self.context_id
    }

    pub fn key(&self, k: usize) -> &KeySwitchKey {
        &self.keys[k]
    }
}
