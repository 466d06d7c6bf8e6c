use rns::poly::PolyRNS;

/// Sequence of `size() >= 2` ring elements over Q in coefficient form,
/// tagged with the identity of the context that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) polys: Vec<PolyRNS<u64>>,
    pub(crate) context_id: u64,
}

impl Ciphertext {
    pub fn size(&self) -> usize {
        self.polys.len()
    }

    pub fn context_id(&self) -> u64 {
        self.context_id
    }

    /// Component i, one residue polynomial per coefficient modulus.
    pub fn at(&self, i: usize) -> &PolyRNS<u64> {
        &self.polys[i]
    }
}
