use crate::ciphertext::Ciphertext;
use crate::context::Context;
use crate::error::Result;
use crate::keys::SecretKey;
use crate::plaintext::Plaintext;
use rns::modulus::ONCE;
use rns::poly::PolyRNS;
use rns::ring::RingRNS;
use std::sync::Arc;

pub struct Decryptor {
    context: Arc<Context>,
    secret_key: SecretKey,
}

impl Decryptor {
    pub fn new(context: Arc<Context>, secret_key: &SecretKey) -> Self {
        Self {
            context,
            secret_key: secret_key.clone(),
        }
    }

    /// Returns round(t*x/Q) mod t for x = c0 + c1*s + ... + c_{k-1}*s^(k-1).
    /// Once the noise budget is exhausted the result is arbitrary.
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        let x: PolyRNS<u64> = self.phase(ct)?;
        Ok(self.context.decode(&x))
    }

    /// Bits of noise the ciphertext can still absorb before decryption
    /// becomes incorrect. Zero means the plaintext can no longer be trusted.
    pub fn invariant_noise_budget(&self, ct: &Ciphertext) -> Result<u32> {
        let x: PolyRNS<u64> = self.phase(ct)?;
        Ok(self.context.noise_budget(&x))
    }

    /// Sum of c_i*s^i in coefficient form, evaluated by Horner's rule.
    fn phase(&self, ct: &Ciphertext) -> Result<PolyRNS<u64>> {
        let context: &Context = &self.context;
        context.check(self.secret_key.context_id)?;
        context.check(ct.context_id)?;

        let ring: &RingRNS<u64> = &context.ring_q;
        let s: &PolyRNS<u64> = &self.secret_key.value;
        let mut acc: PolyRNS<u64> = ring.new_polyrns();
        let mut c_ntt: PolyRNS<u64> = ring.new_polyrns();
        for (i, c) in ct.polys.iter().enumerate().rev() {
            if i + 1 < ct.size() {
                ring.a_mul_b_into_b(s, &mut acc);
            }
            ring.ntt::<false>(c, &mut c_ntt);
            ring.a_add_b_into_b::<ONCE>(&c_ntt, &mut acc);
        }
        ring.intt_inplace::<false>(&mut acc);
        Ok(acc)
    }
}
