use crate::ciphertext::Ciphertext;
use crate::context::Context;
use crate::error::Result;
use crate::keys::PublicKey;
use crate::plaintext::Plaintext;
use rns::modulus::ONCE;
use rns::poly::PolyRNS;
use rns::ring::RingRNS;
use sampling::source::Source;
use std::sync::Arc;

/// Public-key encryption. Each encryptor owns its random source.
pub struct Encryptor {
    context: Arc<Context>,
    public_key: PublicKey,
    source: Source,
}

impl Encryptor {
    pub fn new(context: Arc<Context>, public_key: &PublicKey) -> Self {
        Self::with_source(context, public_key, Source::from_entropy())
    }

    pub fn with_source(context: Arc<Context>, public_key: &PublicKey, source: Source) -> Self {
        Self {
            context,
            public_key: public_key.clone(),
            source,
        }
    }

    /// Returns (pk0*u + e1 + round(Q*m/t), pk1*u + e2) for a fresh ternary u
    /// and fresh errors e1, e2.
    pub fn encrypt(&mut self, pt: &Plaintext) -> Result<Ciphertext> {
        let context: &Context = &self.context;
        context.check(self.public_key.context_id)?;
        context.check_plaintext(pt)?;

        let ring: &RingRNS<u64> = &context.ring_q;
        let mut u: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_ternary(&mut self.source, &mut u);
        ring.ntt_inplace::<false>(&mut u);

        let mut e: PolyRNS<u64> = ring.new_polyrns();
        let polys: Vec<PolyRNS<u64>> = self
            .public_key
            .value
            .iter()
            .map(|pk| {
                let mut c: PolyRNS<u64> = ring.new_polyrns();
                ring.a_mul_b_into_c(pk, &u, &mut c);
                ring.intt_inplace::<false>(&mut c);
                ring.fill_dist_i64(&mut self.source, &context.noise, &mut e);
                ring.a_add_b_into_b::<ONCE>(&e, &mut c);
                c
            })
            .collect();

        let mut ct: Ciphertext = Ciphertext {
            polys,
            context_id: context.id,
        };
        context.add_scaled_plain::<false>(pt, &mut ct.polys[0]);
        Ok(ct)
    }
}
