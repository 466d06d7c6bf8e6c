use crate::context::Context;
use crate::error::{Error, Result};
use crate::keys::{KeySwitchKey, PublicKey, RelinKeys, SecretKey};
use log::debug;
use rns::modulus::barrett::Barrett;
use rns::modulus::ONCE;
use rns::poly::PolyRNS;
use rns::ring::RingRNS;
use sampling::source::Source;
use std::sync::Arc;

/// Default base-2 logarithm of the relinearization digit base.
pub const DEFAULT_DECOMPOSITION_BIT_COUNT: usize = 16;

/// Samples a secret key on creation and derives every other key from it.
/// Each generator owns its random source.
pub struct KeyGenerator {
    context: Arc<Context>,
    source: Source,
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyGenerator {
    /// Generator drawing from a source seeded by the operating system.
    pub fn new(context: Arc<Context>) -> Self {
        Self::with_source(context, Source::from_entropy())
    }

    pub fn with_source(context: Arc<Context>, mut source: Source) -> Self {
        let ring: &RingRNS<u64> = &context.ring_q;
        let mut s: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_ternary(&mut source, &mut s);
        ring.ntt_inplace::<false>(&mut s);

        let public_key: PublicKey = PublicKey {
            value: encrypt_zero(&context, &mut source, &s),
            context_id: context.id,
        };
        let secret_key: SecretKey = SecretKey {
            value: s,
            context_id: context.id,
        };
        debug!("context {}: generated secret and public keys", context.id);

        Self {
            context,
            source,
            secret_key,
            public_key,
        }
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// One relinearization key with the default digit size, enough to bring
    /// a product of two fresh ciphertexts back to size 2.
    pub fn relin_keys(&mut self) -> Result<RelinKeys> {
        self.relin_keys_with(1, DEFAULT_DECOMPOSITION_BIT_COUNT)
    }

    /// `count` relinearization keys, entry k switching s^(k+2) to s, with
    /// digits of `decomposition_bit_count` bits.
    pub fn relin_keys_with(&mut self, count: usize, decomposition_bit_count: usize) -> Result<RelinKeys> {
        if count == 0 {
            return Err(Error::InvalidParameter(
                "relinearization key count must be at least 1".to_string(),
            ));
        }
        if !(1..=60).contains(&decomposition_bit_count) {
            return Err(Error::InvalidParameter(format!(
                "decomposition bit count {} is not in [1, 60]",
                decomposition_bit_count
            )));
        }

        let context: &Context = &self.context;
        let ring: &RingRNS<u64> = &context.ring_q;
        let s: &PolyRNS<u64> = &self.secret_key.value;
        let w: usize = decomposition_bit_count;

        let digits: Vec<usize> = ring
            .moduli()
            .iter()
            .map(|q| (u64::BITS - q.leading_zeros()) as usize)
            .map(|bits| bits.div_ceil(w))
            .collect();

        let mut power: PolyRNS<u64> = s.clone();
        let mut scaled: PolyRNS<u64> = ring.new_polyrns();
        let mut keys: Vec<KeySwitchKey> = Vec::with_capacity(count);
        for _ in 0..count {
            ring.a_mul_b_into_b(s, &mut power);

            let mut b: Vec<Vec<PolyRNS<u64>>> = Vec::with_capacity(digits.len());
            let mut a: Vec<Vec<PolyRNS<u64>>> = Vec::with_capacity(digits.len());
            for (j, ring_j) in ring.0.iter().enumerate() {
                let mut b_j: Vec<PolyRNS<u64>> = Vec::with_capacity(digits[j]);
                let mut a_j: Vec<PolyRNS<u64>> = Vec::with_capacity(digits[j]);
                for d in 0..digits[j] {
                    let [mut b_jd, a_jd] = encrypt_zero(context, &mut self.source, s);
                    // The gadget is 2^(w*d) mod q_j and zero mod every other prime.
                    let q: u64 = ring_j.modulus.q;
                    let factor: Barrett<u64> = ring_j.modulus.barrett.prepare((1u64 << (w * d)) % q);
                    ring_j.a_mul_b_scalar_barrett_into_c::<ONCE>(power.at(j), &factor, scaled.at_mut(j));
                    ring_j.a_add_b_into_b::<ONCE>(scaled.at(j), b_jd.at_mut(j));
                    b_j.push(b_jd);
                    a_j.push(a_jd);
                }
                b.push(b_j);
                a.push(a_j);
            }
            keys.push(KeySwitchKey { b, a });
        }

        debug!(
            "context {}: generated {} relinearization key(s), w={}, digits per modulus={:?}",
            context.id, count, w, digits
        );

        Ok(RelinKeys {
            keys,
            decomposition_bit_count: w,
            context_id: context.id,
        })
    }
}

/// Returns (-(a*s) - e, a) in NTT form, with a uniform and e drawn from
/// the context error distribution.
fn encrypt_zero(context: &Context, source: &mut Source, s: &PolyRNS<u64>) -> [PolyRNS<u64>; 2] {
    let ring: &RingRNS<u64> = &context.ring_q;
    let mut a: PolyRNS<u64> = ring.new_polyrns();
    ring.fill_uniform(source, &mut a);

    let mut e: PolyRNS<u64> = ring.new_polyrns();
    ring.fill_dist_i64(source, &context.noise, &mut e);
    ring.ntt_inplace::<false>(&mut e);

    let mut b: PolyRNS<u64> = ring.new_polyrns();
    ring.a_mul_b_into_c(&a, s, &mut b);
    ring.a_add_b_into_b::<ONCE>(&e, &mut b);
    ring.a_neg_into_a::<ONCE>(&mut b);
    [b, a]
}
