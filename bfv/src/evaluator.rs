use crate::ciphertext::Ciphertext;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::keys::{KeySwitchKey, RelinKeys};
use crate::plaintext::Plaintext;
use crate::MAX_CIPHERTEXT_SIZE;
use log::trace;
use rns::modulus::barrett::Barrett;
use rns::modulus::ONCE;
use rns::poly::PolyRNS;
use rns::ring::RingRNS;
use std::sync::Arc;

/// Homomorphic operations on ciphertexts of one context. Holds no state
/// besides the shared context, so a single evaluator can be used from
/// several threads at once.
#[derive(Clone, Debug)]
pub struct Evaluator {
    context: Arc<Context>,
}

impl Evaluator {
    pub fn new(context: Arc<Context>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    fn check(&self, ct: &Ciphertext) -> Result<()> {
        self.context.check(ct.context_id)
    }

    fn check_size(size: usize) -> Result<()> {
        if size > MAX_CIPHERTEXT_SIZE {
            return Err(Error::CiphertextTooLarge {
                size,
                max: MAX_CIPHERTEXT_SIZE,
            });
        }
        Ok(())
    }
}

impl Evaluator {
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.add_inplace(&mut c, b)?;
        Ok(c)
    }

    /// a += b. The shorter operand is padded with zero components.
    pub fn add_inplace(&self, a: &mut Ciphertext, b: &Ciphertext) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        let ring: &RingRNS<u64> = &self.context.ring_q;
        if b.size() > a.size() {
            a.polys.resize(b.size(), ring.new_polyrns());
        }
        a.polys
            .iter_mut()
            .zip(b.polys.iter())
            .for_each(|(a, b)| ring.a_add_b_into_b::<ONCE>(b, a));
        trace!("add: size={}", a.size());
        Ok(())
    }

    pub fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.sub_inplace(&mut c, b)?;
        Ok(c)
    }

    /// a -= b. The shorter operand is padded with zero components.
    pub fn sub_inplace(&self, a: &mut Ciphertext, b: &Ciphertext) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        let ring: &RingRNS<u64> = &self.context.ring_q;
        if b.size() > a.size() {
            a.polys.resize(b.size(), ring.new_polyrns());
        }
        a.polys
            .iter_mut()
            .zip(b.polys.iter())
            .for_each(|(a, b)| ring.a_sub_b_into_a::<ONCE>(b, a));
        trace!("sub: size={}", a.size());
        Ok(())
    }

    pub fn negate(&self, a: &Ciphertext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.negate_inplace(&mut c)?;
        Ok(c)
    }

    pub fn negate_inplace(&self, a: &mut Ciphertext) -> Result<()> {
        self.check(a)?;
        let ring: &RingRNS<u64> = &self.context.ring_q;
        a.polys
            .iter_mut()
            .for_each(|a| ring.a_neg_into_a::<ONCE>(a));
        trace!("negate: size={}", a.size());
        Ok(())
    }
}

impl Evaluator {
    pub fn add_plain(&self, a: &Ciphertext, pt: &Plaintext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.add_plain_inplace(&mut c, pt)?;
        Ok(c)
    }

    /// Adds the scaled plaintext to the first component.
    pub fn add_plain_inplace(&self, a: &mut Ciphertext, pt: &Plaintext) -> Result<()> {
        self.check(a)?;
        self.context.check_plaintext(pt)?;
        self.context.add_scaled_plain::<false>(pt, &mut a.polys[0]);
        trace!("add_plain: size={}", a.size());
        Ok(())
    }

    pub fn sub_plain(&self, a: &Ciphertext, pt: &Plaintext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.sub_plain_inplace(&mut c, pt)?;
        Ok(c)
    }

    pub fn sub_plain_inplace(&self, a: &mut Ciphertext, pt: &Plaintext) -> Result<()> {
        self.check(a)?;
        self.context.check_plaintext(pt)?;
        self.context.add_scaled_plain::<true>(pt, &mut a.polys[0]);
        trace!("sub_plain: size={}", a.size());
        Ok(())
    }

    pub fn multiply_plain(&self, a: &Ciphertext, pt: &Plaintext) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.multiply_plain_inplace(&mut c, pt)?;
        Ok(c)
    }

    /// Multiplies every component by the plaintext, taken with coefficients
    /// in (-t/2, t/2].
    pub fn multiply_plain_inplace(&self, a: &mut Ciphertext, pt: &Plaintext) -> Result<()> {
        self.check(a)?;
        self.context.check_plaintext(pt)?;
        let ring: &RingRNS<u64> = &self.context.ring_q;
        let mut m: PolyRNS<u64> = ring.new_polyrns();
        ring.from_i64(&self.context.centered_plain(pt), &mut m);
        ring.ntt_inplace::<false>(&mut m);
        a.polys.iter_mut().for_each(|c| {
            ring.ntt_inplace::<false>(c);
            ring.a_mul_b_into_b(&m, c);
            ring.intt_inplace::<false>(c);
        });
        trace!("multiply_plain: size={}", a.size());
        Ok(())
    }
}

impl Evaluator {
    pub fn multiply(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.check(a)?;
        self.check(b)?;
        let size: usize = a.size() + b.size() - 1;
        Self::check_size(size)?;

        let a_qp: Vec<PolyRNS<u64>> = self.lift_ntt(a);
        let b_qp: Vec<PolyRNS<u64>> = self.lift_ntt(b);
        let ring_qp: &RingRNS<u64> = &self.context.ring_qp;
        let mut tensor: Vec<PolyRNS<u64>> = (0..size).map(|_| ring_qp.new_polyrns()).collect();
        a_qp.iter().enumerate().for_each(|(i, a_i)| {
            b_qp.iter().enumerate().for_each(|(j, b_j)| {
                ring_qp.a_mul_b_add_c_into_c(a_i, b_j, &mut tensor[i + j]);
            })
        });

        let c: Ciphertext = self.rescale(tensor);
        trace!("multiply: {} x {} -> {}", a.size(), b.size(), c.size());
        Ok(c)
    }

    pub fn multiply_inplace(&self, a: &mut Ciphertext, b: &Ciphertext) -> Result<()> {
        *a = self.multiply(a, b)?;
        Ok(())
    }

    /// Same as `multiply(a, a)`, computing each cross product a_i*a_j once.
    pub fn square(&self, a: &Ciphertext) -> Result<Ciphertext> {
        self.check(a)?;
        let size: usize = 2 * a.size() - 1;
        Self::check_size(size)?;

        let a_qp: Vec<PolyRNS<u64>> = self.lift_ntt(a);
        let ring_qp: &RingRNS<u64> = &self.context.ring_qp;
        let mut tensor: Vec<PolyRNS<u64>> = (0..size).map(|_| ring_qp.new_polyrns()).collect();
        for i in 0..a_qp.len() {
            for j in i + 1..a_qp.len() {
                ring_qp.a_mul_b_add_c_into_c(&a_qp[i], &a_qp[j], &mut tensor[i + j]);
            }
        }
        let two: Vec<Barrett<u64>> = ring_qp
            .0
            .iter()
            .map(|r| r.modulus.barrett.prepare(2))
            .collect();
        tensor
            .iter_mut()
            .for_each(|t| ring_qp.a_mul_b_scalar_barrett_into_a::<ONCE>(&two, t));
        a_qp.iter()
            .enumerate()
            .for_each(|(i, a_i)| ring_qp.a_mul_b_add_c_into_c(a_i, a_i, &mut tensor[2 * i]));

        let c: Ciphertext = self.rescale(tensor);
        trace!("square: {} -> {}", a.size(), c.size());
        Ok(c)
    }

    pub fn square_inplace(&self, a: &mut Ciphertext) -> Result<()> {
        *a = self.square(a)?;
        Ok(())
    }

    /// Components of a lifted to QP with centered representatives, in NTT form.
    fn lift_ntt(&self, a: &Ciphertext) -> Vec<PolyRNS<u64>> {
        let ring_qp: &RingRNS<u64> = &self.context.ring_qp;
        a.polys
            .iter()
            .map(|c| {
                let mut c_qp: PolyRNS<u64> = ring_qp.new_polyrns();
                self.context.lift_centered(c, &mut c_qp);
                ring_qp.ntt_inplace::<false>(&mut c_qp);
                c_qp
            })
            .collect()
    }

    /// Maps tensor components over QP, in NTT form, to round(t*x/Q) over Q.
    fn rescale(&self, mut tensor: Vec<PolyRNS<u64>>) -> Ciphertext {
        let ring_q: &RingRNS<u64> = &self.context.ring_q;
        let ring_qp: &RingRNS<u64> = &self.context.ring_qp;
        let polys: Vec<PolyRNS<u64>> = tensor
            .iter_mut()
            .map(|t| {
                ring_qp.intt_inplace::<false>(t);
                let mut c: PolyRNS<u64> = ring_q.new_polyrns();
                self.context.scale_down(t, &mut c);
                c
            })
            .collect();
        Ciphertext {
            polys,
            context_id: self.context.id,
        }
    }
}

impl Evaluator {
    pub fn relinearize(&self, a: &Ciphertext, rlk: &RelinKeys) -> Result<Ciphertext> {
        let mut c: Ciphertext = a.clone();
        self.relinearize_inplace(&mut c, rlk)?;
        Ok(c)
    }

    /// Brings a back to size 2. Component j >= 2 is switched with key
    /// entry j - 2, so `a.size() - 2` entries are needed.
    pub fn relinearize_inplace(&self, a: &mut Ciphertext, rlk: &RelinKeys) -> Result<()> {
        self.check(a)?;
        self.context.check(rlk.context_id)?;
        let size: usize = a.size();
        if size <= 2 {
            return Ok(());
        }
        if size - 2 > rlk.count() {
            return Err(Error::InsufficientRelinKeys {
                required: size - 2,
                available: rlk.count(),
            });
        }

        let ring: &RingRNS<u64> = &self.context.ring_q;
        let mut acc: [PolyRNS<u64>; 2] = [ring.new_polyrns(), ring.new_polyrns()];
        let mut digit: PolyRNS<u64> = ring.new_polyrns();
        for j in (2..size).rev() {
            self.key_switch(
                &a.polys[j],
                rlk.key(j - 2),
                rlk.decomposition_bit_count,
                &mut digit,
                &mut acc,
            );
        }
        a.polys.truncate(2);
        a.polys.iter_mut().zip(acc.iter_mut()).for_each(|(c, acc)| {
            ring.intt_inplace::<false>(acc);
            ring.a_add_b_into_b::<ONCE>(acc, c);
        });
        trace!("relinearize: {} -> 2", size);
        Ok(())
    }

    /// Accumulates into acc, in NTT form, the key switch of c: the sum over
    /// moduli q_i and digits d of digit_{i,d}(c) * key[i][d].
    fn key_switch(
        &self,
        c: &PolyRNS<u64>,
        key: &KeySwitchKey,
        log_base: usize,
        digit: &mut PolyRNS<u64>,
        acc: &mut [PolyRNS<u64>; 2],
    ) {
        let ring: &RingRNS<u64> = &self.context.ring_q;
        for i in 0..=ring.level() {
            for d in 0..key.digits(i) {
                ring.a_ith_digit_unsigned_base_scalar_b_into_c(d, c.at(i), &log_base, digit);
                ring.ntt_inplace::<false>(digit);
                ring.a_mul_b_add_c_into_c(digit, &key.b[i][d], &mut acc[0]);
                ring.a_mul_b_add_c_into_c(digit, &key.a[i][d], &mut acc[1]);
            }
        }
    }
}
