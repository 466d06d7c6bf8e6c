use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::security::{HomomorphicEncryptionStandard, SecurityLevel, SecurityTable};
use log::{debug, warn};
use num_bigint::BigUint;
use rns::crt::CrtBasis;
use rns::modulus::barrett::Barrett;
use rns::modulus::is_ntt_friendly;
use rns::modulus::prime::NTTFriendlyPrimesGenerator;
use rns::num_bigint::rem_u64;
use rns::ring::RingRNS;
use sampling::distributions::ClippedNormal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Largest ring degree for which transform tables are built.
pub const MAX_RING_DEGREE: usize = 1 << 17;

/// Bit size of the auxiliary primes used by ciphertext multiplication.
pub const AUX_PRIME_BITS: usize = 60;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Options applied when a [`Context`] is created.
#[derive(Clone, Debug)]
pub struct ContextOptions {
    /// Parameters classified below this level are rejected.
    /// [`SecurityLevel::None`] disables the check.
    pub min_security_level: SecurityLevel,
    pub security_table: Arc<dyn SecurityTable>,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            min_security_level: SecurityLevel::Tc128,
            security_table: Arc::new(HomomorphicEncryptionStandard),
        }
    }
}

impl ContextOptions {
    /// Accepts parameters regardless of their security level.
    pub fn insecure() -> Self {
        Self {
            min_security_level: SecurityLevel::None,
            ..Self::default()
        }
    }
}

/// Precomputed, read-only state shared by every component working with one
/// parameter set.
///
/// Each context has a process-unique identity. Keys and ciphertexts record
/// the identity of the context that produced them, and two contexts built
/// from equal parameters are not interchangeable.
#[derive(Debug)]
pub struct Context {
    pub(crate) id: u64,
    pub(crate) params: ParameterSet,
    pub(crate) security_level: SecurityLevel,
    /// Ring over the coefficient moduli Q.
    pub(crate) ring_q: RingRNS<u64>,
    /// Ring over Q followed by the auxiliary moduli P.
    pub(crate) ring_qp: RingRNS<u64>,
    pub(crate) crt_q: CrtBasis,
    pub(crate) crt_qp: CrtBasis,
    /// Q mod p_k for every auxiliary prime.
    pub(crate) q_mod_aux: Vec<u64>,
    /// floor(Q/t) mod q_i.
    pub(crate) delta: Vec<Barrett<u64>>,
    pub(crate) q_mod_t: u64,
    pub(crate) noise: ClippedNormal,
}

impl Context {
    /// Validates the parameters against the default options: at least
    /// 128-bit security under the HomomorphicEncryption.org table.
    pub fn create(params: ParameterSet) -> Result<Arc<Context>> {
        Self::with_options(params, ContextOptions::default())
    }

    pub fn with_options(params: ParameterSet, options: ContextOptions) -> Result<Arc<Context>> {
        let n: usize = params.ring_degree();
        if n > MAX_RING_DEGREE {
            return Err(Error::InvalidParameter(format!(
                "ring degree {} exceeds the maximum of {}",
                n, MAX_RING_DEGREE
            )));
        }
        if let Some(q) = params
            .coeff_moduli()
            .iter()
            .find(|q| !is_ntt_friendly(**q, n))
        {
            return Err(Error::InvalidParameter(format!(
                "coefficient modulus {} does not support a negacyclic transform of size {}",
                q, n
            )));
        }

        let bit_count: usize = params.coeff_modulus_bit_count();
        let security_level: SecurityLevel = options.security_table.classify(n, bit_count);
        if security_level < options.min_security_level {
            return Err(Error::InsecureParameters {
                ring_degree: n,
                bit_count,
            });
        }
        if security_level == SecurityLevel::None {
            warn!(
                "security check disabled: n={} with a {}-bit coefficient modulus offers no standard security level",
                n, bit_count
            );
        }

        let ring_q: RingRNS<u64> = RingRNS::new(n, params.coeff_moduli())?;
        let aux: Vec<u64> = aux_moduli(n, bit_count, params.coeff_moduli())?;
        let ring_qp: RingRNS<u64> = ring_q.extend(n, &aux)?;
        let crt_q: CrtBasis = CrtBasis::new(params.coeff_moduli())?;
        let crt_qp: CrtBasis = CrtBasis::new(&ring_qp.moduli())?;

        let q: &BigUint = crt_q.product();
        let t: u64 = params.plain_modulus();
        let delta_big: BigUint = q / t;
        let delta: Vec<Barrett<u64>> = ring_q
            .0
            .iter()
            .map(|r| r.modulus.barrett.prepare(rem_u64(&delta_big, r.modulus.q)))
            .collect();
        let q_mod_t: u64 = rem_u64(q, t);
        let q_mod_aux: Vec<u64> = aux.iter().map(|p| rem_u64(q, *p)).collect();

        let noise: ClippedNormal = ClippedNormal::new(
            params.noise_standard_deviation(),
            params.noise_max_deviation(),
        )
        .ok_or_else(|| Error::InvalidParameter("invalid noise distribution".to_string()))?;

        let id: u64 = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!(
            "context {}: n={} log2(Q)={} moduli={:?} t={} aux={:?} security={}",
            id,
            n,
            bit_count,
            params.coeff_moduli(),
            t,
            aux,
            security_level
        );

        Ok(Arc::new(Context {
            id,
            params,
            security_level,
            ring_q,
            ring_qp,
            crt_q,
            crt_qp,
            q_mod_aux,
            delta,
            q_mod_t,
            noise,
        }))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security_level
    }

    pub fn ring_degree(&self) -> usize {
        self.params.ring_degree()
    }

    pub fn plain_modulus(&self) -> u64 {
        self.params.plain_modulus()
    }

    pub fn coeff_modulus_bit_count(&self) -> usize {
        self.crt_q.bit_count()
    }

    /// Auxiliary moduli used during multiplication.
    pub fn aux_moduli(&self) -> Vec<u64> {
        self.ring_qp.moduli()[self.ring_q.level() + 1..].to_vec()
    }

    pub(crate) fn check(&self, context_id: u64) -> Result<()> {
        if context_id != self.id {
            return Err(Error::ContextMismatch);
        }
        Ok(())
    }
}

/// Auxiliary NTT-friendly primes, disjoint from `moduli`, whose product P
/// exceeds 2^(bit_count + log2(n) + 5). Tensor products of centered
/// ciphertexts of size up to 16 are then exact modulo QP.
fn aux_moduli(n: usize, bit_count: usize, moduli: &[u64]) -> Result<Vec<u64>> {
    let target_bits: usize = bit_count + n.trailing_zeros() as usize + 5;
    // Every prime contributes at least AUX_PRIME_BITS - 1 bits.
    let count: usize = target_bits / (AUX_PRIME_BITS - 1) + 1;
    let mut generator: NTTFriendlyPrimesGenerator<u64> =
        NTTFriendlyPrimesGenerator::new(AUX_PRIME_BITS, 2 * n as u64)?;
    let mut aux: Vec<u64> = Vec::with_capacity(count);
    while aux.len() < count {
        match generator.next_downstream_prime() {
            Some(p) if !moduli.contains(&p) => aux.push(p),
            Some(_) => {}
            None => {
                return Err(Error::InvalidParameter(format!(
                    "not enough {}-bit auxiliary primes for degree {}",
                    AUX_PRIME_BITS, n
                )))
            }
        }
    }
    Ok(aux)
}
