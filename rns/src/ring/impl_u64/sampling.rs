use crate::modulus::WordOps;
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};
use rand_distr::Distribution;
use sampling::distributions::Ternary;
use sampling::source::Source;

impl Ring<u64> {
    pub fn fill_uniform(&self, source: &mut Source, a: &mut Poly<u64>) {
        let max: u64 = self.modulus.q;
        let mask: u64 = max.mask();
        a.0.iter_mut()
            .for_each(|a| *a = source.next_u64n(max, mask));
    }
}

impl RingRNS<u64> {
    /// Samples every residue independently, i.e. a uniform element of Z_Q[X]/(X^n+1).
    pub fn fill_uniform(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, r)| r.fill_uniform(source, a.at_mut(i)));
    }

    /// Samples n integers from dist and writes them into every residue of a.
    pub fn fill_dist_i64<D: Distribution<i64>>(&self, source: &mut Source, dist: &D, a: &mut PolyRNS<u64>) {
        let coeffs: Vec<i64> = (0..self.n()).map(|_| dist.sample(source)).collect();
        self.from_i64(&coeffs, a);
    }

    pub fn fill_ternary(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.fill_dist_i64(source, &Ternary, a);
    }
}
