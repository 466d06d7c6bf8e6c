pub mod barrett;
pub mod impl_u64;
pub mod montgomery;
pub mod prime;

pub use impl_u64::prime::{get_primes, is_ntt_friendly};

pub type REDUCEMOD = u8;

pub const NONE: REDUCEMOD = 0;
pub const ONCE: REDUCEMOD = 1;
pub const TWICE: REDUCEMOD = 2;
pub const FOURTIMES: REDUCEMOD = 3;
pub const BARRETT: REDUCEMOD = 4;
pub const BARRETTLAZY: REDUCEMOD = 5;

pub trait WordOps<O> {
    fn log2(self) -> usize;
    fn reverse_bits_msb(self, n: u32) -> O;
    fn mask(self) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> usize {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        self.reverse_bits() >> (u64::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> u64 {
        (1 << self.log2()) - 1
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        self.reverse_bits() >> (usize::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> usize {
        (1 << self.log2()) - 1
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q in constant time.
    /// User must ensure that 2q fits in O.
    fn reduce_once_constant_time_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self in constant time.
    /// User must ensure that 2q fits in O.
    fn reduce_once_constant_time(&self, q: O) -> O;
    /// Assigns self-q to self if self >= q.
    /// User must ensure that 2q fits in O.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
}

/// Word-level arithmetic modulo a prime. Unless stated otherwise, inputs
/// are expected in [0, q) and REDUCE selects the range of the output.
pub trait ScalarOperations<O> {
    // Applies a parameterized modular reduction.
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut O);

    // Assigns a + b to c.
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &O, b: &O, c: &mut O);

    // Assigns a + b to b.
    fn sa_add_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &O, b: &mut O);

    // Assigns a - b to c.
    fn sa_sub_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &O, b: &O, c: &mut O);

    // Assigns a - b to a.
    fn sa_sub_sb_into_sa<const REDUCE: REDUCEMOD>(&self, b: &O, a: &mut O);

    // Assigns -a to a.
    fn sa_neg_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut O);

    // Assigns -a to b.
    fn sa_neg_into_sb<const REDUCE: REDUCEMOD>(&self, a: &O, b: &mut O);

    // Assigns a * b to c.
    fn sa_mul_sb_into_sc(&self, a: &O, b: &O, c: &mut O);

    // Assigns a * b to b.
    fn sa_mul_sb_into_sb(&self, a: &O, b: &mut O);

    // Assigns c + a * b to c.
    fn sa_mul_sb_add_sc_into_sc(&self, a: &O, b: &O, c: &mut O);

    // Assigns a * b to c.
    fn sa_barrett_mul_sb_into_sc<const REDUCE: REDUCEMOD>(
        &self,
        a: &barrett::Barrett<O>,
        b: &O,
        c: &mut O,
    );

    // Assigns a * b to b.
    fn sa_barrett_mul_sb_into_sb<const REDUCE: REDUCEMOD>(
        &self,
        a: &barrett::Barrett<O>,
        b: &mut O,
    );
}

pub trait VectorOperations<O> {
    // Applies a parameterized modular reduction.
    fn va_reduce_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [O]);

    // ADD
    // Assigns a[i] + b[i] to c[i].
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[O],
        b: &[O],
        c: &mut [O],
    );

    // Assigns a[i] + b[i] to b[i].
    fn va_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &mut [O]);

    // SUB
    // Assigns a[i] - b[i] to c[i].
    fn va_sub_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[O],
        b: &[O],
        c: &mut [O],
    );

    // Assigns a[i] - b[i] to a[i].
    fn va_sub_vb_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, b: &[O], a: &mut [O]);

    // NEG
    // Assigns -a[i] to a[i].
    fn va_neg_into_va<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &mut [O]);

    // Assigns -a[i] to b[i].
    fn va_neg_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[O], b: &mut [O]);

    // MUL
    // Assigns a[i] * b[i] to c[i].
    fn va_mul_vb_into_vc<const CHUNK: usize>(&self, a: &[O], b: &[O], c: &mut [O]);

    // Assigns a[i] * b[i] to b[i].
    fn va_mul_vb_into_vb<const CHUNK: usize>(&self, a: &[O], b: &mut [O]);

    // Assigns c[i] + a[i] * b[i] to c[i].
    fn va_mul_vb_add_vc_into_vc<const CHUNK: usize>(&self, a: &[O], b: &[O], c: &mut [O]);

    // Assigns a * b[i] to b[i].
    fn sa_barrett_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &barrett::Barrett<O>,
        b: &mut [O],
    );

    // Assigns a * b[i] to c[i].
    fn sa_barrett_mul_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &barrett::Barrett<O>,
        b: &[O],
        c: &mut [O],
    );
}
