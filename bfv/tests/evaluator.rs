use bfv::coeff_modulus::small_mods;
use bfv::{
    Ciphertext, Context, ContextOptions, Decryptor, Encryptor, Error, Evaluator, KeyGenerator,
    ParameterSet, Plaintext, RelinKeys, MAX_CIPHERTEXT_SIZE,
};
use sampling::source::Source;
use std::sync::Arc;

struct Harness {
    ctx: Arc<Context>,
    keygen: KeyGenerator,
    encryptor: Encryptor,
    decryptor: Decryptor,
    evaluator: Evaluator,
    relin_keys: RelinKeys,
}

impl Harness {
    fn new(n: usize, t: u64) -> Self {
        let moduli: Vec<u64> = small_mods(50, 3, n).unwrap();
        let params: ParameterSet = ParameterSet::new(n, &moduli, t).unwrap();
        let ctx: Arc<Context> = Context::with_options(params, ContextOptions::insecure()).unwrap();
        let mut keygen: KeyGenerator = KeyGenerator::with_source(ctx.clone(), Source::new([0u8; 32]));
        let relin_keys: RelinKeys = keygen.relin_keys_with(3, 16).unwrap();
        let encryptor: Encryptor =
            Encryptor::with_source(ctx.clone(), keygen.public_key(), Source::new([1u8; 32]));
        let decryptor: Decryptor = Decryptor::new(ctx.clone(), keygen.secret_key());
        let evaluator: Evaluator = Evaluator::new(ctx.clone());
        Self {
            ctx,
            keygen,
            encryptor,
            decryptor,
            evaluator,
            relin_keys,
        }
    }

    fn encrypt(&mut self, pt: &Plaintext) -> Ciphertext {
        self.encryptor.encrypt(pt).unwrap()
    }

    fn decrypt(&self, ct: &Ciphertext) -> Plaintext {
        assert!(self.budget(ct) > 0, "noise budget exhausted");
        self.decryptor.decrypt(ct).unwrap()
    }

    fn budget(&self, ct: &Ciphertext) -> u32 {
        self.decryptor.invariant_noise_budget(ct).unwrap()
    }
}

/// Negacyclic product of two plaintexts modulo t.
fn mul_plain(a: &Plaintext, b: &Plaintext, n: usize, t: u64) -> Plaintext {
    let mut c: Vec<u64> = vec![0; n];
    a.coeffs().iter().enumerate().for_each(|(i, x)| {
        b.coeffs().iter().enumerate().for_each(|(j, y)| {
            let p: u64 = x * y % t;
            let k: usize = (i + j) % n;
            c[k] = if i + j < n { (c[k] + p) % t } else { (c[k] + t - p) % t };
        })
    });
    Plaintext::new(c)
}

fn add_plain(a: &Plaintext, b: &Plaintext, t: u64) -> Plaintext {
    let len: usize = a.len().max(b.len());
    Plaintext::new((0..len).map(|i| (a.coeff(i) + b.coeff(i)) % t).collect())
}

fn neg_plain(a: &Plaintext, t: u64) -> Plaintext {
    Plaintext::new(a.coeffs().iter().map(|x| (t - x) % t).collect())
}

#[test]
fn evaluator_u64() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut h: Harness = Harness::new(1 << 10, 257);

    sub_test("test_add_sub_negate", || test_add_sub_negate(&mut h));
    sub_test("test_plain_operations", || test_plain_operations(&mut h));
    sub_test("test_multiply", || test_multiply(&mut h));
    sub_test("test_square", || test_square(&mut h));
    sub_test("test_size_laws", || test_size_laws(&mut h));
    sub_test("test_noise_monotonicity", || test_noise_monotonicity(&mut h));
    sub_test("test_context_mismatch", || test_context_mismatch(&mut h));
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn test_add_sub_negate(h: &mut Harness) {
    let t: u64 = h.ctx.plain_modulus();
    let a: Plaintext = Plaintext::new(vec![1, 2, 256, 7]);
    let b: Plaintext = Plaintext::new(vec![255, 3]);
    let ct_a: Ciphertext = h.encrypt(&a);
    let ct_b: Ciphertext = h.encrypt(&b);

    let sum: Ciphertext = h.evaluator.add(&ct_a, &ct_b).unwrap();
    assert_eq!(h.decrypt(&sum), add_plain(&a, &b, t));

    let diff: Ciphertext = h.evaluator.sub(&ct_a, &ct_b).unwrap();
    assert_eq!(h.decrypt(&diff), add_plain(&a, &neg_plain(&b, t), t));

    let neg: Ciphertext = h.evaluator.negate(&ct_a).unwrap();
    assert_eq!(h.decrypt(&neg), neg_plain(&a, t));

    let mut zero: Ciphertext = ct_a.clone();
    h.evaluator.add_inplace(&mut zero, &neg).unwrap();
    assert_eq!(h.decrypt(&zero), Plaintext::zero());
}

fn test_plain_operations(h: &mut Harness) {
    let n: usize = h.ctx.ring_degree();
    let t: u64 = h.ctx.plain_modulus();
    let a: Plaintext = Plaintext::new(vec![5, 0, 250]);
    let b: Plaintext = Plaintext::new(vec![3, 200, 0, 1]);
    let ct_a: Ciphertext = h.encrypt(&a);

    let ct: Ciphertext = h.evaluator.add_plain(&ct_a, &b).unwrap();
    assert_eq!(ct.size(), 2);
    assert_eq!(h.decrypt(&ct), add_plain(&a, &b, t));

    let mut ct: Ciphertext = ct_a.clone();
    h.evaluator.sub_plain_inplace(&mut ct, &b).unwrap();
    assert_eq!(h.decrypt(&ct), add_plain(&a, &neg_plain(&b, t), t));

    let ct: Ciphertext = h.evaluator.multiply_plain(&ct_a, &b).unwrap();
    assert_eq!(ct.size(), 2);
    assert_eq!(h.decrypt(&ct), mul_plain(&a, &b, n, t));

    // X^(n-1) * X = -1
    let mut x_top: Vec<u64> = vec![0; n];
    x_top[n - 1] = 1;
    let ct: Ciphertext = h.encrypt(&Plaintext::new(x_top));
    let ct: Ciphertext = h.evaluator.multiply_plain(&ct, &Plaintext::new(vec![0, 1])).unwrap();
    assert_eq!(h.decrypt(&ct), Plaintext::constant(t - 1));

    assert!(matches!(
        h.evaluator.add_plain(&ct_a, &Plaintext::constant(t)),
        Err(Error::PlaintextTooLarge(_))
    ));
    assert!(matches!(
        h.evaluator.multiply_plain(&ct_a, &Plaintext::new(vec![1; n + 1])),
        Err(Error::PlaintextTooLarge(_))
    ));
}

fn test_multiply(h: &mut Harness) {
    let n: usize = h.ctx.ring_degree();
    let t: u64 = h.ctx.plain_modulus();
    let a: Plaintext = Plaintext::new(vec![3, 1, 0, 256]);
    let b: Plaintext = Plaintext::new(vec![100, 0, 7]);
    let ct_a: Ciphertext = h.encrypt(&a);
    let ct_b: Ciphertext = h.encrypt(&b);

    let ct: Ciphertext = h.evaluator.multiply(&ct_a, &ct_b).unwrap();
    assert_eq!(ct.size(), 3);
    assert_eq!(h.decrypt(&ct), mul_plain(&a, &b, n, t));

    let relin: Ciphertext = h.evaluator.relinearize(&ct, &h.relin_keys).unwrap();
    assert_eq!(relin.size(), 2);
    assert_eq!(h.decrypt(&relin), mul_plain(&a, &b, n, t));

    let mut ct: Ciphertext = ct_a.clone();
    h.evaluator.multiply_inplace(&mut ct, &ct_b).unwrap();
    h.evaluator.relinearize_inplace(&mut ct, &h.relin_keys).unwrap();
    assert_eq!(h.decrypt(&ct), mul_plain(&a, &b, n, t));

    // Scalars.
    let ct_20: Ciphertext = h.encrypt(&Plaintext::constant(20));
    let ct_30: Ciphertext = h.encrypt(&Plaintext::constant(30));
    let ct: Ciphertext = h.evaluator.multiply(&ct_20, &ct_30).unwrap();
    assert_eq!(h.decrypt(&ct), Plaintext::constant(600 % t));
}

fn test_square(h: &mut Harness) {
    let n: usize = h.ctx.ring_degree();
    let t: u64 = h.ctx.plain_modulus();
    let a: Plaintext = Plaintext::new(vec![9, 0, 1, 200]);
    let ct_a: Ciphertext = h.encrypt(&a);

    let sq: Ciphertext = h.evaluator.square(&ct_a).unwrap();
    assert_eq!(sq.size(), 3);
    assert_eq!(h.decrypt(&sq), mul_plain(&a, &a, n, t));

    // A size-3 square has size 5 and needs three relinearization keys.
    let sq2: Ciphertext = h.evaluator.square(&sq).unwrap();
    assert_eq!(sq2.size(), 5);
    let aa: Plaintext = mul_plain(&a, &a, n, t);
    assert_eq!(h.decrypt(&sq2), mul_plain(&aa, &aa, n, t));
    let relin: Ciphertext = h.evaluator.relinearize(&sq2, &h.relin_keys).unwrap();
    assert_eq!(relin.size(), 2);
    assert_eq!(h.decrypt(&relin), mul_plain(&aa, &aa, n, t));

    let mut sq_inplace: Ciphertext = ct_a.clone();
    h.evaluator.square_inplace(&mut sq_inplace).unwrap();
    let product: Ciphertext = h.evaluator.multiply(&ct_a, &ct_a).unwrap();
    assert_eq!(h.decrypt(&sq_inplace), h.decrypt(&product));
}

fn test_size_laws(h: &mut Harness) {
    let one: Ciphertext = h.encrypt(&Plaintext::constant(1));
    let sq: Ciphertext = h.evaluator.square(&one).unwrap();
    let five: Ciphertext = h.evaluator.square(&sq).unwrap();
    assert_eq!(h.evaluator.multiply(&sq, &one).unwrap().size(), 4);
    assert_eq!(h.evaluator.add(&one, &five).unwrap().size(), 5);
    assert_eq!(h.evaluator.sub(&five, &one).unwrap().size(), 5);

    // Three keys relinearize up to size 5, two keys only up to size 4.
    let four: Ciphertext = h.evaluator.multiply(&sq, &one).unwrap();
    assert_eq!(h.evaluator.relinearize(&four, &h.relin_keys).unwrap().size(), 2);
    assert_eq!(h.evaluator.relinearize(&five, &h.relin_keys).unwrap().size(), 2);
    let two_keys: RelinKeys = h.keygen.relin_keys_with(2, 16).unwrap();
    assert_eq!(h.evaluator.relinearize(&four, &two_keys).unwrap().size(), 2);
    assert_eq!(
        h.evaluator.relinearize(&five, &two_keys).unwrap_err(),
        Error::InsufficientRelinKeys {
            required: 3,
            available: 2
        }
    );
    let one_key: RelinKeys = h.keygen.relin_keys().unwrap();
    assert_eq!(
        h.evaluator.relinearize(&four, &one_key).unwrap_err(),
        Error::InsufficientRelinKeys {
            required: 2,
            available: 1
        }
    );
    assert_eq!(h.evaluator.relinearize(&one, &one_key).unwrap(), one);

    // 9 * 9 - 1 = 17 components.
    let mut nine: Ciphertext = five.clone();
    (0..4).for_each(|_| h.evaluator.multiply_inplace(&mut nine, &one).unwrap());
    assert_eq!(nine.size(), 9);
    assert_eq!(
        h.evaluator.square(&nine).unwrap_err(),
        Error::CiphertextTooLarge {
            size: 17,
            max: MAX_CIPHERTEXT_SIZE
        }
    );
}

fn test_noise_monotonicity(h: &mut Harness) {
    let a: Ciphertext = h.encrypt(&Plaintext::constant(3));
    let b: Ciphertext = h.encrypt(&Plaintext::constant(4));
    let fresh: u32 = h.budget(&a).min(h.budget(&b));

    let sum: u32 = h.budget(&h.evaluator.add(&a, &b).unwrap());
    assert!(sum + 2 >= fresh);
    let plain: u32 = h.budget(&h.evaluator.add_plain(&a, &Plaintext::constant(5)).unwrap());
    assert!(plain + 2 >= h.budget(&a));

    let product: Ciphertext = h.evaluator.multiply(&a, &b).unwrap();
    let after_mul: u32 = h.budget(&product);
    assert!(after_mul + 10 < fresh);

    let relin: u32 = h.budget(&h.evaluator.relinearize(&product, &h.relin_keys).unwrap());
    assert!(relin + 2 >= after_mul);
}

fn test_context_mismatch(h: &mut Harness) {
    let other: Arc<Context> =
        Context::with_options(h.ctx.params().clone(), ContextOptions::insecure()).unwrap();
    let mut other_keygen: KeyGenerator = KeyGenerator::with_source(other.clone(), Source::new([0u8; 32]));
    let mut other_encryptor: Encryptor =
        Encryptor::with_source(other.clone(), other_keygen.public_key(), Source::new([0u8; 32]));
    let foreign: Ciphertext = other_encryptor.encrypt(&Plaintext::constant(1)).unwrap();
    let local: Ciphertext = h.encrypt(&Plaintext::constant(1));

    assert_eq!(h.evaluator.add(&local, &foreign).unwrap_err(), Error::ContextMismatch);
    assert_eq!(h.evaluator.multiply(&foreign, &local).unwrap_err(), Error::ContextMismatch);
    assert_eq!(h.evaluator.square(&foreign).unwrap_err(), Error::ContextMismatch);
    assert_eq!(
        h.evaluator.add_plain(&foreign, &Plaintext::constant(1)).unwrap_err(),
        Error::ContextMismatch
    );

    let product: Ciphertext = h.evaluator.multiply(&local, &local).unwrap();
    let foreign_keys: RelinKeys = other_keygen.relin_keys().unwrap();
    assert_eq!(
        h.evaluator.relinearize(&product, &foreign_keys).unwrap_err(),
        Error::ContextMismatch
    );
}
