use bfv::coeff_modulus::small_mods;
use bfv::{
    Ciphertext, Context, ContextOptions, Decryptor, Encryptor, Evaluator, KeyGenerator,
    ParameterSet, Plaintext, RelinKeys,
};
use sampling::source::Source;
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_send_sync() {
    assert_send_sync::<Context>();
    assert_send_sync::<Evaluator>();
    assert_send_sync::<Ciphertext>();
    assert_send_sync::<RelinKeys>();
    assert_send_sync::<Decryptor>();
    assert_send_sync::<KeyGenerator>();
}

#[test]
fn concurrent_evaluation() {
    let _ = env_logger::builder().is_test(true).try_init();

    let n: usize = 1 << 10;
    let moduli: Vec<u64> = small_mods(50, 3, n).unwrap();
    let params: ParameterSet = ParameterSet::new(n, &moduli, 257).unwrap();
    let ctx: Arc<Context> = Context::with_options(params, ContextOptions::insecure()).unwrap();

    let mut keygen: KeyGenerator = KeyGenerator::with_source(ctx.clone(), Source::new([0u8; 32]));
    let relin_keys: RelinKeys = keygen.relin_keys().unwrap();
    let decryptor: Decryptor = Decryptor::new(ctx.clone(), keygen.secret_key());
    let evaluator: Evaluator = Evaluator::new(ctx.clone());

    let results: Vec<(u64, Plaintext)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let mut encryptor: Encryptor = Encryptor::with_source(
                    ctx.clone(),
                    keygen.public_key(),
                    Source::new([i as u8 + 1; 32]),
                );
                let evaluator: &Evaluator = &evaluator;
                let relin_keys: &RelinKeys = &relin_keys;
                let decryptor: &Decryptor = &decryptor;
                scope.spawn(move || {
                    let a: Ciphertext = encryptor.encrypt(&Plaintext::constant(i + 2)).unwrap();
                    let b: Ciphertext = encryptor.encrypt(&Plaintext::constant(i + 10)).unwrap();
                    let mut c: Ciphertext = evaluator.multiply(&a, &b).unwrap();
                    evaluator.relinearize_inplace(&mut c, relin_keys).unwrap();
                    evaluator.add_inplace(&mut c, &a).unwrap();
                    (i, decryptor.decrypt(&c).unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    results.into_iter().for_each(|(i, pt)| {
        assert_eq!(pt, Plaintext::constant(((i + 2) * (i + 10) + i + 2) % 257));
    });
}

#[test]
fn independent_key_generators() {
    let n: usize = 1 << 10;
    let moduli: Vec<u64> = small_mods(50, 2, n).unwrap();
    let params: ParameterSet = ParameterSet::new(n, &moduli, 257).unwrap();
    let ctx: Arc<Context> = Context::with_options(params, ContextOptions::insecure()).unwrap();

    let public_keys: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let ctx: Arc<Context> = ctx.clone();
                scope.spawn(move || {
                    KeyGenerator::with_source(ctx, Source::new([9u8; 32]))
                        .public_key()
                        .clone()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(public_keys[0], public_keys[1]);
}
