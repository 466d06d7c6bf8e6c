use bfv::coeff_modulus::bfv_default;
use bfv::{
    Ciphertext, Context, Encryptor, Evaluator, KeyGenerator, ParameterSet, Plaintext, RelinKeys,
    SecurityLevel,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sampling::source::Source;
use std::sync::Arc;

struct Setup {
    evaluator: Evaluator,
    relin_keys: RelinKeys,
    a: Ciphertext,
    b: Ciphertext,
}

fn setup(n: usize) -> Setup {
    let moduli: Vec<u64> = bfv_default(n, SecurityLevel::Tc128).unwrap();
    let params: ParameterSet = ParameterSet::new(n, &moduli, 256).unwrap();
    let context: Arc<Context> = Context::create(params).unwrap();
    let mut keygen: KeyGenerator = KeyGenerator::with_source(context.clone(), Source::new([0u8; 32]));
    let relin_keys: RelinKeys = keygen.relin_keys().unwrap();
    let mut encryptor: Encryptor =
        Encryptor::with_source(context.clone(), keygen.public_key(), Source::new([1u8; 32]));
    let a: Ciphertext = encryptor.encrypt(&Plaintext::constant(3)).unwrap();
    let b: Ciphertext = encryptor.encrypt(&Plaintext::constant(5)).unwrap();
    Setup {
        evaluator: Evaluator::new(context),
        relin_keys,
        a,
        b,
    }
}

fn multiply(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("multiply");
    b.sample_size(10);
    for log_n in 12..15 {
        let s: Setup = setup(1 << log_n);
        let id: BenchmarkId = BenchmarkId::new("ct_x_ct", format!("n={}", 1 << log_n));
        b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| s.evaluator.multiply(&s.a, &s.b).unwrap())
        });
        let id: BenchmarkId = BenchmarkId::new("square", format!("n={}", 1 << log_n));
        b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| s.evaluator.square(&s.a).unwrap())
        });
    }
}

fn relinearize(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("relinearize");
    b.sample_size(10);
    for log_n in 12..15 {
        let s: Setup = setup(1 << log_n);
        let product: Ciphertext = s.evaluator.multiply(&s.a, &s.b).unwrap();
        let id: BenchmarkId = BenchmarkId::new("size=3", format!("n={}", 1 << log_n));
        b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| s.evaluator.relinearize(&product, &s.relin_keys).unwrap())
        });
    }
}

criterion_group!(benches, multiply, relinearize);
criterion_main!(benches);
