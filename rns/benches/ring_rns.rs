use criterion::{criterion_group, criterion_main, Criterion};
use rns::crt::CrtBasis;
use rns::modulus::get_primes;
use rns::poly::{Poly, PolyRNS};
use rns::ring::RingRNS;
use sampling::source::Source;

fn new_ring(n: usize) -> RingRNS<u64> {
    let moduli: Vec<u64> = get_primes(61, 4, n).unwrap();
    RingRNS::new(n, &moduli).unwrap()
}

fn mul_add(c: &mut Criterion) {
    fn runner(r: RingRNS<u64>) -> Box<dyn FnMut()> {
        let mut source: Source = Source::new([0u8; 32]);
        let mut a: PolyRNS<u64> = r.new_polyrns();
        let mut b: PolyRNS<u64> = r.new_polyrns();
        let mut c: PolyRNS<u64> = r.new_polyrns();
        r.fill_uniform(&mut source, &mut a);
        r.fill_uniform(&mut source, &mut b);
        Box::new(move || r.a_mul_b_add_c_into_c(&a, &b, &mut c))
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("a_mul_b_add_c_into_c");
    for log_n in 11..16 {
        let ring_rns: RingRNS<u64> = new_ring(1 << log_n);
        let runners = [(
            format!("n={}/level={}", ring_rns.n(), ring_rns.level()),
            runner(ring_rns),
        )];
        for (name, mut runner) in runners {
            b.bench_with_input(name, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn digit_decomposition(c: &mut Criterion) {
    fn runner(r: RingRNS<u64>) -> Box<dyn FnMut()> {
        let mut source: Source = Source::new([0u8; 32]);
        let mut a: PolyRNS<u64> = r.new_polyrns();
        r.fill_uniform(&mut source, &mut a);
        let digit: Poly<u64> = a.at(0).clone();
        let mut b: PolyRNS<u64> = r.new_polyrns();
        Box::new(move || {
            (0..4).for_each(|i| r.a_ith_digit_unsigned_base_scalar_b_into_c(i, &digit, &16, &mut b))
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("a_ith_digit_unsigned_base_scalar_b_into_c");
    for log_n in 11..16 {
        let ring_rns: RingRNS<u64> = new_ring(1 << log_n);
        let runners = [(
            format!("n={}/level={}/log_base=16", ring_rns.n(), ring_rns.level()),
            runner(ring_rns),
        )];
        for (name, mut runner) in runners {
            b.bench_with_input(name, &(), |b, _| b.iter(&mut runner));
        }
    }
}

fn crt_reconstruct(c: &mut Criterion) {
    let moduli: Vec<u64> = get_primes(61, 4, 4096).unwrap();
    let crt: CrtBasis = CrtBasis::new(&moduli).unwrap();
    let residues: Vec<u64> = moduli.iter().map(|q| q >> 1).collect();
    c.bench_function("crt_reconstruct_centered/level=3", |b| {
        b.iter(|| crt.reconstruct_centered(&residues))
    });
}

criterion_group!(benches, mul_add, digit_decomposition, crt_reconstruct);
criterion_main!(benches);
