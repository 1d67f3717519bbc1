//! Benchmarks for primitive element search and field construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gfmatrix::{
    ExhaustiveFinder, FiniteFieldBuilder, Matrix, PolynomialEnumerationFinder, Poly,
    PrimitiveFinder, RecurrenceModel,
};

fn bench_field_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Field Build");

    for (p, n) in [(2u64, 8u32), (3, 5), (17, 2), (101, 2)] {
        let primitive = PolynomialEnumerationFinder::new(p, n)
            .unwrap()
            .find_first()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("GF({p}^{n})")),
            &primitive,
            |bencher, primitive| {
                bencher.iter(|| {
                    let mut builder = FiniteFieldBuilder::new(p, n, primitive.clone()).unwrap();
                    builder.build().unwrap().len()
                })
            },
        );
    }

    group.finish();
}

fn bench_primitive_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Primitive Search");

    for (p, n) in [(2u64, 7u32), (3, 3), (13, 2)] {
        let label = format!("GF({p}^{n})");
        group.bench_function(BenchmarkId::new("exhaustive_first", &label), |bencher| {
            bencher.iter(|| {
                ExhaustiveFinder::new(black_box(p), black_box(n))
                    .unwrap()
                    .find_first()
                    .unwrap()
            })
        });
        group.bench_function(BenchmarkId::new("enumeration_first", &label), |bencher| {
            bencher.iter(|| {
                PolynomialEnumerationFinder::new(black_box(p), black_box(n))
                    .unwrap()
                    .find_first()
                    .unwrap()
            })
        });
        group.bench_function(BenchmarkId::new("enumeration_all", &label), |bencher| {
            bencher.iter(|| {
                PolynomialEnumerationFinder::new(black_box(p), black_box(n))
                    .unwrap()
                    .find_all()
                    .unwrap()
                    .len()
            })
        });
    }

    group.finish();
}

fn bench_primitivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("Primitivity");

    // x^8 + x^4 + x^3 + x^2 + 1 over F_2
    let aes_like = Poly::from_descending(2, &[1, 0, 0, 0, 1, 1, 1, 0, 1]);
    group.bench_function("poly_is_primitive_deg8", |bencher| {
        bencher.iter(|| black_box(&aes_like).is_primitive())
    });

    let model = RecurrenceModel::new(2, 7).unwrap();
    let seeds = [0, 0, 0, 0, 0, 1, 1];
    group.bench_function("recurrence_seed_deg7", |bencher| {
        bencher.iter(|| model.is_primitive_seed(black_box(&seeds)))
    });

    let m = Matrix::shift_companion(&[1, 1], 101);
    group.bench_function("matrix_pow_mod", |bencher| {
        bencher.iter(|| black_box(&m).pow_mod(black_box(10_200), 101))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_build,
    bench_primitive_search,
    bench_primitivity,
);
criterion_main!(benches);
