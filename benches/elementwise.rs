use criterion::{Criterion, black_box, criterion_group, criterion_main};
use numat::function::{create_add, create_dot_multiply};
use numat::{Config, DenseMatrix, Scalar, ScalarKind, SparseMatrix, Value};

fn bench_elementwise(c: &mut Criterion) {
    let cfg = Config::default();
    let add = create_add(cfg).unwrap();
    let multiply = create_dot_multiply(cfg).unwrap();

    let n = 100;
    let data: Vec<Scalar> = (0..n * n).map(|i| Scalar::Number((i as f64).sin())).collect();
    let dense = DenseMatrix::new(data, vec![n, n]).unwrap();
    // tridiagonal sparse operand, ~3% density
    let mut triples = Vec::new();
    for i in 0..n {
        triples.push((Scalar::Number(2.0), i, i));
        if i + 1 < n {
            triples.push((Scalar::Number(-1.0), i, i + 1));
            triples.push((Scalar::Number(-1.0), i + 1, i));
        }
    }
    let sparse = SparseMatrix::from_triples(n, n, ScalarKind::Number, triples).unwrap();

    c.bench_function("add dense-dense", |ben| {
        ben.iter(|| {
            add.call(black_box(&[Value::Dense(dense.clone()), Value::Dense(dense.clone())]))
                .unwrap()
        })
    });

    c.bench_function("add sparse-sparse", |ben| {
        ben.iter(|| {
            add.call(black_box(&[Value::Sparse(sparse.clone()), Value::Sparse(sparse.clone())]))
                .unwrap()
        })
    });

    c.bench_function("multiply dense-sparse", |ben| {
        ben.iter(|| {
            multiply
                .call(black_box(&[Value::Dense(dense.clone()), Value::Sparse(sparse.clone())]))
                .unwrap()
        })
    });

    c.bench_function("multiply sparse-scalar", |ben| {
        ben.iter(|| {
            multiply
                .call(black_box(&[Value::Sparse(sparse.clone()), Value::number(3.0)]))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_elementwise);
criterion_main!(benches);
