use numat::function::{create_add, create_compare, create_dot_multiply};
use numat::{Config, Scalar, ScalarKind, SparseMatrix, Value};

fn main() {
    let cfg = Config::default();
    let add = create_add(cfg).unwrap();
    let multiply = create_dot_multiply(cfg).unwrap();
    let compare = create_compare(cfg).unwrap();

    // sparse diagonal plus sparse identity stays sparse
    let a = SparseMatrix::from_triples(
        2,
        2,
        ScalarKind::Number,
        vec![(Scalar::Number(5.0), 0, 0), (Scalar::Number(3.0), 1, 1)],
    )
    .unwrap();
    let eye = SparseMatrix::from_triples(
        2,
        2,
        ScalarKind::Number,
        vec![(Scalar::Number(1.0), 0, 0), (Scalar::Number(1.0), 1, 1)],
    )
    .unwrap();
    let sum = add
        .call(&[Value::Sparse(a.clone()), Value::Sparse(eye.clone())])
        .unwrap();
    println!("a + I = {:?}", sum);

    // broadcasting a scalar across the explicit entries only
    let scaled = multiply.call(&[Value::Sparse(a.clone()), Value::number(10.0)]).unwrap();
    println!("a .* 10 = {:?}", scaled);

    // nested array operands go through the same dispatch table
    let arr = Value::Array(vec![
        Value::Array(vec![Value::number(1.0), Value::number(2.0)]),
        Value::Array(vec![Value::number(3.0), Value::number(4.0)]),
    ]);
    let mixed = add.call(&[arr, Value::Sparse(a.clone())]).unwrap();
    println!("array + a = {:?}", mixed);

    // n-ary reduction through the rest signature
    let total = add
        .call(&[Value::number(1.0), Value::number(2.0), Value::number(3.0)])
        .unwrap();
    println!("1 + 2 + 3 = {:?}", total);

    // relational kernels keep the sparse pattern where compare(x, 0) = 0
    let cmp = compare.call(&[Value::Sparse(a), Value::Sparse(eye)]).unwrap();
    println!("compare(a, I) = {:?}", cmp);
}
