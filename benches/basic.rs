use adt::{values, Declaration, Ty, Value};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{thread_rng, Rng};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("declare three fields", |b| {
        b.iter(|| {
            Declaration::new("MyADT")
                .field("foo", ())
                .field("bar", (Ty::Int,))
                .field("baz", (Ty::Int, Ty::Bool, Ty::Str, Ty::None))
                .declare()
                .unwrap()
        })
    });

    c.bench_function("construct checked payload", |b| {
        let mut rng = thread_rng();
        let adt = Declaration::new("MyADT")
            .field("baz", (Ty::Int, Ty::Bool, Ty::Str, Ty::None))
            .declare()
            .unwrap();
        let baz = adt.get("baz").unwrap();
        let args = values![rng.gen::<i64>(), rng.gen::<bool>(), "hi", ()];
        b.iter(|| baz.construct(&args).unwrap())
    });

    c.bench_function("structural equality", |b| {
        let mut rng = thread_rng();
        let adt = Declaration::new("Pair")
            .field("Both", (Ty::Int, Ty::Object))
            .declare()
            .unwrap();
        let both = adt.get("Both").unwrap();
        let n: i64 = rng.gen_range(0, 1 << 20);
        let nested = both.construct(&values![n, ()]).unwrap();
        let left = both.construct(&values![n, nested.clone()]).unwrap();
        let right = both.construct(&values![n, nested]).unwrap();
        b.iter(|| assert_eq!(left, right))
    });

    c.bench_function("membership", |b| {
        let adt = Declaration::new("Unit").field("It", ()).declare().unwrap();
        let it = Value::from(adt.get("It").unwrap().construct(&[]).unwrap());
        b.iter(|| assert!(adt.contains(&it)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
