use std::{fs, hint::black_box};

use criterion::{criterion_group, criterion_main, Criterion};
use gbasis::{
    basis::BasisTable,
    integrals::overlap,
    library::{parse_library, BasisLibrary},
};
use nalgebra::Vector3;

const DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

fn bench_parse(c: &mut Criterion) {
    let source = fs::read_to_string(format!("{DATA}/sto-3g")).unwrap();

    c.bench_function("Parse STO-3G", |b| {
        b.iter(|| BasisTable::from_entries(parse_library(black_box(&source)).unwrap()))
    });

    let library = BasisLibrary::new(DATA);
    library.load("sto-3g").unwrap();
    c.bench_function("Cached load STO-3G", |b| {
        b.iter(|| library.load(black_box("sto-3g")).unwrap())
    });
}

fn bench_contract(c: &mut Criterion) {
    let table = BasisLibrary::new(DATA).load("sto-3g").unwrap();
    let origin = Vector3::new(0.0, 1.43, -1.11);

    c.bench_function("Contract oxygen STO-3G", |b| {
        b.iter(|| table.contracted_functions(black_box(8), origin).unwrap())
    });

    let functions = table.contracted_functions(8, origin).unwrap().unwrap();
    c.bench_function("Overlap oxygen STO-3G", |b| {
        b.iter(|| {
            functions
                .iter()
                .flat_map(|a| functions.iter().map(move |b| overlap(a, b)))
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_parse, bench_contract);
criterion_main!(benches);
