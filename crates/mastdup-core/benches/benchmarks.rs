use criterion::{criterion_group, criterion_main, Criterion};
use mastdup_core::angle::{parse_dec, parse_ra};
use mastdup_core::{ColumnSelection, LoadMode, TargetListLoader};
use std::fmt::Write;
use std::hint::black_box;

fn target_csv(rows: usize) -> String {
    let mut out = String::from("target_name,ra,dec\n");
    for i in 0..rows {
        let _ = writeln!(out, "T{i},{:.6},{:.6}", (i as f64 * 0.37) % 360.0, (i as f64 * 0.11) % 90.0);
    }
    out
}

fn bench_loader(c: &mut Criterion) {
    let csv = target_csv(10_000);
    let loader = TargetListLoader::new();
    let cols = ColumnSelection::new().with_ra("ra").with_dec("dec");

    c.bench_function("load 10k names", |b| {
        b.iter(|| loader.load_from_reader(black_box(csv.as_bytes()), LoadMode::Name, &ColumnSelection::new()))
    });
    c.bench_function("load 10k coords", |b| {
        b.iter(|| loader.load_from_reader(black_box(csv.as_bytes()), LoadMode::Coord, &cols))
    });
}

fn bench_angles(c: &mut Criterion) {
    c.bench_function("parse sexagesimal ra/dec", |b| {
        b.iter(|| {
            let ra = parse_ra(black_box("05h35m17.3s"));
            let dec = parse_dec(black_box("-05:23:28"));
            (ra, dec)
        })
    });
    c.bench_function("parse decimal ra/dec", |b| {
        b.iter(|| (parse_ra(black_box("83.822083")), parse_dec(black_box("-5.391111"))))
    });
}

criterion_group!(benches, bench_loader, bench_angles);
criterion_main!(benches);
