use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use libgraphql_autorequester::selection::SelectionSet;

/// `{ f0 { a b c } f1 { a b c } ... }` with `width` top-level fields, every
/// `step`-th one of them included.
fn wide_selection_set(width: usize, step: usize) -> SelectionSet {
    let fields: Vec<String> = (0..width)
        .step_by(step)
        .map(|idx| format!("f{idx} {{ a b c nested {{ x y }} }}"))
        .collect();
    SelectionSet::parse(&format!("{{ {} }}", fields.join(" ")))
        .expect("benchmark selection should parse")
}

fn merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for width in [16, 128, 512] {
        let base = wide_selection_set(width, 2);
        let addition = wide_selection_set(width, 3);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                let mut merged = base.clone();
                merged.merge(black_box(&addition)).expect("merge should succeed");
                black_box(merged)
            })
        });
    }
    group.finish();
}

fn left_outer_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("left_outer_join");
    for width in [16, 128, 512] {
        let have = wide_selection_set(width, 2);
        let wanted = wide_selection_set(width, 1);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| black_box(wanted.left_outer_join(black_box(&have))))
        });
    }
    group.finish();
}

criterion_group!(benches, merge, left_outer_join);
criterion_main!(benches);
