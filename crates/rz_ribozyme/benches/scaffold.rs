use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use rz_ribozyme::ReferenceStructure;
use rz_ribozyme::SplitMode;
use rz_ribozyme::extract_loops;

pub fn scaffold_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scaffold");

    let reference = ReferenceStructure::new(
        "GGGCUUCGGCCCAGACGGGAACCG",
        "((((....))))...(((...)))",
        SplitMode::ExcludeLoops,
    )
    .unwrap();

    let reduced = "((........))...(((...)))";

    group.bench_function("Extract loops from a reduced-stem candidate.", |b| {
        b.iter(|| {
            let _ = extract_loops("GGGCUUCGGCCCAGACGGGAACCG", reduced, &reference.parts);
        });
    });
}

criterion_group!(benches, scaffold_matching);
criterion_main!(benches);
