//! Benchmarks the minimal cut set engine on trees whose MCS count grows
//! combinatorially with depth, since that combinatorial blowup is the
//! one place the engine's performance is load-bearing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sfta::fta;

/// A balanced binary tree of OR-of-AND gates `n` levels deep: `2^n` leaf
/// events and roughly `2^(n-1)` minimal cut sets at the root.
fn layered_source(levels: usize) -> String {
    let leaf_count = 1usize << levels;
    let mut src = String::new();
    for i in 0..leaf_count {
        src.push_str(&format!("Event: E{i}\n- probability: 0.01\n", ));
    }

    let mut layer: Vec<String> = (0..leaf_count).map(|i| format!("E{i}")).collect();
    let mut gate_id = 0usize;
    let mut level = 0usize;
    while layer.len() > 1 {
        let gate_type = if level % 2 == 0 { "AND" } else { "OR" };
        let mut next = Vec::with_capacity(layer.len() / 2);
        for pair in layer.chunks(2) {
            let id = format!("G{gate_id}");
            gate_id += 1;
            src.push_str(&format!("Gate: {id}\n- type: {gate_type}\n- inputs: {}\n", pair.join(", ")));
            next.push(id);
        }
        layer = next;
        level += 1;
    }

    src
}

fn bench_mcs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcs_engine");
    for levels in [4usize, 6, 8] {
        let source = layered_source(levels);
        group.bench_function(format!("levels_{levels}"), |b| {
            b.iter(|| {
                let tree = fta::parse(black_box(&source)).unwrap();
                for &top in &tree.top_gates() {
                    black_box(tree.quantity(top));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mcs);
criterion_main!(benches);
