//! Benchmarks for the translation phase, over a fixed corpus of rules
//! spanning the shapes translation treats differently: flat literals,
//! static plain-path variables, computed (dotted) variables, and deeply
//! nested operator trees.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonlogic_engine::create_logic;
use serde_json::{json, Value};

fn corpus() -> Vec<(&'static str, Value)> {
    vec![
        ("literal", json!(42)),
        ("flat_equality", json!({"==": [{"var": "a"}, 1]})),
        (
            "variadic_add",
            json!({"+": (0..20).collect::<Vec<i64>>()}),
        ),
        (
            "computed_var_path",
            json!({"var": "user.profile.settings.theme"}),
        ),
        (
            "nested_boolean_tree",
            json!({
                "and": [
                    {"<": [{"var": "a"}, 10]},
                    {"or": [
                        {">": [{"var": "b"}, 5]},
                        {"==": [{"var": "c"}, "x"]}
                    ]},
                    {"!": [{"var": "d"}]}
                ]
            }),
        ),
        (
            "map_filter_reduce_chain",
            json!({
                "reduce": [
                    {"filter": [
                        {"map": [{"var": "xs"}, {"*": [{"var": ""}, 2]}]},
                        {">": [{"var": ""}, 0]}
                    ]},
                    {"+": [{"var": "accumulator"}, {"var": "current"}]},
                    0
                ]
            }),
        ),
    ]
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    for (name, rule) in corpus() {
        group.bench_function(name, |b| {
            b.iter(|| create_logic(black_box(&rule)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
