// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use understory_form::{FormRegistry, FormSchema, Rules};

fn keys(len: usize) -> Vec<String> {
    (0..len).map(|i| format!(".f{i}")).collect()
}

fn build(len: usize) -> FormRegistry {
    let mut schema = FormSchema::new();
    for i in 0..len {
        // Every third field starts empty so validation has something to report.
        let seed = if i % 3 == 0 { "" } else { "filled" };
        schema = schema.text(format!("f{i}"), seed);
    }
    schema.build().unwrap()
}

/// A registry after one render pass: every field fetched, validated, laid out.
fn rendered(len: usize) -> FormRegistry {
    let mut form = build(len);
    for (i, key) in keys(len).iter().enumerate() {
        let y = 56.0 * i as f64;
        let field = form.field(key).unwrap();
        field.set_validator(Rules::new().required().min_length(3));
        field.set_bounds(Rect::new(0.0, y, 320.0, y + 48.0));
    }
    form
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/build");
    for len in [16_usize, 128, 1_024] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| black_box(build(len)));
        });
    }
    group.finish();
}

fn bench_render_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/render_pass");

    // Hypothesis: first-access bookkeeping scans the access order, so a full
    // render pass is quadratic in the field count.
    for len in [16_usize, 128, 1_024] {
        let keys = keys(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &keys, |b, keys| {
            b.iter_batched(
                || build(len),
                |mut form| {
                    for key in keys {
                        black_box(form.field(key).unwrap().revision());
                    }
                    black_box(form);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("form/submit");
    for len in [16_usize, 128, 1_024] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || rendered(len),
                |mut form| {
                    let ok = form.handle_submit(|values| {
                        black_box(values);
                    });
                    black_box((ok, form.first_error_bounds()));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_render_pass, bench_submit);
criterion_main!(benches);
