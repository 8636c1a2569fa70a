//! Criterion benchmarks for key translation and pointer mapping.
//!
//! Both run on every platform event, outside the tick, so they must stay in
//! the table-lookup cost class.
//!
//! Run with:
//! ```bash
//! cargo bench --package nx-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nx_core::keymap::macos_cg::{KVK_ANSI_A, KVK_LEFT_ARROW, KVK_RETURN};
use nx_core::{KeyMapper, ScreenTransform, ViewPoint, ViewSize, WindowSize};

/// Key codes covering both gamepad clusters, text keys and unbound keys.
const BENCH_KEY_CODES: &[(u16, &str)] = &[
    (0x7B, ""),
    (0x7C, ""),
    (0x7D, ""),
    (0x7E, ""),
    (0x06, "z"),
    (0x07, "x"),
    (0x02, "d"),
    (0x0F, "r"),
    (0x0E, "e"),
    (0x24, "\r"),
    (0x33, "\u{7F}"),
    (0x31, " "),
    (0x12, "1"),
    (0x3B, ""),
    (0x7A, "\u{F704}"),
];

// ── Benchmarks: key translation ──────────────────────────────────────────────

fn bench_key_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_key_down");

    group.bench_with_input(BenchmarkId::new("key_down", "LeftArrow"), &KVK_LEFT_ARROW, |b, &code| {
        b.iter(|| KeyMapper::key_down(black_box(code), black_box("")))
    });

    group.bench_with_input(BenchmarkId::new("key_down", "A"), &KVK_ANSI_A, |b, &code| {
        b.iter(|| KeyMapper::key_down(black_box(code), black_box("a")))
    });

    group.bench_with_input(BenchmarkId::new("key_down", "Return"), &KVK_RETURN, |b, &code| {
        b.iter(|| KeyMapper::key_down(black_box(code), black_box("\r")))
    });

    // Burst of mixed keys, as when typing a line of text
    group.bench_function("key_down_batch_15", |b| {
        b.iter(|| {
            BENCH_KEY_CODES
                .iter()
                .map(|&(code, text)| KeyMapper::key_down(black_box(code), black_box(text)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_key_up(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_key_up");

    group.bench_function("key_up_batch_15", |b| {
        b.iter(|| {
            BENCH_KEY_CODES
                .iter()
                .map(|&(code, _)| KeyMapper::key_up(black_box(code)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// ── Benchmarks: pointer mapping ──────────────────────────────────────────────

fn bench_screen_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen_transform");
    let transform = ScreenTransform::default();
    let view = ViewSize::new(640.0, 512.0);

    group.bench_function("to_virtual", |b| {
        b.iter(|| transform.to_virtual(black_box(ViewPoint::new(321.5, 100.25)), black_box(view)))
    });

    group.bench_function("fit", |b| {
        b.iter(|| transform.fit(black_box(WindowSize::new(1920.0, 1080.0))))
    });

    group.finish();
}

criterion_group!(benches, bench_key_down, bench_key_up, bench_screen_transform);
criterion_main!(benches);
