use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use makini_diff::{DiffOptions, LinesDiff};

fn synthetic_file(lines: usize, seed: usize) -> Vec<String> {
    (0..lines)
        .map(|idx| {
            let indent = "    ".repeat(idx % 3);
            format!("{indent}let value_{idx} = compute({});", (idx * 7 + seed) % 113)
        })
        .collect()
}

fn edited(file: &[String], stride: usize) -> Vec<String> {
    let mut result = file.to_vec();
    for idx in (0..result.len()).step_by(stride) {
        result[idx] = format!("    let patched_{idx} = compute({});", idx % 29);
    }
    result
}

fn bench_lines(c: &mut Criterion, name: &str, line_count: usize, stride: usize) {
    let original = synthetic_file(line_count, 0);
    let modified = edited(&original, stride);
    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                let original: Vec<&str> = original.iter().map(String::as_str).collect();
                let modified: Vec<&str> = modified.iter().map(String::as_str).collect();
                (original, modified)
            },
            |(original, modified)| {
                LinesDiff::compute(black_box(&original), black_box(&modified), &DiffOptions::default())
            },
            BatchSize::SmallInput,
        )
    });
}

fn benches(c: &mut Criterion) {
    // below the DP threshold: exact alignment path
    bench_lines(c, "dp_lines_800", 800, 37);
    // above it: O(ND) path plus per-change refinement
    bench_lines(c, "myers_lines_5000", 5000, 53);
    // whitespace-insensitive mode
    let original = synthetic_file(1200, 0);
    let modified = edited(&original, 41);
    c.bench_function("ignore_whitespace_1200", |b| {
        let options = DiffOptions {
            ignore_trim_whitespace: true,
            ..DiffOptions::default()
        };
        b.iter(|| {
            let original: Vec<&str> = original.iter().map(String::as_str).collect();
            let modified: Vec<&str> = modified.iter().map(String::as_str).collect();
            LinesDiff::compute(black_box(&original), black_box(&modified), &options)
        })
    });
}

criterion_group!(synthetic, benches);
criterion_main!(synthetic);
