use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tailwind_classkit::{sort, tokenize, ClassAnalyzer};

const CLASSES: &[&str] = &[
    "flex", "flex-col", "items-center", "justify-center", "p-4", "m-2", "bg-blue-500", "text-white",
    "rounded-lg", "shadow-md", "hover:bg-blue-600", "focus:outline-none", "transition-all",
    "duration-300", "md:grid", "grid-cols-3", "gap-4", "lg:px-8", "w-[calc(100%_-_2rem)]",
    "sm:hover:text-sm", "-mt-1", "!font-bold",
];

/// An attribute value of `count` classes cycling through `CLASSES`
fn class_string(count: usize, offset: usize) -> String {
    CLASSES
        .iter()
        .cycle()
        .skip(offset % CLASSES.len())
        .take(count)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

fn benchmark_single_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_string");
    let analyzer = ClassAnalyzer::default();

    for count in [5, 20, 100].iter() {
        let input = class_string(*count, 0);

        group.bench_with_input(BenchmarkId::new("tokenize", count), &input, |b, input| {
            b.iter(|| tokenize(black_box(input)).len())
        });

        group.bench_with_input(BenchmarkId::new("sort", count), &input, |b, input| {
            b.iter(|| sort(black_box(input)))
        });

        group.bench_with_input(BenchmarkId::new("analyze_cold", count), &input, |b, input| {
            b.iter_with_setup(|| analyzer.new_cache(), |cache| analyzer.analyze(black_box(input), &cache))
        });

        let warm = analyzer.new_cache();
        analyzer.analyze(&input, &warm);
        group.bench_with_input(BenchmarkId::new("analyze_warm", count), &input, |b, input| {
            b.iter(|| analyzer.analyze(black_box(input), &warm))
        });
    }

    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    let analyzer = ClassAnalyzer::default();

    for size in [100, 1_000, 10_000].iter() {
        let inputs: Vec<String> = (0..*size).map(|i| class_string(12, i)).collect();
        group.bench_with_input(BenchmarkId::new("analyze_batch", size), &inputs, |b, inputs| {
            let cache = analyzer.new_cache();
            b.iter(|| analyzer.analyze_batch(black_box(inputs), &cache).len())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_string, benchmark_batch);
criterion_main!(benches);
