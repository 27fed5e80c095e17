use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mirth_scanner::Scanner;

fn sample_source() -> String {
    let unit = r#"// compute a greeting
let name = "wolf 🐺"
const limit = 0x1F + 0o17 + 0b1010
func greet(n) {
    let ratio = 12.5e-3 * n
    if ratio >= 1.0 && n != 0 { return `hi ${name}, ratio ${ratio}` }
    for i in 0..limit { n <<= 1 }
    return 'x'
}
"#;
    unit.repeat(200)
}

fn count_tokens(source: &str) -> usize {
    Scanner::new(source)
        .tokens()
        .filter(|result| result.is_ok())
        .count()
}

fn bench_scan(c: &mut Criterion) {
    let source = sample_source();
    let mut group = c.benchmark_group("scanner");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("scan_mixed_source", |b| {
        b.iter(|| count_tokens(black_box(&source)))
    });
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
