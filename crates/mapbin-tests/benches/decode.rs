use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mapbin_decoder::MapDecoder;
use mapbin_driver::{DefaultDriver, MapDriver, OutputFormat, RenderConfig};
use mapbin_tests::{large_map, sample_map};

fn bench_decode_small(c: &mut Criterion) {
    let payload = sample_map();
    let decoder = MapDecoder::new();

    c.bench_function("decode_small", |b| {
        b.iter(|| decoder.decode(&payload).unwrap());
    });
}

fn bench_decode_scaling(c: &mut Criterion) {
    let decoder = MapDecoder::new();
    let mut group = c.benchmark_group("decode_scaling");

    for levels in [1, 10, 100] {
        let payload = large_map(levels);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(levels), &payload, |b, payload| {
            b.iter(|| decoder.decode(payload).unwrap());
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let decoded = MapDecoder::new().decode(&large_map(10)).unwrap();
    let mut group = c.benchmark_group("render");

    for (label, format) in [("json", OutputFormat::Json), ("xml", OutputFormat::Xml)] {
        let config = RenderConfig {
            format,
            pretty: false,
            xml_declaration: false,
        };
        group.bench_function(label, |b| {
            b.iter(|| {
                DefaultDriver
                    .render(&decoded.header, &decoded.root, &config)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode_small, bench_decode_scaling, bench_render);
criterion_main!(benches);
