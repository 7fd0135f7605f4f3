use std::io::Cursor;

use cl_fft::synth::SignalSpec;
use cl_fft::{run, FftConfig, SampleReader, SpectrumEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn signal_text(samples: usize) -> Vec<u8> {
    let spec = SignalSpec {
        samples,
        ..SignalSpec::default()
    };
    let mut data = Vec::new();
    spec.write_real(&mut data, 18).unwrap();
    data
}

fn bench_reader(c: &mut Criterion) {
    let data = signal_text(16_384);
    let reader = SampleReader::new(0, 1);

    c.bench_function("read 16k samples", |b| {
        b.iter(|| reader.read(Cursor::new(black_box(&data))).unwrap())
    });
}

fn bench_engine(c: &mut Criterion) {
    let mut engine = SpectrumEngine::new();
    let signal: Vec<f64> = (0..16_384).map(|i| (i as f64 * 0.01).sin()).collect();

    c.bench_function("forward real 16k", |b| {
        b.iter(|| engine.forward_real(black_box(&signal)).unwrap())
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let data = signal_text(16_384);
    let config = FftConfig::default();

    c.bench_function("pipeline 16k", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(1 << 20);
            run(&config, Cursor::new(black_box(&data)), &mut out).unwrap()
        })
    });
}

criterion_group!(benches, bench_reader, bench_engine, bench_pipeline);
criterion_main!(benches);
