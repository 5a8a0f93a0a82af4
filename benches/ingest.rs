use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pattern_ingest::{
    DxfPolylineReader, DxfReaderConfiguration, LayerFilter, MotionLogReader, PolylineReader,
    RegexDialect,
};
use std::fmt::Write;
use std::io::Cursor;

// DXF text with `count` closed square POLYLINEs spread over four layers
fn generate_dxf(count: usize) -> String {
    let mut text = String::from("  0\nSECTION\n  2\nENTITIES\n");
    for i in 0..count {
        let x = (i % 100) as f64 * 20.0;
        let y = (i / 100) as f64 * 20.0;
        let _ = write!(text, "  0\nPOLYLINE\n  8\nLAYER_{}\n 66\n1\n 70\n1\n", i % 4);
        for (dx, dy) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
            let _ = write!(
                text,
                "  0\nVERTEX\n  8\nLAYER_{}\n 10\n{}\n 20\n{}\n 30\n0.0\n",
                i % 4,
                x + dx,
                y + dy
            );
        }
        text.push_str("  0\nSEQEND\n");
    }
    text.push_str("  0\nENDSEC\n  0\nEOF\n");
    text
}

// Motion log writing `count` exposed squares with comments in between
fn generate_motion_log(count: usize) -> String {
    let mut text = String::from("/* generated */\nms(100);\n");
    for i in 0..count {
        let _ = writeln!(text, "ma_sp({}, 0); /* square {} */", i * 20, i);
        text.push_str("mr(10,0,0); mr(0,10,0);\nmr(-10,0,0); mr(0,-10,0); st(off);\n");
        text.push_str("ma(0,0,0); st(on);\n");
    }
    text
}

fn benchmark_dxf(c: &mut Criterion) {
    let mut group = c.benchmark_group("dxf");

    for size in [100, 1_000, 10_000].iter() {
        let text = generate_dxf(*size);

        group.bench_with_input(BenchmarkId::new("all_layers", size), &text, |b, text| {
            b.iter(|| {
                let mut reader = DxfPolylineReader::from_reader(Cursor::new(text.as_bytes()));
                black_box(reader.read_pattern().unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("regex_filter", size), &text, |b, text| {
            b.iter(|| {
                let config = DxfReaderConfiguration {
                    layer_filter: LayerFilter::pattern("LAYER_[02]", RegexDialect::EcmaScript)
                        .unwrap(),
                    reference_from_layer: true,
                    ..Default::default()
                };
                let mut reader = DxfPolylineReader::from_reader(Cursor::new(text.as_bytes()))
                    .with_configuration(config);
                black_box(reader.read_pattern().unwrap())
            });
        });
    }

    group.finish();
}

fn benchmark_motion_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("motion_log");

    for size in [100, 1_000, 10_000].iter() {
        let text = generate_motion_log(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let mut reader = MotionLogReader::from_reader(Cursor::new(text.as_bytes()));
                black_box(reader.read_pattern().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_dxf, benchmark_motion_log);
criterion_main!(benches);
