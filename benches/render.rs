use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dither_gamma::pixfmt_gray::PixfmtGray8;
use dither_gamma::{render, CurvePresetStore, Layout, PatternRenderer};

fn bench_render(c: &mut Criterion) {
    for layout in Layout::ALL {
        let curve = CurvePresetStore::new(layout).get("sRGB-ish").unwrap();
        let (w, h) = layout.canvas_size();
        c.bench_function(&format!("render_rgba_{}", layout), |b| {
            b.iter(|| render(black_box(&curve), w, h))
        });
    }

    let curve = CurvePresetStore::new(Layout::Halving).get("sRGB-ish").unwrap();
    let renderer = PatternRenderer::new(&curve);
    let mut gray = vec![0u8; 240 * 135];
    c.bench_function("render_gray8_240x135", |b| {
        b.iter(|| {
            let mut pf = PixfmtGray8::new(&mut gray, 240, 135);
            renderer.render_into(black_box(&mut pf));
        })
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
