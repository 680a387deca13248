use criterion::{criterion_group, criterion_main, Criterion};
use pixelfind::lowlevel::{ScalarKernel, WindowKernel};
use pixelfind::{MatchConfig, Matcher, RasterImage, SearchMode, Threshold};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> RasterImage {
    RasterImage::from_fn(width, height, |x, y| {
        let v = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
        [v as u8, (v as u8).wrapping_add(40), (v as u8) ^ 0x5A, 255]
    })
    .unwrap()
}

fn bench_matcher(c: &mut Criterion) {
    let hay = make_image(320, 240);
    let present = hay.crop(250, 190, 32, 24).unwrap();
    let absent = RasterImage::filled(32, 24, [1, 2, 3, 4]).unwrap();

    let first = Matcher::new().with_threshold(Threshold::DEFAULT);
    c.bench_function("find_first_present", |b| {
        b.iter(|| black_box(first.find(hay.view(), present.view())));
    });
    c.bench_function("find_first_absent", |b| {
        b.iter(|| black_box(first.find(hay.view(), absent.view())));
    });

    let best = Matcher::new().with_config(MatchConfig {
        threshold: Threshold::DEFAULT,
        mode: SearchMode::Best,
        parallel: false,
    });
    c.bench_function("find_best_present", |b| {
        b.iter(|| black_box(best.find(hay.view(), present.view())));
    });

    if cfg!(feature = "rayon") {
        let par = Matcher::new().with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        });
        c.bench_function("find_first_absent_parallel", |b| {
            b.iter(|| black_box(par.find(hay.view(), absent.view())));
        });
    }

    c.bench_function("scalar_window", |b| {
        b.iter(|| {
            black_box(ScalarKernel::mismatches_at(
                hay.view(),
                present.view(),
                black_box(100),
                black_box(80),
                25,
            ))
        });
    });
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
