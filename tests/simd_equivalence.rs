#![cfg(feature = "simd")]

use pixelfind::lowlevel::{ScalarKernel, SimdKernel, WindowKernel};
use pixelfind::RasterImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> RasterImage {
    RasterImage::from_fn(width, height, |_, _| {
        [rng.random(), rng.random(), rng.random(), rng.random()]
    })
    .unwrap()
}

#[test]
fn simd_counts_match_scalar_counts() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..25 {
        let w = rng.random_range(8..40);
        let h = rng.random_range(4..20);
        let hay = random_image(&mut rng, w, h);
        let nw = rng.random_range(1..=w.min(13));
        let nh = rng.random_range(1..=h.min(5));
        let needle = random_image(&mut rng, nw, nh);
        let tolerance: u8 = rng.random();

        let (hay, needle) = (hay.view(), needle.view());
        for y in 0..=h - nh {
            for x in 0..=w - nw {
                let scalar = ScalarKernel::mismatches_at(hay, needle, x, y, tolerance);
                let simd = SimdKernel::mismatches_at(hay, needle, x, y, tolerance);
                assert_eq!(scalar, simd, "x={x} y={y} tolerance={tolerance}");
            }
        }
    }
}
