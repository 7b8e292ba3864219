#![allow(dead_code)]

use std::sync::OnceLock;

use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// Uniformly random colors.
pub fn noise(len: usize, seed: u64) -> Vec<Srgb<u8>> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    (0..len)
        .map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// A smooth two dimensional gradient, similar to a photo of the sky.
#[allow(clippy::cast_possible_truncation)]
pub fn gradient(width: u32, height: u32) -> Vec<Srgb<u8>> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                let b = ((x + y) * 255 / (width + height).max(1)) as u8;
                Srgb::new(r, g, b)
            })
        })
        .collect()
}

/// A handful of tight color clusters, similar to a flat illustration.
pub fn clusters(len: usize, seed: u64) -> Vec<Srgb<u8>> {
    const CENTERS: [(u8, u8, u8); 6] = [
        (230, 57, 70),
        (241, 250, 238),
        (168, 218, 220),
        (69, 123, 157),
        (29, 53, 87),
        (252, 191, 73),
    ];

    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let (r, g, b) = CENTERS[rng.gen_range(0..CENTERS.len())];
            let mut jitter = |c: u8| c.saturating_add(rng.gen_range(0..12)).saturating_sub(6);
            Srgb::new(jitter(r), jitter(g), jitter(b))
        })
        .collect()
}

fn load_sample_sets() -> Vec<(String, Vec<Srgb<u8>>)> {
    vec![
        ("noise_1024x768".to_owned(), noise(1024 * 768, 0)),
        ("gradient_1024x768".to_owned(), gradient(1024, 768)),
        ("clusters_1024x768".to_owned(), clusters(1024 * 768, 1)),
    ]
}

static SAMPLE_SETS: OnceLock<Vec<(String, Vec<Srgb<u8>>)>> = OnceLock::new();

pub fn sample_sets() -> &'static [(String, Vec<Srgb<u8>>)] {
    SAMPLE_SETS.get_or_init(load_sample_sets)
}
