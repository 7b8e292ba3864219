#[path = "../util/util.rs"]
mod util;

use util::sample_sets;

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use palette::Srgb;
use swatchcut::{classify, median_cut, ClassifyOptions, PaletteSize, SampleSet};

type Input = (String, Vec<Srgb<u8>>, Vec<Srgb<u8>>);

/// Pairs each sample set with its palette for each palette size.
fn with_palettes() -> Vec<(PaletteSize, Vec<Input>)> {
    [8.into(), 64.into(), PaletteSize::MAX]
        .into_iter()
        .map(|k| {
            let inputs = sample_sets()
                .iter()
                .map(|(name, samples)| {
                    let set = SampleSet::try_from(samples.clone()).unwrap();
                    let palette = median_cut::palette(set, k);
                    (name.clone(), samples.clone(), palette)
                })
                .collect();
            (k, inputs)
        })
        .collect()
}

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<WallTime>, &(&[Srgb<u8>], &[Srgb<u8>])),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3));

    for (k, inputs) in with_palettes() {
        for (name, samples, palette) in &inputs {
            group.bench_with_input(
                BenchmarkId::new(k.to_string(), name),
                &(samples.as_slice(), palette.as_slice()),
                &mut f,
            );
        }
    }
}

fn histogram_single(c: &mut Criterion) {
    bench(c, "histogram_single", |b, &(samples, palette)| {
        b.iter(|| classify::histogram(samples, palette))
    })
}

fn histogram_par(c: &mut Criterion) {
    let options = ClassifyOptions::new();
    bench(c, "histogram_par", |b, &(samples, palette)| {
        b.iter(|| classify::histogram_par(samples, palette, &options))
    })
}

fn indices_par(c: &mut Criterion) {
    let options = ClassifyOptions::new();
    bench(c, "indices_par", |b, &(samples, palette)| {
        b.iter(|| classify::indices_par(samples, palette, &options))
    })
}

criterion_group!(benches, histogram_single, histogram_par, indices_par);
criterion_main!(benches);
