#[path = "../util/util.rs"]
mod util;

use util::sample_sets;

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BatchSize, Bencher, BenchmarkId,
    Criterion, SamplingMode,
};
use palette::Srgb;
use swatchcut::{median_cut, select, PaletteSize, SampleSet};

fn bench(
    c: &mut Criterion,
    group: &str,
    sets: &[(String, Vec<Srgb<u8>>)],
    mut f: impl FnMut(&mut Bencher<WallTime>, &(PaletteSize, &Vec<Srgb<u8>>)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (k, secs) in [(8.into(), 2), (64.into(), 3), (PaletteSize::MAX, 4)] {
        group.measurement_time(Duration::from_secs(secs));
        for (name, set) in sets {
            group.bench_with_input(BenchmarkId::new(k.to_string(), name), &(k, set), &mut f);
        }
    }
}

fn median_cut_palette(c: &mut Criterion) {
    bench(c, "median_cut_palette", sample_sets(), |b, &(k, samples)| {
        b.iter_batched(
            || SampleSet::try_from(samples.clone()).unwrap(),
            |samples| median_cut::palette(samples, k),
            BatchSize::LargeInput,
        )
    })
}

fn select_channel_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_channel_median");
    group.sample_size(30).noise_threshold(0.05);

    for (name, samples) in sample_sets() {
        let reds = samples.iter().map(|c| c.red).collect::<Vec<_>>();
        group.bench_with_input(BenchmarkId::from_parameter(name), &reds, |b, reds| {
            b.iter_batched(
                || reds.clone(),
                |mut reds| select::channel_median(&mut reds),
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, median_cut_palette, select_channel_median);
criterion_main!(benches);
