//! A library for extracting a fixed-size color palette from an image with median cut.
//!
//! `swatchcut` repeatedly splits the box of colors with the widest channel range
//! at the median of that channel (found with quickselect instead of a full sort),
//! reduces each final box to its per-channel median color,
//! and then counts how many samples are nearest to each palette color.
//!
//! # Features
//! `swatchcut` has several `cargo` features that can be turned off or on:
//! - `threads`: exposes parallel versions of the classification functions via [`rayon`].
//! - `image`: enables integration with the [`image`] crate and palette preview rendering.
//! - `serde`: derives `Serialize` for [`PaletteEntry`].
//! - `cli`: builds the `swatchcut` command line tool.
//!
//! # High-Level API
//! ```no_run
//! # use swatchcut::{PalettePipeline, PaletteSize};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgb8();
//!
//! let entries = PalettePipeline::try_from(&img)?
//!     .palette_size(PaletteSize::from(8))
//!     .ranked_par();
//!
//! for entry in entries {
//!     println!("{} {}", entry.hex, entry.count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Low-Level API
//! [`median_cut::palette`] builds a palette from an owned [`SampleSet`],
//! [`classify::histogram`] (or [`classify::histogram_par`]) counts the samples nearest to each entry,
//! and [`rank_entries`] pairs and sorts the two.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod channel;
mod pipeline;
mod rank;
mod types;

pub mod classify;
pub mod median_cut;
pub mod select;

#[cfg(feature = "image")]
pub mod preview;

pub use channel::*;
pub use classify::ClassifyOptions;
pub use pipeline::PalettePipeline;
pub use rank::*;
pub use types::*;

/// The maximum supported number of samples is `u32::MAX`, so that every count fits in a `u32`.
pub const MAX_PIXELS: u32 = u32::MAX;

/// The maximum supported number of palette colors is `256`, so that every palette index fits in a `u8`.
pub const MAX_COLORS: u16 = u8::MAX as u16 + 1;

#[cfg(test)]
pub(crate) mod tests {
    use palette::Srgb;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    /// Returns `len` uniformly random colors from a fixed seed.
    pub fn random_colors(len: usize, seed: u64) -> Vec<Srgb<u8>> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
        (0..len)
            .map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen()))
            .collect()
    }

    pub fn test_data_256() -> Vec<Srgb<u8>> {
        random_colors(256, 0)
    }

    pub fn test_data_1024() -> Vec<Srgb<u8>> {
        random_colors(1024, 1)
    }

    /// Three loose clusters around red, green, and blue.
    pub fn clustered_colors(per_cluster: usize, seed: u64) -> Vec<Srgb<u8>> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
        let mut jitter = |base: u8| base.saturating_add(rng.gen_range(0..16));
        let mut colors = Vec::with_capacity(per_cluster * 3);
        for _ in 0..per_cluster {
            colors.push(Srgb::new(jitter(224), jitter(0), jitter(0)));
            colors.push(Srgb::new(jitter(0), jitter(224), jitter(0)));
            colors.push(Srgb::new(jitter(0), jitter(0), jitter(224)));
        }
        colors
    }
}
