#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use image::{ImageFormat, RgbImage, RgbaImage};
use swatchcut::{
    preview::{compose_with_strip, palette_strip, PREVIEW_HEIGHT, PREVIEW_WIDTH},
    AboveMaxLen, PaletteEntry, PalettePipeline, PaletteSize, SampleSet,
};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// File extensions accepted in batch mode, compared case-insensitively.
const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image has too many pixels: {0}")]
    TooLarge(#[from] AboveMaxLen<u32>),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("no input: pass --input, or --input-dir together with --output")]
    MissingInput,
}

impl CliError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Extracts a dominant color palette from images with median cut.
#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Input image (png, jpg or gif).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of colors in the palette.
    #[arg(
        short = 'n',
        long = "colors",
        default_value_t = PaletteSize::DEFAULT,
        value_parser = parse_palette_size
    )]
    k: PaletteSize,

    /// Print the palette as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Save a palette preview strip to this path (always written as PNG).
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Process every supported image in this directory (requires --output).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory for the images with a palette strip appended.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Width in pixels of the palette strip appended to output images.
    #[arg(long, default_value_t = 80)]
    strip: u32,

    /// Number of worker threads (0 uses the available parallelism).
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

fn parse_palette_size(s: &str) -> Result<PaletteSize, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    if value == 0 {
        return Err("number of colors must be > 0".to_owned());
    }
    value.try_into().map_err(|e| format!("{e}"))
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env();
    tracing_subscriber::fmt()
        .with_env_filter(filter.unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();

    let result = if options.threads == 0 {
        run(&options)
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()
            .map_err(CliError::from)
            .and_then(|pool| pool.install(|| run(&options)))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), CliError> {
    if let (Some(input_dir), Some(output)) = (&options.input_dir, &options.output) {
        return run_batch(options, input_dir, output);
    }

    let input = options.input.as_deref().ok_or(CliError::MissingInput)?;
    let decoded = image::open(input)?;
    let entries = extract(&decoded.to_rgb8(), options.k)?;

    write_entries(&mut io::stdout().lock(), &entries, options.json)?;

    if let Some(path) = &options.preview {
        save_preview(path, &entries)?;
        println!("palette preview saved: {}", path.display());
    }

    if let Some(output) = &options.output {
        fs::create_dir_all(output).map_err(CliError::io(output))?;
        let path = output.join(output_name(input));
        save_composite(&path, &decoded.into_rgba8(), &entries, options.strip)?;
    }

    Ok(())
}

fn run_batch(options: &Options, input_dir: &Path, output: &Path) -> Result<(), CliError> {
    fs::create_dir_all(output).map_err(CliError::io(output))?;

    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(CliError::io(input_dir))? {
        let entry = entry.map_err(CliError::io(input_dir))?;
        let path = entry.path();
        if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }
    files.sort();

    for path in files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let target = output.join(output_name(&path));
        let start = Instant::now();
        info!("{name}: processing...");
        match process_file(options, &path, &target) {
            Ok(()) => info!("{name}: done in {:.2?}", start.elapsed()),
            Err(err) => warn!("{name}: error: {err}"),
        }
    }

    Ok(())
}

/// Quantizes one image and writes its composite, plus the optional JSON and preview.
fn process_file(options: &Options, input: &Path, output: &Path) -> Result<(), CliError> {
    let decoded = image::open(input)?;
    let entries = extract(&decoded.to_rgb8(), options.k)?;

    if options.json {
        write_entries(&mut io::stdout().lock(), &entries, true)?;
    }
    if let Some(path) = &options.preview {
        save_preview(path, &entries)?;
    }

    save_composite(output, &decoded.into_rgba8(), &entries, options.strip)
}

fn extract(image: &RgbImage, k: PaletteSize) -> Result<Vec<PaletteEntry>, CliError> {
    let samples = SampleSet::try_from(image)?;
    Ok(PalettePipeline::new(samples).palette_size(k).ranked_par())
}

/// Writes the entries as pretty JSON or as one `#RRGGBB\tcount=N\tshare=P.PP%` line each.
fn write_entries(
    out: &mut impl Write,
    entries: &[PaletteEntry],
    json: bool,
) -> Result<(), CliError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, entries)?;
        writeln!(out)?;
    } else {
        for e in entries {
            let share = e.share * 100.0;
            writeln!(out, "{}\tcount={}\tshare={share:.2}%", e.hex, e.count)?;
        }
    }
    Ok(())
}

fn save_preview(path: &Path, entries: &[PaletteEntry]) -> Result<(), CliError> {
    let strip = palette_strip(entries, PREVIEW_WIDTH, PREVIEW_HEIGHT);
    strip.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Writes `image` with the palette strip appended as a PNG.
fn save_composite(
    path: &Path,
    image: &RgbaImage,
    entries: &[PaletteEntry],
    strip_width: u32,
) -> Result<(), CliError> {
    let composite = compose_with_strip(image, entries, strip_width);
    composite.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn is_supported(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
}

/// Replaces the extension of the input's file name with `.png`.
fn output_name(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".png");
    PathBuf::from(name)
}
