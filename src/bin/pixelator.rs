//! Command-line interface for pixelator
//!
//! Usage: pixelator [OPTIONS] <INPUT>

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use log::{debug, info};
use pixelator::prelude::*;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Metric {
    Rgb,
    Oklab,
}

impl From<Metric> for DistanceMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Rgb => DistanceMetric::Rgb,
            Metric::Oklab => DistanceMetric::Oklab,
        }
    }
}

fn cli() -> Command {
    Command::new("pixelator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pixelate an image, optionally snapping blocks to a custom palette.")
        .arg(
            Arg::new("input")
                .help("Input image file")
                .required(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Output file (default: <input>_pixelated.png)"),
        )
        .arg(
            Arg::new("block")
                .short('b')
                .long("block")
                .help("Block size in source pixels")
                .value_name("UINT")
                .value_parser(value_parser!(u32).range(1..=128))
                .default_value("8"),
        )
        .arg(
            Arg::new("palette")
                .short('p')
                .long("palette")
                .help("Palette colors as hex, repeatable or comma-separated (e.g. -p '#1a1c2c,#f4f4f4')")
                .value_name("HEX")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("metric")
                .long("metric")
                .help("Color distance used for palette matching")
                .value_name("METRIC")
                .value_parser(value_parser!(Metric))
                .default_value("rgb"),
        )
        .arg(
            Arg::new("blocks_only")
                .long("blocks-only")
                .help("Write one pixel per block instead of the full-size image")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug information")
                .action(ArgAction::SetTrue),
        )
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("_pixelated.png");
    input.with_file_name(name)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input path")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| default_output(input));
    let block = *matches.get_one::<u32>("block").context("missing block size")?;
    let metric = *matches.get_one::<Metric>("metric").context("missing metric")?;
    let hex: Vec<&String> = matches
        .get_many::<String>("palette")
        .map(|v| v.collect())
        .unwrap_or_default();

    let config = PixelateConfig {
        block_factor: BlockFactor::new(block)?,
        palette: Palette::parse(&hex)?,
        metric: metric.into(),
    };

    info!("Loading {}...", input.display());
    let img = image::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let source = PixelBuffer::try_from(&img)?;
    debug!(
        "source {}x{}, palette [{}]",
        source.width(),
        source.height(),
        config.palette.to_hex_strings().join(", ")
    );

    let start = std::time::Instant::now();
    let result = pixelate_with_config(&source, &config)?;
    info!(
        "Pixelated {}x{} into {}x{} blocks in {:?}",
        source.width(),
        source.height(),
        result.blocks.width(),
        result.blocks.height(),
        start.elapsed()
    );

    let out_img = if matches.get_flag("blocks_only") {
        result.blocks_image()?
    } else {
        result.to_image()?
    };
    out_img
        .save(&output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    info!("Saved to {}", output.display());

    Ok(())
}
