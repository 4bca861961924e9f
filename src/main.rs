//! Headless driver for the poprev annotation store.
//!
//! Every command loads what it needs, performs one operation and writes its
//! result to disk. Grid coordinates are zero-based.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use poprev::config::AppConfig;
use poprev::cursor::parse_steps;
use poprev::data::{ImageCodec, StandardImageCodec};
use poprev::format::with_drawing_extension;
use poprev::geometry;
use poprev::model::{RasterView, raster};
use poprev::{AnnotationStore, Cursor, Label, Step};

#[derive(Parser, Debug)]
#[command(name = "poprev", version, about = "Pixel grid annotation tool")]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a blank drawing.
    New {
        /// Output drawing path (`.poprev` is appended when it has no extension).
        out: PathBuf,
    },
    /// Set the label of one cell and save.
    Edit {
        drawing: PathBuf,
        x: usize,
        y: usize,
        /// Single digit 0-9.
        #[arg(value_parser = clap::value_parser!(u8).range(0..=9))]
        label: u8,
    },
    /// Apply a sequence of steps starting at a cell, then save.
    ///
    /// A single digit labels the focus cell and advances to the next cell; a
    /// direction (north/east/south/west) moves the focus without labelling.
    /// All steps are checked before the first one is applied.
    Annotate {
        drawing: PathBuf,
        /// Starting cell as `X Y`.
        #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values_t = [0, 0])]
        at: Vec<usize>,
        steps: Vec<String>,
    },
    /// Print grid size and label counts.
    Info { drawing: PathBuf },
    /// Render the drawing to an image.
    Export {
        drawing: PathBuf,
        out: PathBuf,
        /// Pixels per cell.
        #[arg(long, default_value_t = 1)]
        scale: usize,
    },
    /// Render the drawing with one cell highlighted.
    Preview {
        drawing: PathBuf,
        x: usize,
        y: usize,
        out: PathBuf,
        /// Pixels per cell (defaults to the configured preview scale).
        #[arg(long)]
        scale: Option<usize>,
    },
    /// Render the neighbourhood of a cell in a reference image.
    Context {
        reference: PathBuf,
        x: usize,
        y: usize,
        out: PathBuf,
        /// Neighbourhood radius in cells.
        #[arg(long)]
        level: Option<usize>,
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
    },
    /// Extract the region of a reference image covered by one cell.
    Sector {
        reference: PathBuf,
        x: usize,
        y: usize,
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level.to_level_filter()
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.cmd {
        Command::New { out } => cmd_new(&config, &out),
        Command::Edit {
            drawing,
            x,
            y,
            label,
        } => cmd_edit(&config, &drawing, x, y, label),
        Command::Annotate { drawing, at, steps } => cmd_annotate(&config, &drawing, &at, &steps),
        Command::Info { drawing } => cmd_info(&config, &drawing),
        Command::Export {
            drawing,
            out,
            scale,
        } => cmd_export(&config, &drawing, &out, scale),
        Command::Preview {
            drawing,
            x,
            y,
            out,
            scale,
        } => cmd_preview(&config, &drawing, x, y, &out, scale),
        Command::Context {
            reference,
            x,
            y,
            out,
            level,
            width,
            height,
        } => {
            let level = level.unwrap_or(config.view.context_level);
            let width = width.unwrap_or(config.view.reference_width);
            let height = height.unwrap_or(config.view.reference_height);
            cmd_context(&config, &reference, (x, y), &out, level, (width, height))
        }
        Command::Sector {
            reference,
            x,
            y,
            out,
        } => cmd_sector(&config, &reference, x, y, &out),
    }
}

fn store_for(config: &AppConfig) -> AnnotationStore {
    AnnotationStore::with_size(config.grid_size(), config.palette())
}

fn open_drawing(config: &AppConfig, path: &Path) -> anyhow::Result<AnnotationStore> {
    let mut store = store_for(config);
    store
        .load(path)
        .with_context(|| format!("load drawing '{}'", path.display()))?;
    Ok(store)
}

fn open_reference(config: &AppConfig, path: &Path) -> anyhow::Result<AnnotationStore> {
    let mut store = store_for(config);
    store
        .load_reference(path)
        .with_context(|| format!("load reference '{}'", path.display()))?;
    Ok(store)
}

/// Encode `raster`, upscaled by `scale` pixels per source pixel.
fn write_scaled(raster: RasterView<'_>, scale: usize, out: &Path) -> anyhow::Result<()> {
    let codec = StandardImageCodec;
    anyhow::ensure!(
        codec.supports(out),
        "unsupported image format '{}' (expected one of: {})",
        out.display(),
        codec.extensions().join(", ")
    );

    let (width, height) = scaled_size(&raster, scale)?;
    let scaled = geometry::resize_nearest(raster, width, height).context("nothing to render")?;

    codec
        .encode(scaled.view(), out)
        .with_context(|| format!("write image '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

/// Raster size after upscaling by `scale`, refusing sizes that overflow.
fn scaled_size(raster: &RasterView<'_>, scale: usize) -> anyhow::Result<(usize, usize)> {
    raster::width(raster)
        .checked_mul(scale)
        .zip(raster::height(raster).checked_mul(scale))
        .with_context(|| format!("scale {} is too large", scale))
}

fn cmd_new(config: &AppConfig, out: &Path) -> anyhow::Result<()> {
    let out = with_drawing_extension(out);
    let mut store = store_for(config);
    store
        .save_as(&out)
        .with_context(|| format!("write drawing '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_edit(config: &AppConfig, drawing: &Path, x: usize, y: usize, label: u8) -> anyhow::Result<()> {
    let mut store = open_drawing(config, drawing)?;
    store.edit(x, y, Label(label))?;
    store.save()?;
    Ok(())
}

fn cmd_annotate(
    config: &AppConfig,
    drawing: &Path,
    at: &[usize],
    steps: &[String],
) -> anyhow::Result<()> {
    let steps = parse_steps(steps)?;
    let mut store = open_drawing(config, drawing)?;
    let mut cursor = Cursor::new(store.size());
    if let [x, y] = at {
        cursor.jump_to(*x, *y)?;
    }

    for step in steps {
        match step {
            Step::Label(label) => {
                let (x, y) = cursor.position();
                store.edit(x, y, label)?;
                cursor.advance();
            }
            Step::Move(direction) => cursor.step(direction),
        }
    }

    store.save()?;
    let (x, y) = cursor.position();
    println!("{} {}", x, y);
    Ok(())
}

fn cmd_info(config: &AppConfig, drawing: &Path) -> anyhow::Result<()> {
    let store = open_drawing(config, drawing)?;
    let size = store.size();
    println!("{}x{} cells", size.width, size.height);
    for (label, count) in store.label_counts() {
        println!("{}: {}", label, count);
    }
    println!("unlabelled: {}", store.unknown_remaining());
    Ok(())
}

fn cmd_export(config: &AppConfig, drawing: &Path, out: &Path, scale: usize) -> anyhow::Result<()> {
    let store = open_drawing(config, drawing)?;
    if scale <= 1 {
        store
            .export(out)
            .with_context(|| format!("export '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
        return Ok(());
    }
    write_scaled(store.rendered(), scale, out)
}

fn cmd_preview(
    config: &AppConfig,
    drawing: &Path,
    x: usize,
    y: usize,
    out: &Path,
    scale: Option<usize>,
) -> anyhow::Result<()> {
    let store = open_drawing(config, drawing)?;
    let preview = store.preview(x, y)?;
    let scale = scale.unwrap_or(config.view.preview_scale).max(1);
    write_scaled(preview.view(), scale, out)
}

fn cmd_context(
    config: &AppConfig,
    reference: &Path,
    (x, y): (usize, usize),
    out: &Path,
    level: usize,
    (width, height): (usize, usize),
) -> anyhow::Result<()> {
    let store = open_reference(config, reference)?;
    let context = store.reference_context(x, y, width, height, level)?;
    write_scaled(context.view(), 1, out)
}

fn cmd_sector(config: &AppConfig, reference: &Path, x: usize, y: usize, out: &Path) -> anyhow::Result<()> {
    let store = open_reference(config, reference)?;
    let sector = store.reference_sector(x, y)?;
    write_scaled(sector, 1, out)
}
