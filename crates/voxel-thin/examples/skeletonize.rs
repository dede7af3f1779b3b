//! Example: skeletonize a binary PNG.
//!
//! Every non-zero pixel of the grayscale-converted input is foreground. The
//! skeleton voxel coordinates and the thinning report are written to a JSON
//! file next to the input image. Timing is printed to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p voxel-thin --example skeletonize -- --help
//!   cargo run -p voxel-thin --example skeletonize -- --input shape.png

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use serde::Serialize;
use voxel_thin::{ThinningConfig, ThinningEngine, VoxelGrid, summarize};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Thin the foreground of a binary image to its skeleton")]
struct Args {
    /// Binary (or grayscale, thresholded at > 0) PNG
    #[arg(long)]
    input: PathBuf,

    /// Stop after this many six-direction cycles
    #[arg(long)]
    max_cycles: Option<usize>,

    /// Output JSON path (default: <input stem>_skeleton.json next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SkeletonResult {
    width: usize,
    height: usize,
    /// Wall-clock thinning time, in milliseconds.
    elapsed_ms: f64,
    cycles: usize,
    deleted: usize,
    converged: bool,
    components: usize,
    holes: usize,
    points: Vec<[usize; 2]>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn default_out_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_skeleton.json"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_out_path(&args.input));

    let gray = ImageReader::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?
        .decode()
        .with_context(|| format!("decoding {}", args.input.display()))?
        .into_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    let mut grid = VoxelGrid::from_nonzero(width, height, 1, gray.as_raw())
        .context("binarizing input")?;
    println!(
        "loaded {}: {width}x{height}, {} foreground pixels",
        args.input.display(),
        grid.count_foreground()
    );

    let cfg = ThinningConfig {
        max_cycles: args.max_cycles,
        ..ThinningConfig::default()
    };

    let t0 = Instant::now();
    let report = ThinningEngine::new().thin(&mut grid, &cfg);
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let topology = summarize(&grid);
    println!(
        "thinned in {elapsed_ms:.2} ms: {} cycles, {} deleted, {} left",
        report.cycles, report.deleted, topology.foreground
    );

    let result = SkeletonResult {
        width,
        height,
        elapsed_ms,
        cycles: report.cycles,
        deleted: report.deleted,
        converged: report.converged(),
        components: topology.components,
        holes: topology.cavities,
        points: grid.iter_foreground().map(|[x, y, _]| [x, y]).collect(),
    };

    let out_file = std::fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    serde_json::to_writer_pretty(out_file, &result)
        .with_context(|| format!("writing JSON to {}", out_path.display()))?;

    println!("results written to {}", out_path.display());
    Ok(())
}
