use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vt_core::VoxelGrid;
use vt_thin::{ThinningConfig, ThinningEngine, ThinningReport, ThinningState};
use vt_topology::{TopologySummary, summarize};

#[derive(Parser, Debug)]
#[command(name = "vt_gallery")]
#[command(about = "Run voxel-thin algorithms on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Thin a single binary image.
    #[command(name = "thin")]
    Thin(ThinArgs),
    /// Stack equally sized images as z-planes and thin the volume.
    #[command(name = "thin_stack")]
    ThinStack(StackArgs),
}

#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Stop after this many full six-direction cycles.
    #[arg(long)]
    max_cycles: Option<usize>,
    /// Allow the last voxel of a component to be deleted.
    #[arg(long, default_value_t = false)]
    no_isolation_guard: bool,
}

impl EngineArgs {
    fn config(&self) -> ThinningConfig {
        ThinningConfig {
            max_cycles: self.max_cycles,
            guard_isolated: !self.no_isolation_guard,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ThinArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long)]
    truth: Option<PathBuf>,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug, Clone)]
struct StackArgs {
    /// Slice images, bottom plane first.
    #[arg(long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,
    #[arg(long)]
    truth: Option<PathBuf>,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
    /// Thin each slice as its own 2D image instead of the whole volume.
    #[arg(long, default_value_t = false)]
    per_plane: bool,
    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TruthEnvelope {
    case: String,
    width: usize,
    height: usize,
    #[serde(default)]
    depth: Option<usize>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct TopologyDto {
    foreground: usize,
    components: usize,
    cavities: usize,
}

#[derive(Debug, Clone, Serialize)]
struct ReportDto {
    cycles: usize,
    passes: usize,
    deleted: usize,
    rolled_back: usize,
    converged: bool,
    next_pass: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaThin {
    mode: &'static str,
    width: usize,
    height: usize,
    depth: usize,
    pixel_rule: &'static str,
    max_cycles: Option<usize>,
    guard_isolated: bool,
    elapsed_ms: f64,
    reports: Vec<ReportDto>,
    before: TopologyDto,
    after: TopologyDto,
    topology_preserved: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Thin(args) => run_thin(args),
        Command::ThinStack(args) => run_thin_stack(args),
    }
}

fn run_thin(args: ThinArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let case_dir = prepare_case_dir(&args.out, "thin")?;
    let grid = load_plane(&args.input)?;
    if let Some(truth) = &args.truth {
        validate_truth(truth, "thin", &grid)?;
    }
    copy_into(&args.input, &case_dir.join("input.png"))?;

    let cfg = args.engine.config();
    let before = summarize(&grid);
    let mut skeleton = grid.clone();

    let t0 = Instant::now();
    let report = ThinningEngine::new().thin(&mut skeleton, &cfg);
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let after = summarize(&skeleton);
    info!(
        input = %args.input.display(),
        deleted = report.deleted,
        remaining = after.foreground,
        elapsed_ms,
        "thinned image"
    );

    save_plane(case_dir.join("skeleton.png"), &skeleton)?;
    save_rgb(case_dir.join("overlay.png"), &render_overlay(&grid, &skeleton))?;

    write_json(
        case_dir.join("meta.json"),
        &MetaThin {
            mode: "2d",
            width: grid.width(),
            height: grid.height(),
            depth: 1,
            pixel_rule: "binary pixel set iff value > 0",
            max_cycles: cfg.max_cycles,
            guard_isolated: cfg.guard_isolated,
            elapsed_ms,
            reports: vec![report_dto(&report)],
            before: topology_dto(&before),
            after: topology_dto(&after),
            topology_preserved: before.same_topology(&after),
        },
    )?;

    Ok(())
}

fn run_thin_stack(args: StackArgs) -> Result<()> {
    for path in &args.input {
        ensure_file_exists(path, "input")?;
    }
    let case_dir = prepare_case_dir(&args.out, "thin_stack")?;
    let mut volume = load_stack(&args.input)?;
    if let Some(truth) = &args.truth {
        validate_truth(truth, "thin_stack", &volume)?;
    }

    let cfg = args.engine.config();
    let before = summarize(&volume);
    let mut engine = ThinningEngine::new();

    let t0 = Instant::now();
    let reports = if args.per_plane {
        engine.thin_planes(&mut volume, &cfg)?
    } else {
        vec![engine.thin(&mut volume, &cfg)]
    };
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let after = summarize(&volume);
    info!(
        planes = volume.depth(),
        per_plane = args.per_plane,
        remaining = after.foreground,
        elapsed_ms,
        "thinned stack"
    );

    for z in 0..volume.depth() {
        let plane = volume.plane(z)?;
        save_plane(case_dir.join(format!("skeleton_{z:03}.png")), &plane)?;
    }

    write_json(
        case_dir.join("meta.json"),
        &MetaThin {
            mode: if args.per_plane { "per_plane" } else { "3d" },
            width: volume.width(),
            height: volume.height(),
            depth: volume.depth(),
            pixel_rule: "binary voxel set iff value > 0",
            max_cycles: cfg.max_cycles,
            guard_isolated: cfg.guard_isolated,
            elapsed_ms,
            reports: reports.iter().map(report_dto).collect(),
            before: topology_dto(&before),
            after: topology_dto(&after),
            topology_preserved: before.same_topology(&after),
        },
    )?;

    Ok(())
}

fn prepare_case_dir(out: &Path, case_name: &str) -> Result<PathBuf> {
    let case_dir = out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;
    Ok(case_dir)
}

fn copy_into(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .map(|_| ())
        .with_context(|| format!("copying {} -> {}", from.display(), to.display()))
}

fn load_plane(path: &Path) -> Result<VoxelGrid> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    VoxelGrid::from_nonzero(w as usize, h as usize, 1, luma.as_raw())
        .with_context(|| format!("binarizing {}", path.display()))
}

fn load_stack(paths: &[PathBuf]) -> Result<VoxelGrid> {
    let mut planes = Vec::with_capacity(paths.len());
    for path in paths {
        let plane = load_plane(path)?;
        if let Some(first) = planes.first()
            && !same_plane_size(first, &plane)
        {
            bail!(
                "slice {} is {}x{}, expected {}x{}.",
                path.display(),
                plane.width(),
                plane.height(),
                first.width(),
                first.height()
            );
        }
        planes.push(plane);
    }

    let Some(first) = planes.first() else {
        bail!("no input slices given.");
    };
    let mut volume = VoxelGrid::new(first.width(), first.height(), planes.len())
        .context("allocating volume")?;
    for (z, plane) in planes.iter().enumerate() {
        volume.set_plane(z, plane)?;
    }
    Ok(volume)
}

fn same_plane_size(a: &VoxelGrid, b: &VoxelGrid) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn validate_truth(path: &Path, case_name: &str, grid: &VoxelGrid) -> Result<()> {
    ensure_file_exists(path, "truth")?;
    let truth: TruthEnvelope =
        read_json(path).with_context(|| format!("reading truth json at {}", path.display()))?;

    if truth.case != case_name {
        bail!(
            "truth case mismatch: expected '{}', got '{}'.",
            case_name,
            truth.case
        );
    }
    let depth = truth.depth.unwrap_or(1);
    if truth.width != grid.width() || truth.height != grid.height() || depth != grid.depth() {
        bail!(
            "truth dimensions ({}, {}, {}) do not match input dimensions ({}, {}, {}).",
            truth.width,
            truth.height,
            depth,
            grid.width(),
            grid.height(),
            grid.depth()
        );
    }
    Ok(())
}

fn report_dto(report: &ThinningReport) -> ReportDto {
    let next_pass = match report.state {
        ThinningState::Converged => None,
        ThinningState::Running { direction, cycle } => {
            Some(format!("{} (cycle {})", direction.name(), cycle))
        }
    };

    ReportDto {
        cycles: report.cycles,
        passes: report.passes,
        deleted: report.deleted,
        rolled_back: report.rolled_back,
        converged: report.converged(),
        next_pass,
    }
}

fn topology_dto(s: &TopologySummary) -> TopologyDto {
    TopologyDto {
        foreground: s.foreground,
        components: s.components,
        cavities: s.cavities,
    }
}

fn save_plane(path: PathBuf, plane: &VoxelGrid) -> Result<()> {
    let gray = GrayImage::from_raw(plane.width() as u32, plane.height() as u32, plane.to_u8(255))
        .context("constructing GrayImage from voxel plane")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_rgb(path: PathBuf, img: &RgbImage) -> Result<()> {
    img.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn render_overlay(input: &VoxelGrid, skeleton: &VoxelGrid) -> RgbImage {
    let mut out = RgbImage::new(input.width() as u32, input.height() as u32);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let (xi, yi) = (x as isize, y as isize);
        *px = if skeleton.get(xi, yi, 0) {
            Rgb([255, 40, 40])
        } else if input.get(xi, yi, 0) {
            Rgb([90, 90, 90])
        } else {
            Rgb([0, 0, 0])
        };
    }
    out
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
