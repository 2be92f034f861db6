use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector2;
use planar_hull::assemble::divide_and_conquer;
use planar_hull::sample::{sample_points, ReplayToken, SampleCfg};
use planar_hull::{convex_hull, dedup_points, validate_points, Algorithm, Edge, HullShape};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::Origin;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Convex hull runner: sample point sets, compute hulls, record provenance")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algo {
    GiftWrap,
    DivideConquer,
}

impl From<Algo> for Algorithm {
    fn from(a: Algo) -> Self {
        match a {
            Algo::GiftWrap => Algorithm::GiftWrap,
            Algo::DivideConquer => Algorithm::DivideConquer,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Compute a hull from a CSV/Parquet file with `x` and `y` columns
    Run {
        #[arg(long, value_enum, default_value_t = Algo::DivideConquer)]
        algo: Algo,
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Write a random point set (uniform box, minimum separation) as CSV
    Sample {
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 30)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 12.0)]
        min_separation: f64,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 450.0)]
        height: f64,
        /// Draw real-valued coordinates instead of integers
        #[arg(long)]
        continuous: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run { algo, input, out } => run(algo, &input, &out, cmd.tag),
        Action::Sample {
            out,
            count,
            seed,
            min_separation,
            width,
            height,
            continuous,
        } => {
            let cfg = SampleCfg {
                count,
                width,
                height,
                min_separation,
                integral: !continuous,
            };
            sample(cfg, seed, &out, cmd.tag)
        }
        Action::Report => report(cmd.tag),
    }
}

/// JSON document written by `run`.
#[derive(Debug, Serialize)]
struct HullReport {
    algo: &'static str,
    input_points: usize,
    distinct_points: usize,
    shape: &'static str,
    area: f64,
    vertices: Vec<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_edges: Option<Vec<[[f64; 2]; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_edges: Option<Vec<[[f64; 2]; 2]>>,
}

fn run(algo: Algo, input: &str, out: &str, tag: Option<String>) -> Result<()> {
    tracing::info!(algo = ?algo, input, out, tag = ?tag, "run");
    let raw = read_points(input)?;
    let input_points = raw.len();
    let pts = dedup_points(raw);
    if pts.len() < input_points {
        tracing::info!(dropped = input_points - pts.len(), "duplicate points removed");
    }
    validate_points(&pts).with_context(|| format!("validating points from {input}"))?;

    let (shape, upper, lower) = match algo {
        Algo::GiftWrap => (convex_hull(&pts, algo.into())?, None, None),
        Algo::DivideConquer => {
            let dc = divide_and_conquer(&pts);
            let shape = dc.to_shape()?;
            (
                shape,
                Some(edge_rows(&dc.upper.edges)),
                Some(edge_rows(&dc.lower.edges)),
            )
        }
    };
    let report = HullReport {
        algo: Algorithm::from(algo).name(),
        input_points,
        distinct_points: pts.len(),
        shape: shape_name(&shape),
        area: shape.area(),
        vertices: shape.vertices().iter().map(|p| [p.x, p.y]).collect(),
        upper_edges: upper,
        lower_edges: lower,
    };
    tracing::info!(
        shape = report.shape,
        vertices = report.vertices.len(),
        area = report.area,
        "hull computed"
    );

    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {out}"))?;
    provenance::record(
        Path::new(out),
        tag.as_deref(),
        &Origin::Run {
            algo: report.algo,
            input: input.to_string(),
            input_points,
            distinct_points: report.distinct_points,
            shape: report.shape,
            hull_vertices: report.vertices.len(),
        },
    )?;
    Ok(())
}

fn sample(cfg: SampleCfg, seed: u64, out: &str, tag: Option<String>) -> Result<()> {
    tracing::info!(count = cfg.count, seed, out, tag = ?tag, "sample");
    let pts = sample_points(cfg, ReplayToken::new(seed))?;
    tracing::info!(accepted = pts.len(), requested = cfg.count, "points sampled");
    let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;

    ensure_parent(out)?;
    let mut file = std::fs::File::create(out).with_context(|| format!("creating {out}"))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {out}"))?;
    provenance::record(
        Path::new(out),
        tag.as_deref(),
        &Origin::Sample {
            seed,
            requested: cfg.count,
            accepted: pts.len(),
            width: cfg.width,
            height: cfg.height,
            min_separation: cfg.min_separation,
            integral: cfg.integral,
        },
    )?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "engine_version": planar_hull::VERSION,
        "tag": tag,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Read `x`/`y` columns from CSV (default) or Parquet (`.parquet`).
fn read_points(input: &str) -> Result<Vec<Vector2<f64>>> {
    let lf = if input.ends_with(".parquet") {
        LazyFrame::scan_parquet(input, ScanArgsParquet::default())
            .with_context(|| format!("scanning {input}"))?
    } else {
        LazyCsvReader::new(input)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("scanning {input}"))?
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns from {input}"))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_shape");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut pts = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => pts.push(Vector2::new(x, y)),
            _ => bail!("{input}: row {row} has a missing coordinate"),
        }
    }
    Ok(pts)
}

fn edge_rows(edges: &[Edge]) -> Vec<[[f64; 2]; 2]> {
    let mut rows: Vec<[[f64; 2]; 2]> = edges
        .iter()
        .map(|e| [[e.left.x, e.left.y], [e.right.x, e.right.y]])
        .collect();
    rows.sort_by(|a, b| a[0][0].total_cmp(&b[0][0]));
    rows
}

fn shape_name(shape: &HullShape) -> &'static str {
    match shape {
        HullShape::Point(_) => "point",
        HullShape::Segment(..) => "segment",
        HullShape::Polygon(_) => "polygon",
    }
}

fn ensure_parent(out: &str) -> Result<()> {
    if let Some(parent) = Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
