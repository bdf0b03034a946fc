use crate::config::{Config, checked_gap, load_config};
use crate::layout::place_canvas;
use crate::model::Canvas;
use crate::render::{render_svg, write_output_svg};
use crate::report::write_report;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "canvas-place",
    version,
    about = "Place pending canvas nodes and push overlapping siblings aside"
)]
pub struct Args {
    /// Input canvas document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for JSON and SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config file (JSON5): gap, maxIterations, sizes, render
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Override the spacing between placed nodes
    #[arg(long = "gap")]
    pub gap: Option<f64>,

    /// Override the chain-push iteration bound
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<usize>,

    /// Write a JSON placement report to this path
    #[arg(long = "report")]
    pub report: Option<PathBuf>,

    /// Log placement decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;
    let input = read_input(args.input.as_deref())?;
    let canvas = Canvas::from_json(&input)?;
    let placed = place_canvas(&canvas, &config.placement);

    if let Some(path) = args.report.as_deref() {
        write_report(path, &placed)?;
    }

    match args.output_format {
        OutputFormat::Json => {
            let json = placed.canvas.to_json_pretty()?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        OutputFormat::Svg => {
            let svg = render_svg(&placed.canvas, &config.placement.catalog, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&placed.canvas, &config, &args.output)?,
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(canvas: &Canvas, config: &Config, output: &Option<PathBuf>) -> Result<()> {
    let output = ensure_output(output, "png")?;
    let svg = render_svg(canvas, &config.placement.catalog, &config.render);
    crate::render::write_output_png(&svg, &output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_canvas: &Canvas, _config: &Config, _output: &Option<PathBuf>) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(gap) = args.gap {
        config.placement.gap = checked_gap("--gap", gap)?;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.placement.max_iterations = max_iterations;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
