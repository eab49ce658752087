use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use miette::*;
use tracing_subscriber::EnvFilter;

use label_anchor::select::DEFAULT_MAX_ASPECT_RATIO;
use label_anchor::{compute_anchors, parse_shapes, Anchor, AnchorOptions, CoverageCheck, SelectionPolicy};

/// Computes label anchors for the shapes listed in a file (or stdin).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Shape list, one `name: x,y x,y ...` per line; `-` or nothing reads stdin
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Close enclosed holes before solving
    #[arg(long)]
    fill_holes: bool,

    /// Always answer with the largest square
    #[arg(long)]
    prefer_square: bool,

    /// Check every covered cell instead of corners and center
    #[arg(long)]
    exhaustive: bool,

    /// Tallest accepted height-to-width ratio of a rectangle
    #[arg(long, value_name = "RATIO", default_value_t = DEFAULT_MAX_ASPECT_RATIO, value_parser = positive_ratio)]
    max_aspect: f64,
}

impl Cli {
    fn options(&self) -> AnchorOptions {
        AnchorOptions {
            fill_holes: self.fill_holes,
            prefer_square: self.prefer_square,
            policy: SelectionPolicy {
                max_aspect_ratio: self.max_aspect,
                coverage: if self.exhaustive {
                    CoverageCheck::Exhaustive
                } else {
                    CoverageCheck::Sampled
                },
            },
        }
    }
}

fn positive_ratio(value: &str) -> Result<f64, String> {
    let ratio: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("must be a positive finite number, got {value}"))
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// `<name>\t<cx>,<cy>\t<h>x<w>\t<kind>`
fn format_line(name: &str, anchor: &Anchor) -> String {
    format!(
        "{name}\t{},{}\t{}x{}\t{}",
        anchor.center.x, anchor.center.y, anchor.size.x, anchor.size.y, anchor.kind
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let input = read_input(cli.path.as_ref())?;
    let shapes = parse_shapes(&input)?;

    let mut failed = 0;
    for (name, result) in compute_anchors(&shapes, &cli.options()) {
        match result {
            Ok(anchor) => println!("{}", format_line(name, &anchor)),
            Err(err) => {
                eprintln!("{name}: {:?}", Report::new(err));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} shapes have no anchor", shapes.len());
    }
    Ok(())
}
