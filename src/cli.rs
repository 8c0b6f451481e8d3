use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vecshape_designer::{HandleId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "vecshape", version, about = "Move, scale and rotate vector shape elements")]
pub struct Cli {
    /// Engine configuration file (.toml or .json)
    #[arg(long, global = true, env = "VECSHAPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the screen bounding box and drag handles of an element
    Bbox {
        /// Element JSON file, `-` for stdin
        #[arg(long, default_value = "-")]
        element: PathBuf,

        /// Local-to-screen matrix `a,b,c,d,e,f`
        #[arg(long, value_parser = parse_matrix, default_value = "1,0,0,1,0,0")]
        matrix: [f64; 6],
    },

    /// Drag a handle from one screen point to another and print the result
    Apply {
        #[arg(long, default_value = "-")]
        element: PathBuf,

        #[arg(long, value_parser = parse_matrix, default_value = "1,0,0,1,0,0")]
        matrix: [f64; 6],

        /// move, n, s, e, w, nw, ne, sw, se or point:<index>
        #[arg(long, value_parser = parse_handle)]
        handle: HandleId,

        /// Pointer-down position `x,y`
        #[arg(long, value_parser = parse_point)]
        from: Point,

        /// Pointer-up position `x,y`
        #[arg(long, value_parser = parse_point)]
        to: Point,

        /// Hold the rotate modifier (corner handles rotate)
        #[arg(long)]
        rotate: bool,

        /// Hold the aspect modifier (corner handles keep proportions)
        #[arg(long)]
        lock_aspect: bool,
    },

    /// Normalize path data to absolute commands
    Path {
        data: String,

        #[arg(long)]
        decimals: Option<u32>,
    },
}

fn parse_numbers<const N: usize>(raw: &str) -> Result<[f64; N], String> {
    let values = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| format!("'{}': {}", s, e)))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {} comma-separated numbers, got {}", N, v.len()))
}

fn parse_matrix(raw: &str) -> Result<[f64; 6], String> {
    parse_numbers::<6>(raw)
}

fn parse_point(raw: &str) -> Result<Point, String> {
    parse_numbers::<2>(raw).map(|[x, y]| Point::new(x, y))
}

fn parse_handle(raw: &str) -> Result<HandleId, String> {
    raw.parse::<HandleId>().map_err(|e| e.to_string())
}
