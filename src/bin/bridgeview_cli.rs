//! CLI tool for bridgeview - renders the diagram as SVG
//!
//! Usage:
//!   bridgeview_cli                                # Default diagram, SVG to stdout
//!   bridgeview_cli config.json -o out.svg         # Configured diagram to file
//!   bridgeview_cli config.json --format json      # Grid and geometry as JSON
//!   bridgeview_cli --format data-uri              # base64 data URI
//!   bridgeview_cli --print-config                 # Effective configuration

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use bridgeview::error::Result;
use bridgeview::render::to_data_uri;
use bridgeview::{Diagram, DiagramConfig};

const USAGE: &str = "Usage: bridgeview_cli [config.json] [-o output] [--format svg|json|data-uri] [--print-config]";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Svg,
    Json,
    DataUri,
}

struct Args {
    config_path: Option<String>,
    output_path: Option<String>,
    format: Format,
    print_config: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Args, String> {
    let mut parsed = Args {
        config_path: None,
        output_path: None,
        format: Format::Svg,
        print_config: false,
        help: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                parsed.output_path = Some(iter.next().ok_or("-o needs a path")?.clone());
            }
            "--format" => {
                parsed.format = match iter.next().map(String::as_str) {
                    Some("svg") => Format::Svg,
                    Some("json") => Format::Json,
                    Some("data-uri") => Format::DataUri,
                    Some(other) => return Err(format!("unknown format: {other}")),
                    None => return Err("--format needs a value".to_string()),
                };
            }
            "--print-config" => parsed.print_config = true,
            "-h" | "--help" => parsed.help = true,
            other if other.starts_with('-') => return Err(format!("unknown flag: {other}")),
            path => {
                if parsed.config_path.is_some() {
                    return Err("only one config file may be given".to_string());
                }
                parsed.config_path = Some(path.to_string());
            }
        }
    }

    Ok(parsed)
}

fn load_config(path: Option<&str>) -> Result<DiagramConfig> {
    match path {
        Some(path) => DiagramConfig::from_json(&fs::read_to_string(path)?),
        None => Ok(DiagramConfig::default()),
    }
}

fn produce(args: &Args) -> Result<String> {
    let config = load_config(args.config_path.as_deref())?;
    if args.print_config {
        return config.to_json_pretty();
    }

    let diagram = Diagram::new(config)?;
    match args.format {
        Format::Svg => diagram.to_svg(),
        Format::Json => Ok(serde_json::to_string_pretty(&diagram.summary()?)?),
        Format::DataUri => Ok(to_data_uri(&diagram.to_svg()?)),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    let output = match produce(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
}
