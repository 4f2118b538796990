//! skos2csv CLI: flatten a SKOS/RDF thesaurus into weighted edge rows.
//!
//! Usage:
//!   skos2csv [options] <source> [target]

use clap::{ArgAction, Parser};
use skos2csv::{ConvertConfig, ConvertError, ConvertResult, Converter, LineEnding};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "skos2csv",
    version,
    about = "Format SKOS/RDF ontology definitions as weighted CSV edges"
)]
struct Cli {
    /// SKOS/RDF XML file to read
    source: PathBuf,
    /// File to write; standard output when omitted
    target: Option<PathBuf>,
    /// YAML file with weights, format and encoding settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Input encoding (UTF8, Cp1252, Latin1, ...); detected when omitted
    #[arg(long, alias = "inputEncoding", value_name = "ENCODING")]
    input_encoding: Option<String>,
    /// Output encoding
    #[arg(long, alias = "outputEncoding", value_name = "ENCODING")]
    output_encoding: Option<String>,
    /// Keep identifiers under the base namespace unshortened
    #[arg(long, alias = "outputFullAboutNs")]
    output_full_about_ns: bool,
    /// Field delimiter (;,| etc.)
    #[arg(long, value_name = "DELIM", allow_hyphen_values = true)]
    delim: Option<String>,
    /// Line terminator
    #[arg(long, value_name = "n|r|rn")]
    endline: Option<LineEnding>,
    /// Weight of skos:exactMatch edges
    #[arg(long, alias = "exactMatch", value_name = "WEIGHT")]
    exact_match: Option<f64>,
    /// Weight of skos:related edges
    #[arg(long, value_name = "WEIGHT")]
    related: Option<f64>,
    /// Weight of skos:broader edges
    #[arg(long, value_name = "WEIGHT")]
    broader: Option<f64>,
    /// Weight of skos:narrower edges
    #[arg(long, value_name = "WEIGHT")]
    narrower: Option<f64>,
    /// Weight of skos:member edges
    #[arg(long, value_name = "WEIGHT")]
    member: Option<f64>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "skos2csv=warn",
        1 => "skos2csv=info",
        _ => "skos2csv=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, overlaid by the config file, overlaid by flags
fn resolve_config(cli: &Cli) -> ConvertResult<ConvertConfig> {
    let mut config = match &cli.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    let weights = &mut config.weights;
    for (flag, slot) in [
        (cli.exact_match, &mut weights.exact_match),
        (cli.related, &mut weights.related),
        (cli.broader, &mut weights.broader),
        (cli.narrower, &mut weights.narrower),
        (cli.member, &mut weights.member),
    ] {
        if let Some(value) = flag {
            *slot = value;
        }
    }

    if let Some(delim) = &cli.delim {
        config.format.delimiter = delim.clone();
    }
    if let Some(endline) = cli.endline {
        config.format.line_ending = endline;
    }
    if cli.output_full_about_ns {
        config.format.output_full_about_ns = true;
    }
    if let Some(label) = &cli.input_encoding {
        config.encoding.input = Some(label.clone());
    }
    if let Some(label) = &cli.output_encoding {
        config.encoding.output = label.clone();
    }
    Ok(config)
}

fn write_output(target: Option<&Path>, bytes: &[u8]) -> ConvertResult<()> {
    match target {
        Some(path) => std::fs::write(path, bytes).map_err(|source| ConvertError::WriteTarget {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Returns the number of skipped top-level elements
fn run(cli: &Cli) -> ConvertResult<usize> {
    let converter = Converter::new(resolve_config(cli)?)?;

    let bytes = std::fs::read(&cli.source).map_err(|source| ConvertError::ReadSource {
        path: cli.source.display().to_string(),
        source,
    })?;
    let conversion = converter.convert_bytes(&bytes)?;
    let encoded = converter.encode(&conversion)?;
    write_output(cli.target.as_deref(), &encoded)?;

    tracing::info!(
        source = %cli.source.display(),
        rows = conversion.rows.len(),
        "converted thesaurus"
    );
    Ok(conversion.skipped)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let code = match run(&cli) {
        Ok(skipped) => {
            eprintln!("skipped: {}", skipped);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    std::process::exit(code);
}
