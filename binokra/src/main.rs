//! Okra command-line tool for checking and converting Okra documents.
//!
//! Usage: okra [OPTIONS] [PATH]...
//!
//! Options:
//!   -f, --from <FORMAT>    Input format (okra, json, yaml, toml, cbor) [default: okra]
//!   -t, --to <FORMAT>      Output format (okra, json, yaml, toml, cbor) [default: json]
//!   -w, --write            Write output next to each input with the output extension
//!   -o, --output <FILE>    Write output to specified file
//!       --check            Check if input is valid (exit 0 if valid, 1 if invalid)
//!   -h, --help             Print help
//!   -V, --version          Print version
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::{Parser, ValueEnum};
use libokra::{parse_document, printer, resolve, scan, stringify, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod transcode;

/// Check and convert Okra documents
#[derive(Parser, Debug)]
#[command(name = "okra")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input files or directories; reads stdin when none are given.
    /// A directory stands for every file in it with the input extension.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value_t = Format::Okra)]
    from: Format,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    to: Format,

    /// Write output next to each input with the output extension
    #[arg(short, long, conflicts_with = "output")]
    write: bool,

    /// Write output to specified file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Check if input is valid without writing any output
    #[arg(long)]
    check: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Okra,
    Json,
    #[value(alias = "yml")]
    Yaml,
    Toml,
    Cbor,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Okra => "okra",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Cbor => "cbor",
        }
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    if run(&cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Process every input; returns false if any of them failed.
fn run(cli: &Cli) -> bool {
    let inputs = match collect_inputs(&cli.paths, cli.from) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };

    if cli.output.is_some() && inputs.len() > 1 {
        eprintln!("Error: --output cannot be used with more than one input");
        return false;
    }
    if cli.write && inputs.iter().any(Option::is_none) {
        eprintln!("Error: --write requires an input file");
        return false;
    }

    let mut ok = true;
    for input in &inputs {
        ok &= process_input(cli, input.as_deref());
    }
    ok
}

/// Expand directories into their matching files. `None` stands for stdin.
fn collect_inputs(paths: &[PathBuf], from: Format) -> io::Result<Vec<Option<PathBuf>>> {
    if paths.is_empty() {
        return Ok(vec![None]);
    }

    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(Some(path.clone()));
            continue;
        }
        let mut found: Vec<PathBuf> = fs::read_dir(path)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == from.extension()))
            .collect();
        found.sort();
        tracing::debug!(dir = %path.display(), files = found.len(), "expanded directory");
        inputs.extend(found.into_iter().map(Some));
    }
    Ok(inputs)
}

fn process_input(cli: &Cli, path: Option<&Path>) -> bool {
    let name = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    tracing::debug!(input = %name, from = ?cli.from, to = ?cli.to, "processing");

    let bytes = match read_input(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {}", name, e);
            return false;
        }
    };

    let value = match decode(cli.from, &name, &bytes) {
        Ok(value) => value,
        Err(message) => {
            eprint!("{}", message);
            return false;
        }
    };

    if cli.check {
        println!("{}: ok", name);
        return true;
    }

    let output = match encode(cli.to, &value) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}: {}", name, e);
            return false;
        }
    };

    match write_output(cli, path, &output) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error writing {}: {}", name, e);
            false
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Decode input bytes. The error is the complete text to print.
fn decode(format: Format, name: &str, bytes: &[u8]) -> Result<Value, String> {
    let decoded = match format {
        Format::Okra => return decode_okra(name, utf8(name, bytes)?),
        Format::Json => transcode::json::decode(utf8(name, bytes)?),
        Format::Yaml => transcode::yaml::decode(utf8(name, bytes)?),
        Format::Toml => transcode::toml::decode(utf8(name, bytes)?),
        Format::Cbor => transcode::cbor::decode(bytes),
    };
    decoded.map_err(|e| format!("{}: {}\n", name, e))
}

fn utf8<'a>(name: &str, bytes: &'a [u8]) -> Result<&'a str, String> {
    std::str::from_utf8(bytes).map_err(|e| format!("{}: input is not valid UTF-8: {}\n", name, e))
}

/// Every parse error is reported, each with its source excerpt.
fn decode_okra(name: &str, source: &str) -> Result<Value, String> {
    let document = parse_document(&scan(source));
    if document.is_ok() {
        return Ok(resolve(&document));
    }
    Err(document
        .errors
        .iter()
        .map(|err| printer::diagnostic(name, source, err))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn encode(format: Format, value: &Value) -> Result<Vec<u8>, String> {
    let text = match format {
        Format::Okra => stringify(value).map_err(|e| e.to_string())?,
        Format::Json => transcode::json::encode(value)?,
        Format::Yaml => transcode::yaml::encode(value)?,
        Format::Toml => transcode::toml::encode(value)?,
        Format::Cbor => return Ok(transcode::cbor::encode(value)),
    };
    let mut bytes = text.into_bytes();
    if bytes.last().is_some_and(|b| *b != b'\n') {
        bytes.push(b'\n');
    }
    Ok(bytes)
}

fn write_output(cli: &Cli, input: Option<&Path>, output: &[u8]) -> io::Result<()> {
    if let Some(path) = &cli.output {
        return fs::write(path, output);
    }
    if cli.write {
        if let Some(input) = input {
            let target = input.with_extension(cli.to.extension());
            tracing::debug!(target = %target.display(), "writing");
            return fs::write(target, output);
        }
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(output)?;
    stdout.flush()
}
