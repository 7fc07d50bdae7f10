//! LTF command-line tool for checking LTF documents and reading typed values.
//!
//! Usage: ltf [OPTIONS] [FILE] [KEY...]
//!
//! Options:
//!   -t, --type <TYPE>      Decode values as (auto, bool, int, float, string) [default: auto]
//!   -m, --max-len <N>      String capacity in UTF-16 code units, terminator included [default: 1024]
//!   -f, --format <FORMAT>  Output format (text, toml, yaml) [default: text]
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Check that FILE loads (exit 0 if valid, 1 if invalid)
//!   -v, --verbose          Log lookups to stderr
//!   -h, --help             Print help
//!   -V, --version          Print version

use libltf::{load, parse_bytes, Document, LoadError, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod transcode;

const DEFAULT_MAX_LEN: usize = 1024;

/// Type requested with `--type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueType {
    Auto,
    Bool,
    Int,
    Float,
    String,
}

fn parse_value_type(s: &str) -> Option<ValueType> {
    match s {
        "auto" => Some(ValueType::Auto),
        "bool" | "boolean" => Some(ValueType::Bool),
        "int" | "integer" => Some(ValueType::Int),
        "float" | "double" => Some(ValueType::Float),
        "string" | "str" => Some(ValueType::String),
        _ => None,
    }
}

/// Output format requested with `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Toml,
    Yaml,
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s {
        "text" | "txt" | "ltf" => Some(OutputFormat::Text),
        "toml" => Some(OutputFormat::Toml),
        "yaml" | "yml" => Some(OutputFormat::Yaml),
        _ => None,
    }
}

/// Everything the command line asked for. Built once in `main`.
#[derive(Debug, PartialEq)]
struct Options {
    /// `None` reads stdin.
    input_path: Option<String>,
    keys: Vec<String>,
    value_type: ValueType,
    max_len: usize,
    format: OutputFormat,
    output_file: Option<String>,
    check_only: bool,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_path: None,
            keys: Vec::new(),
            value_type: ValueType::Auto,
            max_len: DEFAULT_MAX_LEN,
            format: OutputFormat::Text,
            output_file: None,
            check_only: false,
            verbose: false,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Ok(Command::Version) => {
            println!("ltf {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_logging(options.verbose);
    process::exit(run(&options));
}

/// Send `tracing` output to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-t" | "--type" => {
                i += 1;
                let value = args.get(i).ok_or("-t requires a type argument")?;
                options.value_type =
                    parse_value_type(value).ok_or_else(|| format!("Unknown type: {}", value))?;
            }
            "-m" | "--max-len" => {
                i += 1;
                let value = args.get(i).ok_or("--max-len requires a number")?;
                options.max_len = value
                    .parse()
                    .map_err(|_| format!("Invalid --max-len: {}", value))?;
            }
            "-f" | "--format" => {
                i += 1;
                let value = args.get(i).ok_or("-f requires a format argument")?;
                options.format =
                    parse_format(value).ok_or_else(|| format!("Unknown format: {}", value))?;
            }
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).ok_or("--output requires an argument")?;
                options.output_file = Some(value.clone());
            }
            "--check" => options.check_only = true,
            "-v" | "--verbose" => options.verbose = true,
            // Explicit stdin
            "-" => positional.push("-"),
            arg if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            arg => positional.push(arg),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    options.input_path = match positional.next() {
        None | Some("-") => None,
        Some(path) => Some(path.to_string()),
    };
    options.keys = positional.map(String::from).collect();

    if options.check_only && !options.keys.is_empty() {
        return Err("--check does not take keys".to_string());
    }
    if !options.check_only && options.keys.is_empty() {
        return Err("no keys given (use --check to only validate the file)".to_string());
    }

    Ok(Command::Run(options))
}

fn run(options: &Options) -> i32 {
    let doc = match load_input(options) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(&doc, options, &mut stdout.lock(), &mut stderr.lock())
}

/// Name used for the input in messages.
fn display_name(options: &Options) -> &str {
    options.input_path.as_deref().unwrap_or("<stdin>")
}

/// Load the input file, or validate stdin bytes when no file was given.
fn load_input(options: &Options) -> Result<Document, String> {
    let result = match &options.input_path {
        Some(path) => load(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| format!("Error reading stdin: {}", e))?;
            parse_bytes(&buffer)
        }
    };
    result.map_err(|e| match e {
        // Io errors already name the file.
        LoadError::Io { .. } => format!("Error: {}", e),
        e => format!("{}: {}", display_name(options), e),
    })
}

/// Check or look up keys in a loaded document, writing results to `out` and
/// diagnostics to `err`. Returns the process exit code.
fn execute(
    doc: &Document,
    options: &Options,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32 {
    if options.check_only {
        return match writeln!(out, "{}: ok", display_name(options)) {
            Ok(()) => 0,
            Err(_) => 1,
        };
    }

    let (entries, mut exit_code) = lookup_all(doc, options, err);

    let output = match render(&entries, options.format) {
        Ok(output) => output,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            return 1;
        }
    };

    let written = match options.output_file.as_deref() {
        Some(path) => fs::write(path, &output).map_err(|e| format!("writing {}: {}", path, e)),
        None => out
            .write_all(output.as_bytes())
            .map_err(|e| format!("writing to stdout: {}", e)),
    };
    if let Err(e) = written {
        let _ = writeln!(err, "Error: {}", e);
        exit_code = 1;
    }
    exit_code
}

/// Look up every requested key. Missing keys are reported to `err` and make
/// the exit code 1; the keys that resolved are still returned.
fn lookup_all(
    doc: &Document,
    options: &Options,
    err: &mut impl Write,
) -> (Vec<(String, Value)>, i32) {
    let mut exit_code = 0;
    let mut entries: Vec<(String, Value)> = Vec::new();
    for key in &options.keys {
        match lookup(doc, key, options.value_type, options.max_len) {
            Some(value) => {
                debug!(key = %key, value_type = value.type_name(), value = ?value, "resolved");
                entries.push((key.clone(), value));
            }
            None => {
                debug!(key = %key, value_type = ?options.value_type, "lookup failed");
                let _ = writeln!(err, "Error: {}: not found", key);
                exit_code = 1;
            }
        }
    }
    (entries, exit_code)
}

/// Look up one key, decoding as the requested type.
fn lookup(doc: &Document, key: &str, value_type: ValueType, max_len: usize) -> Option<Value> {
    match value_type {
        ValueType::Auto => match doc.get(key)? {
            Value::String(_) => doc.get_string(key, max_len).map(Value::String),
            value => Some(value),
        },
        ValueType::Bool => doc.get_bool(key).map(Value::Bool),
        ValueType::Int => doc.get_big_int(key).map(Value::Integer),
        ValueType::Float => doc.get_float(key).map(Value::Float),
        ValueType::String => doc.get_string(key, max_len).map(Value::String),
    }
}

fn render(entries: &[(String, Value)], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|(key, value)| format!("{} = {}\n", key, value))
            .collect()),
        OutputFormat::Toml => transcode::toml::encode(entries),
        OutputFormat::Yaml => transcode::yaml::encode(entries),
    }
}

fn print_help() {
    println!(
        "ltf - LTF command-line tool

USAGE:
    ltf [OPTIONS] [FILE] [KEY...]

ARGS:
    [FILE]        UTF-16LE LTF document (reads from stdin if not provided or '-')
    [KEY...]      Dotted paths to look up: 'section.key' or a bare root 'key'

OPTIONS:
    -t, --type <TYPE>      Decode values as
                           Supported: auto, bool, int, float, string [default: auto]

                           'auto' tries bool, int, float and string in that order.

    -m, --max-len <N>      String capacity in UTF-16 code units, terminator
                           included; strings keep at most N-1 units [default: 1024]

    -f, --format <FORMAT>  Output format
                           Supported: text, toml, yaml [default: text]

    -o, --output <FILE>    Write output to specified file

    --check                Check that FILE loads (exit 0 if valid, 1 if invalid)

    -v, --verbose          Log lookups to stderr (RUST_LOG overrides)

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Validate the encoding and byte-order mark of a config file
    ltf --check rpc/config.txt

    # Read a boolean from a section
    ltf -t bool rpc/config.txt file.creation.server_side

    # Read several values and export them as TOML
    ltf -f toml rpc/config.txt namespace.global session.type
"
    );
}
