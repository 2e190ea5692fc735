use clap::{Parser, ValueEnum};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vimlparse::{compile, diff_fingerprint, parse_str, ParserOptions};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical prefix notation, one statement per line
    Sexp,
    /// The AST as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "vimlparse")]
#[command(about = "Parse Vim script and print its syntax tree")]
#[command(version)]
struct Cli {
    /// Script file to parse (stdin when omitted)
    #[arg()]
    file: Option<String>,

    /// Resolve commands against the Neovim command set
    #[arg(long = "neovim")]
    neovim: bool,

    /// JSON file with parser options, e.g. {"neovim": true}
    #[arg(long = "config")]
    config: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "sexp")]
    format: Format,

    /// Compare the output with a stored fingerprint and print a diff on mismatch
    #[arg(long = "expect")]
    expect: Option<String>,

    /// Log parser activity to stderr (-v debug, -vv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "vimlparse=debug",
        _ => "vimlparse=trace",
    };
    let filter = if verbose > 0 {
        tracing_subscriber::EnvFilter::new(default)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_source(file: Option<&str>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read script file: {}: {}", path, e)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let name = cli.file.clone().unwrap_or_else(|| "<stdin>".to_string());
    let source = match read_source(cli.file.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut options = match cli.config.as_deref() {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| ParserOptions::from_json(&text).map_err(|e| e.to_string()))
        {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error: Cannot load config: {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ParserOptions::default(),
    };
    options.neovim |= cli.neovim;
    let ast = match parse_str(&source, &options) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("{}: {}", name, e);
            std::process::exit(1);
        }
    };

    let output = match cli.format {
        Format::Sexp => {
            let mut text = compile(&ast).join("\n");
            text.push('\n');
            text
        }
        Format::Json => match serde_json::to_string_pretty(&ast) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    if let Some(expect) = cli.expect {
        let expected = match std::fs::read_to_string(&expect) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read fingerprint: {}: {}", expect, e);
                std::process::exit(1);
            }
        };
        if let Some(diff) = diff_fingerprint(&expected, &output) {
            print!("{}", diff);
            std::process::exit(1);
        }
        return;
    }

    print!("{}", output);
}
