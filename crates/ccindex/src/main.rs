use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ccindex::{Config, index_file, report};

#[derive(Parser, Debug)]
#[command(name = "ccindex", version, about = "Summarize the symbols of a C/C++ source file")]
struct Args {
    /// Path to the file to be parsed.
    filename: PathBuf,

    /// Additional include search directory; repeatable.
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// Write the result as JSON instead of printing the report.
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "out.json")]
    json: Option<PathBuf>,

    /// Path to a ccindex.toml configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let stderr_filter = if args.verbose {
        EnvFilter::new("ccindex=debug")
    } else {
        EnvFilter::new("ccindex=warn")
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = args.log_file.as_ref().map(|path| {
        let appender = tracing_appender::rolling::never(
            path.parent().unwrap_or(std::path::Path::new(".")),
            path.file_name().unwrap_or(std::ffi::OsStr::new("ccindex.log")),
        );
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new("ccindex=debug"))
    });

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("[Error] {error}");
            std::process::exit(1);
        }
    };
    config.include_dirs.extend(args.include_dirs);

    let result = match index_file(&config, &args.filename) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("[Error] {error}");
            std::process::exit(1);
        }
    };

    match &args.json {
        Some(path) => {
            let file = match std::fs::File::create(path) {
                Ok(file) => file,
                Err(error) => {
                    eprintln!("[Error] cannot write {}: {error}", path.display());
                    std::process::exit(1);
                }
            };
            if let Err(error) = serde_json::to_writer_pretty(file, &result) {
                eprintln!("[Error] cannot serialize result: {error}");
                std::process::exit(1);
            }
            info!("wrote {} symbols to {}", result.symbols.len(), path.display());
        }
        None => {
            print!("{}", report::render(&args.filename.display().to_string(), &result));
        }
    }
}
