use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clang_complete::{ArgumentManager, ClangFrontend, CompletionEngine, Dialect, ProjectConfig};

#[derive(Parser, Debug)]
#[command(name = "clang-complete", version, about)]
struct Args {
    /// Source file to complete in.
    file: std::path::PathBuf,

    /// 1-based cursor line.
    #[arg(long, short)]
    line: u32,

    /// 1-based cursor column (byte-based, clang convention).
    #[arg(long, short)]
    column: u32,

    /// Language dialect: c, c++, objective-c, objective-c++.
    #[arg(long)]
    dialect: Option<String>,

    /// Language standard version, e.g. 17 for -std=c++17.
    #[arg(long)]
    std: Option<u32>,

    /// Extra include search paths.
    #[arg(short = 'I', long = "include")]
    include_paths: Vec<String>,

    /// Extra preprocessor definitions, NAME or NAME=VALUE.
    #[arg(short = 'D', long = "define")]
    definitions: Vec<String>,

    /// Explicit clang-complete.toml path; defaults to ancestor discovery.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Clang driver binary.
    #[arg(long, default_value = "clang")]
    clang: String,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,
}

fn default_log_path() -> std::path::PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = std::path::PathBuf::from(home).join(".clang-complete");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir.join("clang-complete.log");
        }
    }
    std::env::temp_dir().join("clang-complete.log")
}

fn main() {
    let args = Args::parse();

    let stderr_filter = if args.verbose {
        EnvFilter::new("clang_complete=debug")
    } else {
        EnvFilter::new("clang_complete=warn")
    };
    let file_filter = if args.verbose {
        EnvFilter::new("clang_complete=debug")
    } else {
        EnvFilter::new("clang_complete=info")
    };

    let log_path = args.log_file.as_ref().map(std::path::PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("clang-complete.log")),
    );

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(file_filter);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    info!("clang-complete v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => ProjectConfig::load(path),
        None => ProjectConfig::resolve(&args.file),
    };
    if let Some(dialect) = &args.dialect {
        config.dialect = Dialect::from_setting_value(dialect);
    }
    if args.std.is_some() {
        config.standard = args.std;
    }

    let mut arg_manager: ArgumentManager = config.argument_manager();
    arg_manager.add_include_paths(&args.include_paths);
    arg_manager.add_definitions(&args.definitions);
    debug!("compiler flags: {:?}", arg_manager.args());

    let file = args.file.display().to_string();
    let content = match std::fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("clang-complete: cannot read {file}: {err}");
            std::process::exit(1);
        },
    };

    let mut engine = CompletionEngine::new(ClangFrontend::with_binary(&args.clang));
    let candidates = engine.code_complete(&file, &content, args.line, args.column, &arg_manager);
    info!("{} candidates at {file}:{}:{}", candidates.len(), args.line, args.column);

    match serde_json::to_string_pretty(&candidates) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("clang-complete: cannot serialize candidates: {err}");
            std::process::exit(1);
        },
    }
}
