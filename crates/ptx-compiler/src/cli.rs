use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub gpu_name: String,
    pub compile_options: Vec<String>,
    pub log_level: String,
}

pub fn parse_args() -> Result<Config> {
    let matches = Command::new("ptx-compiler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile PTX to a device binary with the nvPTXCompiler library")
        .arg(
            Arg::new("input")
                .help("PTX source file to compile")
                .value_name("FILE")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output path for the compiled binary (defaults to the input with a .cubin extension)")
                .value_name("PATH"),
        )
        .arg(
            Arg::new("gpu-name")
                .long("gpu-name")
                .help("Target GPU architecture, passed as --gpu-name to the compiler")
                .value_name("ARCH")
                .default_value("sm_75"),
        )
        .arg(
            Arg::new("compile-option")
                .long("compile-option")
                .help("Additional compiler option, may be repeated")
                .value_name("OPT")
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Logging level")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
        .get_matches();

    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Missing input file"))?;

    let output = matches.get_one::<String>("output").map(PathBuf::from);

    let gpu_name = matches
        .get_one::<String>("gpu-name")
        .cloned()
        .unwrap_or_else(|| "sm_75".to_string());

    let compile_options = matches
        .get_many::<String>("compile-option")
        .map(|opts| opts.cloned().collect())
        .unwrap_or_default();

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| "info".to_string());

    Ok(Config {
        input,
        output,
        gpu_name,
        compile_options,
        log_level,
    })
}

pub fn setup_logging(level: &str) -> Result<()> {
    let level_filter = match level {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", level)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            level_filter,
        ))
        .init();

    Ok(())
}
