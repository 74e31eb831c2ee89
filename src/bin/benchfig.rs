use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "benchfig", version, about = "Render latency report figures")]
struct Cli {
    /// Benchmark results JSON with `cvcp` and `http` sample arrays.
    #[arg(long = "in", default_value = benchfig::pipeline::DEFAULT_INPUT)]
    in_path: PathBuf,

    /// Directory receiving the PNG figures.
    #[arg(long, default_value = benchfig::pipeline::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = benchfig::ReportConfig {
        input: cli.in_path,
        out_dir: cli.out_dir,
        ..benchfig::ReportConfig::default()
    };

    match benchfig::generate_report_assets(&config) {
        Ok(_) => {
            println!("Assets generated in {}/", config.out_dir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", anyhow::Error::new(err));
            ExitCode::from(1)
        }
    }
}
