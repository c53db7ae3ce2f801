use anyhow::Result;
use clap::Parser;
use replaystat::cli::{Cli, Commands};
use replaystat::commands::{handle_analyze, init_config, AnalyzeArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            config,
            output,
            summary,
            parallel,
            jobs,
            verbosity,
        } => {
            init_logger(verbosity);
            let (summary, elapsed) = handle_analyze(AnalyzeArgs {
                config_path: config,
                output_dir: output,
                summary_path: summary,
                parallel,
                jobs,
            })?;
            println!(
                "{} files processed ({} parse failures, {} rejected, {} analyzed)",
                summary.files_discovered,
                summary.parse_failures,
                summary.rejected,
                summary.analyzed
            );
            println!("Done: {:.1} s.", elapsed.as_secs_f64());
            Ok(())
        }
        Commands::Init { force } => {
            init_logger(0);
            init_config(force)
        }
    }
}

// RUST_LOG still wins over -v so targeted module filters stay possible.
fn init_logger(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
