//! Handlers behind the CLI subcommands.

use crate::catalog::FileCatalog;
use crate::config::{self, Config};
use crate::filters::{filter_by_name, FilterChain};
use crate::io;
use crate::metrics::{metric_by_name, MetricSet};
use crate::pipeline::{Pipeline, PipelineOptions, RunSummary};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct AnalyzeArgs {
    pub config_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub parallel: bool,
    pub jobs: usize,
}

/// Set up and run one corpus pass. Everything up to `Pipeline::run` is setup:
/// any failure here aborts before a single file is parsed.
pub fn handle_analyze(args: AnalyzeArgs) -> Result<(RunSummary, Duration)> {
    let mut config = config::load_config(args.config_path.as_deref())?;
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }

    let roots = config.resolved_roots()?;
    let catalog = FileCatalog::from_roots(roots)
        .discover()
        .context("corpus discovery failed")?;

    io::ensure_dir(&config.output_dir).with_context(|| {
        format!("failed to create output dir {}", config.output_dir.display())
    })?;

    let filters = build_filter_chain(&config)?;
    let metrics = build_metric_set(&config)?;

    if args.parallel && args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .context("failed to configure worker pool")?;
    }

    let options = PipelineOptions {
        isolate_metric_failures: config.fault_handling.isolate_metric_failures,
        isolate_save_failures: config.fault_handling.isolate_save_failures,
        parallel: args.parallel,
    };

    let (summary, elapsed) = Pipeline::new(catalog, filters, metrics, options).run()?;

    if let Some(path) = &args.summary_path {
        let json = serde_json::to_string_pretty(&summary)?;
        io::write_file(path, &json)
            .with_context(|| format!("failed to write run summary {}", path.display()))?;
    }

    Ok((summary, elapsed))
}

fn build_filter_chain(config: &Config) -> Result<FilterChain> {
    let mut chain = FilterChain::new();
    for name in &config.filters {
        let filter =
            filter_by_name(name).ok_or_else(|| anyhow!("unknown filter '{}'", name))?;
        chain.register(filter);
    }
    Ok(chain)
}

fn build_metric_set(config: &Config) -> Result<MetricSet> {
    let mut set = MetricSet::new();
    for name in &config.metrics {
        let metric = metric_by_name(name, &config.output_dir)
            .ok_or_else(|| anyhow!("unknown metric '{}'", name))?;
        set.register(metric);
    }
    Ok(set)
}

/// Write a starter `replaystat.toml` into the working directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(config::DEFAULT_CONFIG_FILE);
    if io::file_exists(path) && !force {
        return Err(anyhow!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        ));
    }
    io::write_file(path, &config::default_config_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}
