//! Pipeline orchestration.
//!
//! Owns the corpus run: iterate the catalog category by category, parse each
//! file with per-file fault isolation, screen the game through the filter
//! chain, clear its replay flag, feed it to every metric, and finally flush
//! every metric exactly once.
//!
//! A parse failure is logged and skipped; the run never aborts on a bad file.
//! Metric update and save failures propagate by default (an accumulator bug
//! should be loud), with log-and-continue available behind the
//! `[fault_handling]` configuration toggles.

use crate::catalog::Catalog;
use crate::core::{FileRef, Game, GameType};
use crate::filters::FilterChain;
use crate::metrics::MetricSet;
use crate::parser::ReplayParser;
use anyhow::Result;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Immutable run options, assembled once at startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineOptions {
    pub isolate_metric_failures: bool,
    pub isolate_save_failures: bool,
    /// Parse and filter files of a category in parallel. Metric updates and
    /// saves stay on the orchestrator thread either way.
    pub parallel: bool,
}

/// Per-file terminal states of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub files_discovered: usize,
    pub parse_failures: usize,
    pub rejected: usize,
    pub analyzed: usize,
}

impl RunSummary {
    /// Files that survived parsing, whether or not a filter rejected them.
    pub fn parsed(&self) -> usize {
        self.files_discovered - self.parse_failures
    }
}

enum FileOutcome {
    ParseFailed,
    Rejected,
    Accepted {
        /// Content-derived variant reported by the parser, as distinct from
        /// the directory-derived category on the `FileRef`.
        game_type: GameType,
        game: Box<Game>,
    },
}

pub struct Pipeline {
    catalog: Catalog,
    filters: FilterChain,
    metrics: MetricSet,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        catalog: Catalog,
        filters: FilterChain,
        metrics: MetricSet,
        options: PipelineOptions,
    ) -> Self {
        Self {
            catalog,
            filters,
            metrics,
            options,
        }
    }

    /// Process the whole catalog and flush every metric.
    ///
    /// Consumes the catalog: each `FileRef` is processed exactly once. The
    /// returned elapsed time covers processing and finalization.
    pub fn run(&mut self) -> Result<(RunSummary, Duration)> {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        let catalog = std::mem::take(&mut self.catalog);
        for (category, files) in catalog {
            log::info!("processing {} files in category '{}'", files.len(), category);
            summary.files_discovered += files.len();

            if self.options.parallel {
                self.process_category_parallel(files, &mut summary)?;
            } else {
                for file in files {
                    let outcome = parse_and_filter(&self.filters, &file);
                    self.settle(file, outcome, &mut summary)?;
                }
            }
        }

        self.metrics.save_all(self.options.isolate_save_failures)?;

        let elapsed = start.elapsed();
        log::info!(
            "run complete: {} files, {} parse failures, {} rejected, {} analyzed",
            summary.files_discovered,
            summary.parse_failures,
            summary.rejected,
            summary.analyzed
        );
        Ok((summary, elapsed))
    }

    /// Parse and filter in parallel, then feed metrics serially in catalog
    /// order (the collect preserves input order).
    fn process_category_parallel(
        &mut self,
        files: Vec<FileRef>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let filters = &self.filters;
        let outcomes: Vec<(FileRef, FileOutcome)> = files
            .into_par_iter()
            .map(|file| {
                let outcome = parse_and_filter(filters, &file);
                (file, outcome)
            })
            .collect();

        for (file, outcome) in outcomes {
            self.settle(file, outcome, summary)?;
        }
        Ok(())
    }

    /// Terminal step of the per-file state machine. Accepted games are put
    /// into analysis mode and offered to every metric in registration order,
    /// then dropped.
    fn settle(
        &mut self,
        file: FileRef,
        outcome: FileOutcome,
        summary: &mut RunSummary,
    ) -> Result<()> {
        match outcome {
            FileOutcome::ParseFailed => summary.parse_failures += 1,
            FileOutcome::Rejected => summary.rejected += 1,
            FileOutcome::Accepted { game_type, mut game } => {
                game.set_replay_mode(false);
                self.metrics.offer(
                    file.category,
                    game_type,
                    &game,
                    &file.path,
                    self.options.isolate_metric_failures,
                )?;
                summary.analyzed += 1;
            }
        }
        Ok(())
    }
}

/// Parse one file and run it through the filter chain.
///
/// Isolation boundary for parse failures: every parser error ends here as a
/// logged `ParseFailed` outcome, never as a run abort.
fn parse_and_filter(filters: &FilterChain, file: &FileRef) -> FileOutcome {
    let mut parser = ReplayParser::new(file);
    let game = match parser.parse() {
        Ok(game) => game,
        Err(e) => {
            log::warn!("game could not be parsed: {} -> {:#}", file.display_name(), e);
            return FileOutcome::ParseFailed;
        }
    };

    if filters.accepts(file.category, &game) {
        let game_type = parser.game_type().unwrap_or(game.game_type);
        FileOutcome::Accepted {
            game_type,
            game: Box::new(game),
        }
    } else {
        log::debug!("filters rejected {}", file.display_name());
        FileOutcome::Rejected
    }
}
