//! Stateful accumulators fed with every accepted game.
//!
//! Metrics are independent of one another: each accepted game is offered to
//! every registered metric in registration order, and each metric persists its
//! own report exactly once after the last file of the last category. Updates
//! and saves happen on the orchestrator thread only, so implementations need
//! no internal locking.

pub mod game_duration;
pub mod games_analyzed;
pub mod opening_move;
pub mod result_by_color;

pub use game_duration::GameDurationMetric;
pub use games_analyzed::GamesAnalyzedMetric;
pub use opening_move::OpeningMoveMetric;
pub use result_by_color::ResultByColorMetric;

use crate::core::errors::PipelineError;
use crate::core::{Category, Game, GameType};
use anyhow::Result;
use std::path::Path;

pub trait Metric {
    /// Registry/config name; also names the persisted report.
    fn name(&self) -> &str;

    /// Fold one accepted game into the accumulated state. The game arrives in
    /// analysis mode (replay flag cleared).
    fn analyze_game(&mut self, category: Category, game_type: GameType, game: &Game)
        -> Result<()>;

    /// Persist the accumulated result. Called exactly once per run, also for
    /// an empty corpus.
    fn save(&self) -> Result<()>;
}

/// Registration-ordered collection of metrics.
#[derive(Default)]
pub struct MetricSet {
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, metric: Box<dyn Metric>) {
        self.metrics.push(metric);
    }

    pub fn with(mut self, metric: Box<dyn Metric>) -> Self {
        self.register(metric);
        self
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Offer one accepted game to every metric in registration order.
    ///
    /// Baseline (`isolate` false): the first failing update aborts the run,
    /// surfacing accumulator bugs loudly. With `isolate` set, a failing
    /// update is logged and the remaining metrics still see the game.
    pub fn offer(
        &mut self,
        category: Category,
        game_type: GameType,
        game: &Game,
        file: &Path,
        isolate: bool,
    ) -> Result<(), PipelineError> {
        for metric in &mut self.metrics {
            if let Err(source) = metric.analyze_game(category, game_type, game) {
                if isolate {
                    log::error!(
                        "metric '{}' failed on {}: {:#}",
                        metric.name(),
                        file.display(),
                        source
                    );
                    continue;
                }
                return Err(PipelineError::MetricUpdate {
                    metric: metric.name().to_string(),
                    file: file.to_path_buf(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Ask every metric to persist, in registration order.
    ///
    /// Baseline (`isolate` false): the first failure propagates and later
    /// metrics are not attempted. With `isolate` set, every save is attempted
    /// and the failures are reported together at the end.
    pub fn save_all(&self, isolate: bool) -> Result<(), PipelineError> {
        if !isolate {
            for metric in &self.metrics {
                metric.save().map_err(|source| PipelineError::MetricSave {
                    metric: metric.name().to_string(),
                    source,
                })?;
            }
            return Ok(());
        }

        let mut failed = Vec::new();
        for metric in &self.metrics {
            if let Err(e) = metric.save() {
                log::error!("metric '{}' failed to save: {:#}", metric.name(), e);
                failed.push(metric.name().to_string());
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::SaveSummary {
                failed: failed.len(),
                attempted: self.metrics.len(),
                names: failed.join(", "),
            })
        }
    }
}

/// Build the metric named in the configuration, reporting under `output_dir`.
pub fn metric_by_name(name: &str, output_dir: &Path) -> Option<Box<dyn Metric>> {
    match name {
        "games-analyzed" => Some(Box::new(GamesAnalyzedMetric::new(output_dir))),
        "game-duration" => Some(Box::new(GameDurationMetric::new(output_dir))),
        "result-by-color" => Some(Box::new(ResultByColorMetric::new(output_dir))),
        "opening-move" => Some(Box::new(OpeningMoveMetric::new(output_dir))),
        _ => None,
    }
}

/// Shared CSV preamble so every report records when it was produced.
pub(crate) fn report_header(columns: &str) -> String {
    format!(
        "# generated by replaystat at {}\n{}\n",
        chrono::Utc::now().to_rfc3339(),
        columns
    )
}
