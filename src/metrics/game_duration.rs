//! Histogram of game length in moves, bucketed by tens.

use super::{report_header, Metric};
use crate::core::{Category, Game, GameType};
use crate::io;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const BUCKET_WIDTH: usize = 10;

pub struct GameDurationMetric {
    buckets: BTreeMap<usize, u64>,
    games: u64,
    total_moves: u64,
    output: PathBuf,
}

impl GameDurationMetric {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            buckets: BTreeMap::new(),
            games: 0,
            total_moves: 0,
            output: output_dir.join("game-duration.csv"),
        }
    }

    fn average(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

impl Metric for GameDurationMetric {
    fn name(&self) -> &str {
        "game-duration"
    }

    fn analyze_game(
        &mut self,
        _category: Category,
        _game_type: GameType,
        game: &Game,
    ) -> Result<()> {
        let turns = game.turns();
        *self.buckets.entry(turns / BUCKET_WIDTH).or_insert(0) += 1;
        self.games += 1;
        self.total_moves += turns as u64;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let mut out = report_header("moves_from,moves_to,games");
        for (&bucket, count) in &self.buckets {
            let from = bucket * BUCKET_WIDTH;
            out.push_str(&format!("{},{},{}\n", from, from + BUCKET_WIDTH - 1, count));
        }
        out.push_str(&format!("# average moves: {:.1}\n", self.average()));
        io::write_file(&self.output, &out)
            .with_context(|| format!("writing {}", self.output.display()))
    }
}
