//! Frequency of the first placed token, split by variant.

use super::{report_header, Metric};
use crate::core::{Category, Game, GameType};
use crate::io;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct OpeningMoveMetric {
    counts: BTreeMap<(GameType, String), u64>,
    output: PathBuf,
}

impl OpeningMoveMetric {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            counts: BTreeMap::new(),
            output: output_dir.join("opening-move.csv"),
        }
    }
}

impl Metric for OpeningMoveMetric {
    fn name(&self) -> &str {
        "opening-move"
    }

    fn analyze_game(
        &mut self,
        _category: Category,
        game_type: GameType,
        game: &Game,
    ) -> Result<()> {
        // Parser guarantees at least one move, but a caller-built game may be
        // empty; an opening metric has nothing to count for it.
        if let Some(opening) = game.opening_move() {
            *self
                .counts
                .entry((game_type, opening.token.clone()))
                .or_insert(0) += 1;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let mut out = report_header("variant,token,games");
        for ((game_type, token), count) in &self.counts {
            out.push_str(&format!("{game_type},{token},{count}\n"));
        }
        io::write_file(&self.output, &out)
            .with_context(|| format!("writing {}", self.output.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GameResult, Move, Player};
    use tempfile::TempDir;

    fn game_opening_with(token: &str) -> Game {
        Game::new(
            Player::new("a", None),
            Player::new("b", None),
            GameType::Base,
            GameResult::Draw,
            vec![Move {
                color: Color::White,
                token: token.into(),
                position: ".".into(),
            }],
        )
    }

    #[test]
    fn counts_opening_tokens_per_variant() {
        let dir = TempDir::new().unwrap();
        let mut metric = OpeningMoveMetric::new(dir.path());
        for token in ["Q", "Q", "G1"] {
            metric
                .analyze_game(Category::All, GameType::Base, &game_opening_with(token))
                .unwrap();
        }
        metric.save().unwrap();
        let report = std::fs::read_to_string(dir.path().join("opening-move.csv")).unwrap();
        assert!(report.contains("base,Q,2"));
        assert!(report.contains("base,G1,1"));
    }
}
