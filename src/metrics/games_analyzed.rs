//! Counts analyzed games per category and variant.

use super::{report_header, Metric};
use crate::core::{Category, Game, GameType};
use crate::io;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct GamesAnalyzedMetric {
    counts: BTreeMap<(Category, GameType), u64>,
    output: PathBuf,
}

impl GamesAnalyzedMetric {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            counts: BTreeMap::new(),
            output: output_dir.join("games-analyzed.csv"),
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl Metric for GamesAnalyzedMetric {
    fn name(&self) -> &str {
        "games-analyzed"
    }

    fn analyze_game(
        &mut self,
        category: Category,
        game_type: GameType,
        _game: &Game,
    ) -> Result<()> {
        *self.counts.entry((category, game_type)).or_insert(0) += 1;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let mut out = report_header("category,variant,games");
        for (&(category, game_type), count) in &self.counts {
            out.push_str(&format!("{category},{game_type},{count}\n"));
        }
        io::write_file(&self.output, &out)
            .with_context(|| format!("writing {}", self.output.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameResult, Move, Player};
    use tempfile::TempDir;

    fn sample_game() -> Game {
        Game::new(
            Player::new("a", None),
            Player::new("b", None),
            GameType::Base,
            GameResult::Draw,
            vec![Move {
                color: crate::core::Color::White,
                token: "Q".into(),
                position: ".".into(),
            }],
        )
    }

    #[test]
    fn counts_per_category_and_variant() {
        let dir = TempDir::new().unwrap();
        let mut metric = GamesAnalyzedMetric::new(dir.path());
        let game = sample_game();
        metric
            .analyze_game(Category::All, GameType::Base, &game)
            .unwrap();
        metric
            .analyze_game(Category::All, GameType::Base, &game)
            .unwrap();
        metric
            .analyze_game(Category::Tournament, GameType::Mixed, &game)
            .unwrap();
        assert_eq!(metric.total(), 3);

        metric.save().unwrap();
        let report = std::fs::read_to_string(dir.path().join("games-analyzed.csv")).unwrap();
        assert!(report.contains("all,base,2"));
        assert!(report.contains("tournament,mixed,1"));
    }

    #[test]
    fn empty_state_still_saves_a_report() {
        let dir = TempDir::new().unwrap();
        let metric = GamesAnalyzedMetric::new(dir.path());
        metric.save().unwrap();
        let report = std::fs::read_to_string(dir.path().join("games-analyzed.csv")).unwrap();
        assert!(report.contains("category,variant,games"));
    }
}
