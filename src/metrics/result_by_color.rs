//! Win/draw tallies per color, split by corpus category.

use super::{report_header, Metric};
use crate::core::{Category, Game, GameResult, GameType};
use crate::io;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct Outcomes {
    white_wins: u64,
    black_wins: u64,
    draws: u64,
    unfinished: u64,
}

pub struct ResultByColorMetric {
    outcomes: BTreeMap<Category, Outcomes>,
    output: PathBuf,
}

impl ResultByColorMetric {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            outcomes: BTreeMap::new(),
            output: output_dir.join("result-by-color.csv"),
        }
    }
}

impl Metric for ResultByColorMetric {
    fn name(&self) -> &str {
        "result-by-color"
    }

    fn analyze_game(
        &mut self,
        category: Category,
        _game_type: GameType,
        game: &Game,
    ) -> Result<()> {
        let entry = self.outcomes.entry(category).or_default();
        match game.result {
            GameResult::WhiteWins => entry.white_wins += 1,
            GameResult::BlackWins => entry.black_wins += 1,
            GameResult::Draw => entry.draws += 1,
            GameResult::Unfinished => entry.unfinished += 1,
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let mut out = report_header("category,white_wins,black_wins,draws,unfinished");
        for (category, o) in &self.outcomes {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                category, o.white_wins, o.black_wins, o.draws, o.unfinished
            ));
        }
        io::write_file(&self.output, &out)
            .with_context(|| format!("writing {}", self.output.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Move, Player};
    use tempfile::TempDir;

    fn game_with_result(result: GameResult) -> Game {
        Game::new(
            Player::new("a", None),
            Player::new("b", None),
            GameType::Base,
            result,
            vec![Move {
                color: Color::White,
                token: "Q".into(),
                position: ".".into(),
            }],
        )
    }

    #[test]
    fn tallies_results_per_category() {
        let dir = TempDir::new().unwrap();
        let mut metric = ResultByColorMetric::new(dir.path());
        for result in [
            GameResult::WhiteWins,
            GameResult::WhiteWins,
            GameResult::BlackWins,
            GameResult::Draw,
        ] {
            metric
                .analyze_game(Category::Tournament, GameType::Base, &game_with_result(result))
                .unwrap();
        }
        metric.save().unwrap();
        let report = std::fs::read_to_string(dir.path().join("result-by-color.csv")).unwrap();
        assert!(report.contains("tournament,2,1,1,0"));
    }
}
