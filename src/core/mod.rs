pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Corpus partition a file was discovered under.
///
/// Assigned from the configured root directory at discovery time, never from
/// file content. The content-derived classification is [`GameType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Every recorded play, regardless of opponents.
    All,
    /// Tournament plays.
    Tournament,
    /// Games between two human players.
    PlayerVsPlayer,
    /// Games between a bot and a human player.
    BotVsHuman,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Tournament,
        Category::PlayerVsPlayer,
        Category::BotVsHuman,
    ];

    /// Config/report identifier for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Tournament => "tournament",
            Category::PlayerVsPlayer => "players",
            Category::BotVsHuman => "dumbot",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A discovered replay file together with the category of its source root.
///
/// Created during discovery, immutable, consumed exactly once by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    pub path: PathBuf,
    pub category: Category,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>, category: Category) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }

    /// File name for log lines, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Game variant parsed from the record itself (the `SU` property), independent
/// of which directory the file came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    Base,
    Mosquito,
    Ladybug,
    Pillbug,
    /// More than one expansion in play.
    Mixed,
}

impl GameType {
    /// Map a boardspace setup string (e.g. `hive`, `hive-m`) to a variant.
    pub fn from_setup(setup: &str) -> Option<GameType> {
        match setup.trim().to_ascii_lowercase().as_str() {
            "hive" => Some(GameType::Base),
            "hive-m" => Some(GameType::Mosquito),
            "hive-l" => Some(GameType::Ladybug),
            "hive-p" => Some(GameType::Pillbug),
            s if s.starts_with("hive-") => Some(GameType::Mixed),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameType::Base => "base",
            GameType::Mosquito => "mosquito",
            GameType::Ladybug => "ladybug",
            GameType::Pillbug => "pillbug",
            GameType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// Abandoned or still-running record; no result property.
    Unfinished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Site rating at the time of play, when the record carries one.
    pub rating: Option<u32>,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: Option<u32>) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// One placement or movement of a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    /// Token identifier as recorded, e.g. `Q`, `A1`, `G2`.
    pub token: String,
    /// Destination in the record's own coordinate notation.
    pub position: String,
}

/// A fully reconstructed replay.
///
/// While `replay_mode` is set the game is treated as a replay-in-progress;
/// the pipeline clears it before any metric sees the game, signalling a
/// finalized record (analysis mode).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub white: Player,
    pub black: Player,
    pub game_type: GameType,
    pub result: GameResult,
    pub moves: Vec<Move>,
    replay_mode: bool,
}

impl Game {
    pub fn new(
        white: Player,
        black: Player,
        game_type: GameType,
        result: GameResult,
        moves: Vec<Move>,
    ) -> Self {
        Self {
            white,
            black,
            game_type,
            result,
            moves,
            replay_mode: true,
        }
    }

    pub fn replay_mode(&self) -> bool {
        self.replay_mode
    }

    pub fn set_replay_mode(&mut self, replay_mode: bool) {
        self.replay_mode = replay_mode;
    }

    /// Total moves played (both colors).
    pub fn turns(&self) -> usize {
        self.moves.len()
    }

    pub fn opening_move(&self) -> Option<&Move> {
        self.moves.first()
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}
