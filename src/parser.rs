//! Replay record parsing.
//!
//! Reads one boardspace-style SGF record and reconstructs a [`Game`]. The
//! reader is deliberately shallow: it extracts the setup (`SU`), player
//! (`P0`/`P1`), result (`RE`) and move properties and ignores everything else
//! in the record. Rule validation of the reconstructed game is out of scope.
//!
//! Every failure is a typed [`ParseError`] carrying the file identity, so the
//! pipeline can log and skip the file without losing the cause.

use crate::core::errors::ParseError;
use crate::core::{Color, FileRef, Game, GameResult, GameType, Move, Player};
use std::fs;

pub struct ReplayParser {
    file: FileRef,
    game_type: Option<GameType>,
}

impl ReplayParser {
    pub fn new(file: &FileRef) -> Self {
        Self {
            file: file.clone(),
            game_type: None,
        }
    }

    /// The variant discovered from the record content. Present only after a
    /// successful [`parse`](Self::parse); distinct from the directory-derived
    /// [`Category`](crate::core::Category).
    pub fn game_type(&self) -> Option<GameType> {
        self.game_type
    }

    pub fn parse(&mut self) -> Result<Game, ParseError> {
        let text = fs::read_to_string(&self.file.path).map_err(|source| ParseError::Unreadable {
            file: self.file.path.clone(),
            source,
        })?;

        let properties = scan_properties(&text, &self.file)?;
        let game = self.build_game(&properties)?;
        self.game_type = Some(game.game_type);
        Ok(game)
    }

    fn build_game(&self, properties: &[Property]) -> Result<Game, ParseError> {
        let setup = properties
            .iter()
            .find(|p| p.name == "SU")
            .map(|p| p.value.clone())
            .unwrap_or_default();
        let game_type =
            GameType::from_setup(&setup).ok_or_else(|| ParseError::UnknownVariant {
                file: self.file.path.clone(),
                setup,
            })?;

        let white = self.build_player(properties, "P0")?;
        let black = self.build_player(properties, "P1")?;
        let result = parse_result(properties);
        let moves = self.build_moves(properties)?;
        if moves.is_empty() {
            return Err(ParseError::NoMoves {
                file: self.file.path.clone(),
            });
        }

        Ok(Game::new(white, black, game_type, result, moves))
    }

    fn build_player(&self, properties: &[Property], slot: &'static str) -> Result<Player, ParseError> {
        let mut name = String::from("unknown");
        let mut rating = None;
        for prop in properties.iter().filter(|p| p.name == slot) {
            let mut words = prop.value.split_whitespace();
            match words.next() {
                Some("id") => {
                    let rest = prop.value["id".len()..].trim();
                    name = rest.trim_matches('"').to_string();
                }
                Some("rating") => {
                    let raw = words.next().unwrap_or_default();
                    rating = Some(raw.parse::<u32>().map_err(|_| {
                        ParseError::MalformedProperty {
                            file: self.file.path.clone(),
                            property: "rating",
                            detail: raw.to_string(),
                        }
                    })?);
                }
                _ => {} // move node or unrecognized player attribute
            }
        }
        Ok(Player::new(name, rating))
    }

    fn build_moves(&self, properties: &[Property]) -> Result<Vec<Move>, ParseError> {
        let mut moves = Vec::new();
        for prop in properties {
            let color = match prop.name.as_str() {
                "P0" => Color::White,
                "P1" => Color::Black,
                _ => continue,
            };
            let words: Vec<&str> = prop.value.split_whitespace().collect();
            // Move nodes lead with the turn number: `P0[12 move W G1 Q-]`.
            if words.first().is_none_or(|w| w.parse::<usize>().is_err()) {
                continue;
            }
            if words.len() < 3 {
                return Err(ParseError::MalformedProperty {
                    file: self.file.path.clone(),
                    property: "move",
                    detail: prop.value.clone(),
                });
            }
            let token_at = if words.len() > 3 { 3 } else { 2 };
            moves.push(Move {
                color,
                token: words[token_at].to_string(),
                position: words.get(token_at + 1..).map_or_else(String::new, |rest| {
                    rest.join(" ")
                }),
            });
        }
        Ok(moves)
    }
}

struct Property {
    name: String,
    value: String,
}

/// Flat scan of `NAME[value]` pairs in record order.
///
/// Parentheses structure only matters for the truncation check: an unbalanced
/// record (cut off mid-transfer) must fail rather than yield a partial game.
fn scan_properties(text: &str, file: &FileRef) -> Result<Vec<Property>, ParseError> {
    let truncated = || ParseError::Truncated {
        file: file.path.clone(),
    };

    if !text.trim_start().starts_with('(') {
        return Err(truncated());
    }

    let mut properties = Vec::new();
    let mut depth = 0i32;
    let mut name = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(truncated());
                }
            }
            '[' => {
                let mut value = String::new();
                let mut closed = false;
                for v in chars.by_ref() {
                    if v == ']' {
                        closed = true;
                        break;
                    }
                    value.push(v);
                }
                if !closed {
                    return Err(truncated());
                }
                if !name.is_empty() {
                    properties.push(Property {
                        name: std::mem::take(&mut name),
                        value,
                    });
                }
            }
            c if c.is_ascii_alphanumeric() => name.push(c),
            _ => name.clear(),
        }
    }
    if depth != 0 {
        return Err(truncated());
    }
    Ok(properties)
}

fn parse_result(properties: &[Property]) -> GameResult {
    let Some(prop) = properties.iter().find(|p| p.name == "RE") else {
        return GameResult::Unfinished;
    };
    match prop.value.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => GameResult::WhiteWins,
        "black" | "b" => GameResult::BlackWins,
        "draw" => GameResult::Draw,
        _ => GameResult::Unfinished,
    }
}
